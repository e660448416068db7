use crate::config::load_config;
use crate::errors::CliError;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use storefront_compiler_html::{ElementStateReplay, StaticRenderer};
use storefront_server::{FileRecordStore, RecordStore, StoreRecord, StorefrontConfig};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Load the store record for this domain from the data directory
    #[arg(short, long, conflicts_with = "store")]
    pub domain: Option<String>,

    /// Store record JSON file
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Template key (overrides the record)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Content document JSON file (overrides the record)
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Product list JSON file (overrides the record)
    #[arg(long)]
    pub products: Option<PathBuf>,

    /// Replay hidden, deleted and moved element states
    #[arg(long)]
    pub replay: bool,

    /// Copyright year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Output file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn read_json(path: &Path) -> Result<Value> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn load_record(args: &RenderArgs, config: &StorefrontConfig, cwd: &Path) -> Result<StoreRecord> {
    let mut record = match (&args.domain, &args.store) {
        (Some(domain), _) => FileRecordStore::new(&config.data_dir)
            .load(domain)?
            .ok_or_else(|| CliError::StoreNotFound(domain.clone()))?,
        (None, Some(path)) => {
            let path = cwd.join(path);
            if !path.exists() {
                return Err(CliError::MissingInput(path).into());
            }
            serde_json::from_value(read_json(&path)?)
                .with_context(|| format!("Invalid store record in {}", path.display()))?
        }
        (None, None) => return Err(CliError::NoStore.into()),
    };

    if let Some(template) = &args.template {
        record.template = template.clone();
    }
    if let Some(path) = &args.content {
        record.content = Some(read_json(&cwd.join(path))?);
    }
    if let Some(path) = &args.products {
        record.products = read_json(&cwd.join(path))?;
    }
    Ok(record)
}

/// Render a page from the given inputs.
///
/// Unpublished records render too, so a store can be previewed before it
/// goes live.
pub fn render_record(record: &StoreRecord, config: &StorefrontConfig, args: &RenderArgs) -> Result<String> {
    let mut options = config.render_options();
    if args.replay {
        options.element_state_replay = ElementStateReplay::Apply;
    }
    options.copyright_year = args.year;

    let template = config.catalog().load_named(&record.template)?;
    Ok(StaticRenderer::new(options).render_json(
        &template,
        record.content.as_ref(),
        &record.products,
        &record.profile,
        &config.resolver(),
    ))
}

pub fn render(args: RenderArgs, config: Option<&Path>, cwd: &Path) -> Result<()> {
    let config = load_config(config, cwd)?;
    let record = load_record(&args, &config, cwd)?;
    let html = render_record(&record, &config, &args)?;

    match &args.output {
        Some(output) => {
            let output = cwd.join(output);
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output, &html)?;
            eprintln!(
                "  {} {} → {}",
                "✓".green(),
                record.domain(),
                output.display()
            );
            if !record.published {
                eprintln!("  {} {} is not published", "⚠️".yellow(), record.domain());
            }
        }
        None => print!("{}", html),
    }

    Ok(())
}
