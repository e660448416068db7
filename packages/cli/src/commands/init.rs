use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use storefront_server::{FileRecordStore, RecordStore, StoreRecord, StorefrontConfig, DEFAULT_CONFIG_NAME};
use storefront_templates::TemplateKey;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Record store directory
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Seed a published sample store under this domain
    #[arg(long)]
    pub sample: Option<String>,

    /// Template for the sample store (classic, modern, minimal)
    #[arg(short, long, default_value = "classic")]
    pub template: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing storefront...".bright_blue().bold());

    let data_dir = cwd.join(&args.data_dir);
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
        println!("  {} Created {}/", "✓".green(), args.data_dir.display());
    }

    let config = StorefrontConfig {
        data_dir: args.data_dir.clone(),
        ..Default::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    if let Some(domain) = &args.sample {
        let template = TemplateKey::parse_or_default(&args.template);
        let mut record = StoreRecord::new(domain.clone(), "Sample Store");
        record.template = template.as_str().to_string();
        record.published = true;
        record.products = serde_json::json!([
            { "id": 1, "name": "Sample product", "price": 250, "description": "Replace me with a real product." }
        ]);

        FileRecordStore::new(&data_dir).save(&record)?;
        println!(
            "  {} Created sample store {} ({})",
            "✓".green(),
            record.domain(),
            template
        );
    }

    println!();
    println!("{}", "✅ Storefront initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Add store records under {}/stores/", args.data_dir.display());
    println!("  2. Run: storefront render --domain <domain>");
    println!("  3. Run: storefront serve");

    Ok(())
}
