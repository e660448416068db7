use crate::config::load_config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;
use storefront_content::markup_scan::{scan_elements, scan_selectable};
use storefront_products::is_product_region;
use storefront_templates::TemplateSource;

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Also list each template's selectable element ids
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn templates(args: TemplatesArgs, config: Option<&Path>, cwd: &Path) -> Result<()> {
    let catalog = load_config(config, cwd)?.catalog();

    match catalog.source() {
        TemplateSource::Embedded => println!("{}", "📦 Built-in templates".bright_blue().bold()),
        TemplateSource::Directory(dir) => println!(
            "{} {}",
            "📂 Templates from".bright_blue().bold(),
            dir.display()
        ),
    }

    for key in catalog.keys() {
        let template = match catalog.load(*key) {
            Ok(template) => template,
            Err(e) => {
                println!("  {} {:<8} {}", "✗".red(), key.as_str(), e);
                continue;
            }
        };

        let selectable = scan_selectable(&template.raw_markup);
        let has_product_region = scan_elements(&template.raw_markup)
            .iter()
            .any(|e| is_product_region(e.class()));

        println!(
            "  {} {:<8} brand={:<8} {} selectable{}",
            "✓".green(),
            key.as_str(),
            template.placeholder_brand(),
            selectable.len(),
            if has_product_region { ", product grid" } else { "" }
        );

        if args.verbose {
            for entry in &selectable {
                println!("      {}", entry.identified.id.as_str().dimmed());
            }
        }
    }

    Ok(())
}
