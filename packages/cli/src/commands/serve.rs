use crate::config::load_config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Record store directory (overrides config)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Replay hidden, deleted and moved element states
    #[arg(long)]
    pub replay: bool,
}

pub fn serve(args: ServeArgs, config: Option<&Path>, cwd: &Path) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = load_config(config, cwd)?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = cwd.join(data_dir);
    }
    if args.replay {
        config.replay_element_states = true;
    }

    println!(
        "🛍️  {} storefront server on http://{}",
        "Starting".green().bold(),
        config.bind
    );
    println!("   Data: {}", config.data_dir.display());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(storefront_server::serve(config))
}
