use clap::Parser;
use std::path::PathBuf;
use storefront_server::{serve, StorefrontConfig};

/// Public page server for storefronts
#[derive(Parser, Debug)]
#[command(name = "storefront-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to storefront.config.json in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Record store directory (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cwd = std::env::current_dir()?;

    let mut config = match &args.config {
        Some(path) => StorefrontConfig::load_file(path)?,
        None => StorefrontConfig::load(&cwd)?,
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    serve(config.resolve_paths(&cwd)).await
}
