mod commands;
mod config;
mod errors;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    ids, init, render, serve, templates, IdsArgs, InitArgs, RenderArgs, ServeArgs, TemplatesArgs,
};
use std::path::PathBuf;

/// Storefront CLI - render, inspect and serve customizable store pages
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to storefront.config.json in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default storefront.config.json
    Init(InitArgs),

    /// Render a store's public page to HTML
    Render(RenderArgs),

    /// Print element ids as the editor and the renderer assign them
    Ids(IdsArgs),

    /// List the template catalog
    Templates(TemplatesArgs),

    /// Run the public page server
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Render(args) => render(args, cli.config.as_deref(), &cwd),
            Command::Ids(args) => ids(args, cli.config.as_deref(), &cwd),
            Command::Templates(args) => templates(args, cli.config.as_deref(), &cwd),
            Command::Serve(args) => serve(args, cli.config.as_deref(), &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
