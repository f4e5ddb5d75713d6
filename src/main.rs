mod classifier;
mod cli;
mod document;
mod error;
mod fmt;
mod importer;
mod keywords;
mod matcher;
mod models;
mod reports;
mod settings;
mod words;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            statement,
            keywords,
            template,
            output_dir,
        } => cli::generate::run(&statement, keywords, template, output_dir),
        Commands::Preview {
            statement,
            keywords,
        } => cli::preview::run(&statement, keywords),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Set {
                keywords,
                template,
                output_dir,
            } => cli::config::set(keywords, template, output_dir),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
