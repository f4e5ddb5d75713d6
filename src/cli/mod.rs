pub mod config;
pub mod generate;
pub mod preview;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "remitcert",
    version,
    about = "Generate remittance certificates from bank-statement spreadsheets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match remittances in a statement and write the certificate document.
    Generate {
        /// Path to the statement workbook (.xlsx or .xls)
        statement: String,
        /// Keyword workbook with Principal, Incentive and Exclusion sheets
        #[arg(long)]
        keywords: Option<String>,
        /// Certificate template (.docx)
        #[arg(long)]
        template: Option<String>,
        /// Directory the certificate is written to
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },
    /// Show the matched remittance table without writing a document.
    Preview {
        /// Path to the statement workbook (.xlsx or .xls)
        statement: String,
        /// Keyword workbook with Principal, Incentive and Exclusion sheets
        #[arg(long)]
        keywords: Option<String>,
    },
    /// View or change the default file locations.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Store new default paths.
    Set {
        /// Keyword workbook path
        #[arg(long)]
        keywords: Option<String>,
        /// Template path
        #[arg(long)]
        template: Option<String>,
        /// Output directory
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },
}
