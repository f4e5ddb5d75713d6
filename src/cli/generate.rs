use std::path::PathBuf;

use colored::Colorize;

use crate::document::write_certificate;
use crate::error::Result;
use crate::fmt::amount;
use crate::importer::read_statement;
use crate::keywords::load_keywords;
use crate::reports::generate_certificate;
use crate::settings::{load_settings, shellexpand_path};

pub fn run(
    statement: &str,
    keywords: Option<String>,
    template: Option<String>,
    output_dir: Option<String>,
) -> Result<()> {
    let settings = load_settings().with_overrides(keywords, template, output_dir);
    let statement_path = PathBuf::from(shellexpand_path(statement));

    let statement = read_statement(&statement_path)?;
    let keywords = load_keywords(&settings.keyword_path())?;
    let report = generate_certificate(&statement, &keywords)?;

    let today = chrono::Local::now().date_naive();
    let path = write_certificate(
        &report,
        &settings.template_path(),
        &settings.output_path(),
        today,
    )?;

    println!("{} {}", "Certificate saved to".green().bold(), path.display());
    println!(
        "{} remittance line(s), total {}",
        report.lines.len(),
        amount(report.totals.grand_total())
    );
    Ok(())
}
