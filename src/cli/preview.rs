use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::error::Result;
use crate::fmt::amount;
use crate::importer::read_statement;
use crate::keywords::load_keywords;
use crate::reports::generate_certificate;
use crate::settings::{load_settings, shellexpand_path};

pub fn run(statement: &str, keywords: Option<String>) -> Result<()> {
    let settings = load_settings().with_overrides(keywords, None, None);
    let statement = read_statement(&PathBuf::from(shellexpand_path(statement)))?;
    let keywords = load_keywords(&settings.keyword_path())?;
    let report = generate_certificate(&statement, &keywords)?;

    println!(
        "{} {} (A/C {})",
        "Remittance Details for".bold(),
        report.header.customer_name,
        report.header.account_no
    );
    if !report.header.period.is_empty() {
        println!("Period: {}", report.header.period);
    }
    println!(
        "Keywords: {} principal, {} incentive, {} exclusion",
        keywords.principal.len(),
        keywords.incentive.len(),
        keywords.exclusion.len()
    );

    if report.lines.is_empty() {
        println!("{}", "No remittance credits matched.".yellow());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Sl.",
        "Credit Date",
        "Reference/Description",
        "Principal",
        "Incentive",
        "Total",
    ]);
    for (sl, line) in report.lines.iter().enumerate() {
        table.add_row(vec![
            Cell::new(sl + 1),
            Cell::new(&line.date),
            Cell::new(&line.description),
            Cell::new(amount(line.principal)).set_alignment(CellAlignment::Right),
            Cell::new(amount(line.incentive)).set_alignment(CellAlignment::Right),
            Cell::new(amount(line.total())).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new(""),
        Cell::new(""),
        Cell::new("Total".bold()),
        Cell::new(amount(report.totals.principal)).set_alignment(CellAlignment::Right),
        Cell::new(amount(report.totals.incentive)).set_alignment(CellAlignment::Right),
        Cell::new(amount(report.totals.grand_total()).as_str().bold()).set_alignment(CellAlignment::Right),
    ]);

    println!("{table}");
    println!("In Words: {}", report.words);
    Ok(())
}
