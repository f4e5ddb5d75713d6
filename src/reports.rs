use crate::classifier::classify;
use crate::error::Result;
use crate::importer::{collect_candidates, Statement};
use crate::matcher::match_incentives;
use crate::models::{KeywordSets, ReportLine, StatementHeader, Totals};
use crate::words::to_words;

pub struct CertificateReport {
    pub header: StatementHeader,
    pub lines: Vec<ReportLine>,
    pub totals: Totals,
    pub words: String,
}

impl CertificateReport {
    /// `Remittance_Certificate_<customer>.docx` with spaces in the customer
    /// name replaced by underscores.
    pub fn file_name(&self) -> String {
        format!(
            "Remittance_Certificate_{}.docx",
            self.header.customer_name.replace(' ', "_")
        )
    }
}

/// Header, matching, classification and amount-in-words for one statement.
/// Performs no I/O.
pub fn generate_certificate(
    statement: &Statement,
    keywords: &KeywordSets,
) -> Result<CertificateReport> {
    let header = statement.header()?;
    let candidates = collect_candidates(statement);
    tracing::debug!(candidates = candidates.len(), "collected credit rows");

    let matches = match_incentives(&candidates);
    let classification = classify(&candidates, &matches, keywords);
    let words = to_words(classification.totals.grand_total());

    Ok(CertificateReport {
        header,
        lines: classification.lines,
        totals: classification.totals,
        words,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    fn blank_row() -> Vec<Cell> {
        vec![Cell::Empty; 6]
    }

    fn data_row(branch: f64, desc: &str, credit: f64) -> Vec<Cell> {
        vec![
            Cell::text("2025-02-10"),
            Cell::Number(branch),
            Cell::text(desc),
            Cell::Empty,
            Cell::Empty,
            Cell::Number(credit),
        ]
    }

    /// Eight header-area rows followed by the given data rows.
    fn statement_with(rows: Vec<Vec<Cell>>) -> Statement {
        let mut grid = vec![blank_row(); 8];
        grid[1][0] = Cell::text("Motijheel Branch");
        grid[6][0] = Cell::text("Karim Ahmed");
        grid[6][1] = Cell::text("0123456789");
        grid[7][1] = Cell::text("January 2025");
        grid.extend(rows);
        Statement::from_rows(grid)
    }

    fn keywords() -> KeywordSets {
        KeywordSets {
            principal: vec!["REMIT".to_string()],
            incentive: vec!["INCENTIVE".to_string()],
            exclusion: vec!["RETURN".to_string()],
        }
    }

    #[test]
    fn test_two_row_eft_statement() {
        let statement = statement_with(vec![
            data_row(747.0, "Foreign Remit via EFT", 1000.0),
            data_row(747.0, "EFT credit", 25.0),
        ]);
        let report = generate_certificate(&statement, &keywords()).unwrap();
        assert_eq!(report.lines.len(), 1);
        let line = &report.lines[0];
        assert_eq!(line.description, "EFT Credited by Other Bank");
        assert_eq!(format!("{:.2}", line.principal), "1000.00");
        assert_eq!(format!("{:.2}", line.incentive), "25.00");
        assert_eq!(format!("{:.2}", line.total()), "1025.00");
        assert_eq!(report.words, "Taka One Thousand Twenty Five Only");
        assert_eq!(report.header.customer_name, "Karim Ahmed");
    }

    #[test]
    fn test_undated_incentive_pairs_with_npsb_principal() {
        let statement = statement_with(vec![
            vec![
                Cell::text("2025-01-01"),
                Cell::Number(100.0),
                Cell::text("NPSB inward"),
                Cell::Empty,
                Cell::Empty,
                Cell::Number(1000.0),
            ],
            vec![
                Cell::Empty,
                Cell::Empty,
                Cell::text("Incentive"),
                Cell::Empty,
                Cell::Empty,
                Cell::Number(25.0),
            ],
        ]);
        let report = generate_certificate(&statement, &keywords()).unwrap();
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].description, "NPSB inward");
        assert_eq!(report.lines[0].incentive, 25.0);
        assert_eq!(report.words, "Taka One Thousand Twenty Five Only");
    }

    #[test]
    fn test_empty_report_reads_zero() {
        let statement = statement_with(vec![data_row(205.0, "Salary", 5000.0)]);
        let report = generate_certificate(&statement, &keywords()).unwrap();
        assert!(report.lines.is_empty());
        assert_eq!(report.totals, Totals::default());
        assert_eq!(report.words, "Taka Zero Only");
    }

    #[test]
    fn test_file_name_replaces_spaces() {
        let statement = statement_with(vec![]);
        let report = generate_certificate(&statement, &keywords()).unwrap();
        assert_eq!(report.file_name(), "Remittance_Certificate_Karim_Ahmed.docx");
    }

    #[test]
    fn test_short_sheet_is_error() {
        let statement = Statement::from_rows(vec![blank_row(); 3]);
        assert!(generate_certificate(&statement, &keywords()).is_err());
    }
}
