use chrono::NaiveDateTime;

/// A single spreadsheet value, detached from the workbook reader.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDateTime),
}

impl Cell {
    #[cfg(test)]
    pub fn text(s: &str) -> Self {
        Cell::Text(s.to_string())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text form used for header substitutions and descriptions.
    /// Whole numbers print without a trailing `.0`.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            Cell::Date(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Customer metadata read from fixed offsets of the statement sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementHeader {
    pub customer_name: String,
    pub account_no: String,
    pub period: String,
    pub branch: String,
}

/// A credit row that survived initial validity filtering.
#[derive(Debug, Clone)]
pub struct StatementRow {
    pub index: usize,
    pub date: Cell,
    pub branch: String,
    pub description: String,
    pub description_upper: String,
    pub credit: f64,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordSets {
    /// Upper-cased.
    pub principal: Vec<String>,
    /// Loaded for completeness; the matcher works on amounts alone.
    pub incentive: Vec<String>,
    /// Upper-cased.
    pub exclusion: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncentiveMatch {
    pub principal_index: usize,
    pub incentive_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub index: usize,
    pub date: String,
    pub description: String,
    pub principal: f64,
    pub incentive: f64,
}

impl ReportLine {
    pub fn total(&self) -> f64 {
        self.principal + self.incentive
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub principal: f64,
    pub incentive: f64,
}

impl Totals {
    pub fn add(&mut self, line: &ReportLine) {
        self.principal += line.principal;
        self.incentive += line.incentive;
    }

    pub fn grand_total(&self) -> f64 {
        self.principal + self.incentive
    }
}
