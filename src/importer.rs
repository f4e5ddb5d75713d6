use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{RemitError, Result};
use crate::models::{Cell, StatementHeader, StatementRow};

// Frame coordinates. Row 0 of the frame is the sheet row directly below the
// column-header row.
const DATE_COL: usize = 0;
const BRANCH_COL: usize = 1;
const DESCRIPTION_COL: usize = 2;
const CREDIT_COL: usize = 5;

const CUSTOMER_NAME_AT: (usize, usize) = (6, 0);
const ACCOUNT_NO_AT: (usize, usize) = (6, 1);
const PERIOD_AT: (usize, usize) = (7, 1);
const BRANCH_AT: (usize, usize) = (1, 0);

static EMPTY: Cell = Cell::Empty;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lenient amount parse: separators and non-breaking spaces are stripped,
/// anything that still fails to parse counts as zero.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.replace(&[',', '\u{a0}'][..], "");
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Coerce any cell to an amount. Never fails; blanks and junk are `0.0`.
pub fn clean_number(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) if n.is_finite() => *n,
        Cell::Text(s) => parse_amount(s),
        _ => 0.0,
    }
}

/// Three-digit branch code, or an empty string when the cell is not a
/// non-negative number.
pub fn parse_branch_code(cell: &Cell) -> String {
    let value = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => return String::new(),
        },
        _ => return String::new(),
    };
    if !value.is_finite() || value <= -1.0 {
        return String::new();
    }
    format!("{:03}", value.trunc() as u64)
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%y",
    "%B %d, %Y",
    "%b %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];

pub fn parse_date_text(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// Text that coerces to a missing date instead of failing.
const MISSING_DATE_MARKERS: &[&str] = &["", "NaT", "nat", "NAT", "nan", "NaN", "NAN"];

/// Whether the cell coerces to a date without error. A blank cell coerces to
/// a missing date, which still counts.
pub fn is_parseable_date(cell: &Cell) -> bool {
    match cell {
        Cell::Empty | Cell::Date(_) | Cell::Number(_) => true,
        Cell::Text(s) => MISSING_DATE_MARKERS.contains(&s.as_str()) || parse_date_text(s).is_some(),
        Cell::Bool(_) => false,
    }
}

pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    // 2958465 is 9999-12-31, the last date Excel can represent
    if !serial.is_finite() || serial.abs() > 2_958_465.0 {
        return None;
    }
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    base.checked_add_signed(chrono::Duration::days(days))?
        .checked_add_signed(chrono::Duration::seconds(seconds))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(Cell::Date)
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_date_text(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

/// Dense grid addressed from A1, so blank leading rows and columns keep
/// their offsets.
pub(crate) fn range_to_grid(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };
    (0..=end_row)
        .map(|r| {
            (0..=end_col)
                .map(|c| range.get_value((r, c)).map(to_cell).unwrap_or_default())
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Statement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Statement {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Statement {
    /// Build from a full sheet grid; the first row is the column-header row
    /// and is dropped.
    pub fn from_sheet(grid: Vec<Vec<Cell>>) -> Self {
        Self::from_rows(grid.into_iter().skip(1).collect())
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    fn header_cell(&self, (row, col): (usize, usize), what: &str) -> Result<&Cell> {
        if row >= self.rows.len() || col >= self.width {
            return Err(RemitError::Shape(format!(
                "{what} expected at row {row}, column {col} but the sheet has {} rows and {} columns",
                self.rows.len(),
                self.width
            )));
        }
        Ok(self.cell(row, col))
    }

    pub fn header(&self) -> Result<StatementHeader> {
        let name = self.header_cell(CUSTOMER_NAME_AT, "Customer name")?;
        if name.is_blank() {
            return Err(RemitError::Shape("customer name cell is empty".to_string()));
        }
        Ok(StatementHeader {
            customer_name: name.display().trim().to_string(),
            account_no: self.header_cell(ACCOUNT_NO_AT, "Account number")?.display(),
            period: self.header_cell(PERIOD_AT, "Statement period")?.display(),
            branch: self.header_cell(BRANCH_AT, "Branch")?.display(),
        })
    }
}

pub fn read_statement(path: &Path) -> Result<Statement> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RemitError::Shape(format!("{} contains no sheets", path.display())))??;
    let statement = Statement::from_sheet(range_to_grid(&range));
    tracing::debug!(rows = statement.len(), file = %path.display(), "read statement");
    Ok(statement)
}

/// Rows with a positive credit and either a numeric branch code or a
/// parseable date, in sheet order.
pub fn collect_candidates(statement: &Statement) -> Vec<StatementRow> {
    let mut rows = Vec::new();
    for index in 1..statement.len() {
        let credit = clean_number(statement.cell(index, CREDIT_COL));
        if credit <= 0.0 {
            continue;
        }

        let date = statement.cell(index, DATE_COL);
        let branch = parse_branch_code(statement.cell(index, BRANCH_COL));
        let has_branch = !branch.is_empty() && branch.chars().all(|c| c.is_ascii_digit());
        if !has_branch && !is_parseable_date(date) {
            continue;
        }

        let description = statement.cell(index, DESCRIPTION_COL).display();
        rows.push(StatementRow {
            index,
            date: date.clone(),
            branch,
            description_upper: description.to_uppercase(),
            description,
            credit,
        });
    }
    rows
}
