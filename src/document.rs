use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use docx_rs::{
    AlignmentType, BorderType, BreakType, DocumentChild, Docx, Paragraph, ParagraphChild, Run,
    RunChild, Table, TableBorder, TableBorderPosition, TableBorders, TableCell, TableRow,
    WidthType,
};

use crate::error::{RemitError, Result};
use crate::fmt::{amount, long_date};
use crate::models::StatementHeader;
use crate::reports::CertificateReport;

pub const TABLE_LOCATOR: &str = "Table-A:  Remittance Details:";
const REF_MARKER: &str = "Ref:";

const HEADERS: [&str; 6] = [
    "Sl.",
    "Credit Date",
    "Reference/Description",
    "Principal Amount (BDT)",
    "Incentive Amount (BDT)",
    "Total Amount (BDT)",
];

// Twentieths of a point: 0.3", 1.4", 2.4", 1.2", 1.2", 1.4"
const COLUMN_WIDTHS: [usize; 6] = [432, 2016, 3456, 1728, 1728, 2016];

// ---------------------------------------------------------------------------
// Paragraph text
// ---------------------------------------------------------------------------

pub fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut buffer = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(text) => buffer.push_str(&text.text),
                    RunChild::Tab(_) => buffer.push('\t'),
                    RunChild::Break(_) => buffer.push('\n'),
                    _ => {}
                }
            }
        }
    }
    buffer
}

/// Replace the paragraph's content with a single run carrying `text`, styled
/// like the paragraph's first run.
fn set_paragraph_text(paragraph: &mut Paragraph, text: &str) {
    let run_property = paragraph
        .children
        .iter()
        .find_map(|child| match child {
            ParagraphChild::Run(run) => Some(run.run_property.clone()),
            _ => None,
        })
        .unwrap_or_default();

    let mut run = Run::new();
    run.run_property = run_property;
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        for (j, piece) in line.split('\t').enumerate() {
            if j > 0 {
                run = run.add_tab();
            }
            if !piece.is_empty() {
                run = run.add_text(piece);
            }
        }
    }

    paragraph.children.clear();
    paragraph.children.push(ParagraphChild::Run(Box::new(run)));
}

/// Apply the header substitutions in order, each against the text produced
/// by the previous one.
fn substitute(text: &str, header: &StatementHeader) -> String {
    let mut text = text.to_string();
    if text.contains("Mr.") {
        text = text.replace("Mr.", &format!("Mr./Ms. {}", header.customer_name));
    }
    if text.contains("A/C No-") {
        text = text.replace("A/C No-", &format!(" {}", header.account_no));
    }
    if text.contains("period") {
        text = text.replace("period", &format!(" {}", header.period));
    }
    if text.contains("PLC,") {
        text = text.replace("PLC,", &format!("PLC, {}", header.branch));
    }
    text
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

fn text_cell(text: &str, width: usize, bold: bool) -> TableCell {
    let mut run = Run::new().add_text(text);
    if bold {
        run = run.bold();
    }
    TableCell::new()
        .add_paragraph(Paragraph::new().add_run(run))
        .width(width, WidthType::Dxa)
}

fn table_row(values: &[String; 6], bold: bool) -> TableRow {
    TableRow::new(
        values
            .iter()
            .zip(COLUMN_WIDTHS)
            .map(|(value, width)| text_cell(value, width, bold))
            .collect(),
    )
}

fn grid_borders() -> TableBorders {
    [
        TableBorderPosition::Top,
        TableBorderPosition::Left,
        TableBorderPosition::Bottom,
        TableBorderPosition::Right,
        TableBorderPosition::InsideH,
        TableBorderPosition::InsideV,
    ]
    .into_iter()
    .fold(TableBorders::new(), |borders, position| {
        borders.set(
            TableBorder::new(position)
                .border_type(BorderType::Single)
                .size(8)
                .color("000000"),
        )
    })
}

pub fn build_table(report: &CertificateReport) -> Table {
    let mut rows = vec![table_row(&HEADERS.map(String::from), true)];

    for (sl, line) in report.lines.iter().enumerate() {
        rows.push(table_row(
            &[
                (sl + 1).to_string(),
                line.date.clone(),
                line.description.clone(),
                amount(line.principal),
                amount(line.incentive),
                amount(line.total()),
            ],
            false,
        ));
    }

    rows.push(table_row(
        &[
            String::new(),
            String::new(),
            "Total".to_string(),
            amount(report.totals.principal),
            amount(report.totals.incentive),
            amount(report.totals.grand_total()),
        ],
        true,
    ));

    let words = Paragraph::new()
        .add_run(Run::new().add_text(format!("In Words: {}", report.words)).bold())
        .align(AlignmentType::Center);
    rows.push(TableRow::new(vec![TableCell::new()
        .add_paragraph(words)
        .grid_span(COLUMN_WIDTHS.len())
        .width(COLUMN_WIDTHS.iter().sum(), WidthType::Dxa)]));

    Table::new(rows)
        .set_grid(COLUMN_WIDTHS.to_vec())
        .set_borders(grid_borders())
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// Fill the template: header substitutions, a date line after the `Ref:`
/// paragraph, and the remittance table after the locator paragraph (or at the
/// end of the body when the template has none).
pub fn render_certificate(template: Docx, report: &CertificateReport, today: NaiveDate) -> Docx {
    let mut docx = template;
    let children = std::mem::take(&mut docx.document.children);
    let mut body = Vec::with_capacity(children.len() + 2);
    let mut table = Some(build_table(report));

    for child in children {
        let mut paragraph = match child {
            DocumentChild::Paragraph(paragraph) => paragraph,
            other => {
                body.push(other);
                continue;
            }
        };

        let original = paragraph_text(&paragraph);
        let text = substitute(&original, &report.header);
        if text != original {
            set_paragraph_text(&mut paragraph, &text);
        }

        body.push(DocumentChild::Paragraph(paragraph));
        if text.contains(TABLE_LOCATOR) {
            if let Some(table) = table.take() {
                body.push(DocumentChild::Table(Box::new(table)));
            }
        }
        if text.contains(REF_MARKER) {
            let date_line = Paragraph::new().add_run(Run::new().add_text(long_date(today)));
            body.push(DocumentChild::Paragraph(Box::new(date_line)));
        }
    }

    if let Some(table) = table {
        tracing::warn!(locator = TABLE_LOCATOR, "template has no table locator; appending table");
        body.push(DocumentChild::Table(Box::new(table)));
    }

    docx.document.children = body;
    docx
}

/// Render into memory first so a failure leaves nothing on disk, then save
/// under `output_dir`.
pub fn write_certificate(
    report: &CertificateReport,
    template_path: &Path,
    output_dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf> {
    let bytes = std::fs::read(template_path).map_err(|e| {
        RemitError::Docx(format!(
            "Failed to read template {}: {e}",
            template_path.display()
        ))
    })?;
    let template = docx_rs::read_docx(&bytes).map_err(|e| {
        RemitError::Docx(format!(
            "Failed to parse template {}: {e}",
            template_path.display()
        ))
    })?;

    let mut buf = Cursor::new(Vec::new());
    render_certificate(template, report, today)
        .build()
        .pack(&mut buf)
        .map_err(|e| RemitError::Docx(e.to_string()))?;

    std::fs::create_dir_all(output_dir)?;
    let out_path = output_dir.join(report.file_name());
    std::fs::write(&out_path, buf.into_inner())?;
    tracing::info!(path = %out_path.display(), lines = report.lines.len(), "certificate saved");
    Ok(out_path)
}
