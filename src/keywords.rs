use std::io::{Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, Reader, Sheets};

use crate::error::{RemitError, Result};
use crate::importer::range_to_grid;
use crate::models::{Cell, KeywordSets};

pub const PRINCIPAL_SHEET: &str = "Principal";
pub const INCENTIVE_SHEET: &str = "Incentive";
pub const EXCLUSION_SHEET: &str = "Exclusion";

/// First-column values below the sheet's header row, empty cells dropped.
/// Text is kept as written, surrounding spaces included.
pub fn keywords_from_grid(grid: &[Vec<Cell>]) -> Vec<String> {
    grid.iter()
        .skip(1)
        .filter_map(|row| row.first())
        .map(Cell::display)
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet: &str,
    path: &Path,
) -> Result<Vec<String>> {
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(RemitError::MissingSheet {
            sheet: sheet.to_string(),
            file: path.display().to_string(),
        });
    }
    let range = workbook.worksheet_range(sheet)?;
    Ok(keywords_from_grid(&range_to_grid(&range)))
}

pub fn load_keywords(path: &Path) -> Result<KeywordSets> {
    let mut workbook = open_workbook_auto(path)?;
    let principal = read_sheet(&mut workbook, PRINCIPAL_SHEET, path)?;
    let incentive = read_sheet(&mut workbook, INCENTIVE_SHEET, path)?;
    let exclusion = read_sheet(&mut workbook, EXCLUSION_SHEET, path)?;

    tracing::debug!(
        principal = principal.len(),
        incentive = incentive.len(),
        exclusion = exclusion.len(),
        "loaded keyword lists"
    );

    Ok(KeywordSets {
        principal: principal.iter().map(|k| k.to_uppercase()).collect(),
        incentive,
        exclusion: exclusion.iter().map(|k| k.to_uppercase()).collect(),
    })
}
