use std::collections::HashMap;

use crate::fmt::date_cell;
use crate::matcher::{IncentiveMatches, EFT_BRANCH};
use crate::models::{KeywordSets, ReportLine, StatementRow, Totals};

pub const NPSB_BRANCH: &str = "100";
pub const NPSB_MARKER: &str = "NPSB";
pub const EFT_DESCRIPTION: &str = "EFT Credited by Other Bank";

fn contains_any(description_upper: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| description_upper.contains(&k.to_uppercase()))
}

pub struct Classification {
    pub lines: Vec<ReportLine>,
    pub totals: Totals,
}

/// Displayed description for a reportable row, or `None` when the row's
/// branch rules reject it.
fn reportable_description(
    row: &StatementRow,
    incentive: f64,
    keywords: &KeywordSets,
) -> Option<String> {
    let upper = row.description_upper.as_str();
    match row.branch.as_str() {
        EFT_BRANCH if contains_any(upper, &keywords.principal) => {
            Some(EFT_DESCRIPTION.to_string())
        }
        NPSB_BRANCH => {
            if upper.contains(NPSB_MARKER) {
                (incentive > 0.0).then(|| row.description.clone())
            } else if contains_any(upper, &keywords.principal) {
                Some(row.description.clone())
            } else {
                None
            }
        }
        _ => None,
    }
}

pub fn classify(
    rows: &[StatementRow],
    matches: &IncentiveMatches,
    keywords: &KeywordSets,
) -> Classification {
    let credit_by_index: HashMap<usize, f64> = rows.iter().map(|r| (r.index, r.credit)).collect();

    let mut lines = Vec::new();
    let mut totals = Totals::default();

    for row in rows {
        if matches.is_incentive(row.index) {
            continue;
        }
        if contains_any(&row.description_upper, &keywords.exclusion) {
            continue;
        }

        let incentive = matches
            .incentive_for(row.index)
            .and_then(|i| credit_by_index.get(&i).copied())
            .unwrap_or(0.0);

        let Some(description) = reportable_description(row, incentive, keywords) else {
            continue;
        };

        let line = ReportLine {
            index: row.index,
            date: date_cell(&row.date),
            description,
            principal: row.credit,
            incentive,
        };
        totals.add(&line);
        lines.push(line);
    }

    tracing::debug!(lines = lines.len(), "classified principal rows");
    Classification { lines, totals }
}
