use std::collections::HashSet;

use crate::models::{IncentiveMatch, StatementRow};

pub const TOLERANCE: f64 = 0.1;
pub const INCENTIVE_RATES: [f64; 2] = [0.025, 0.02];

/// Branch whose principals may only pair with incentives from the same branch.
pub const EFT_BRANCH: &str = "747";

/// True when `actual` is within `tolerance` of `expected` or of its rounded,
/// floored or ceiled value.
pub fn is_incentive_match(actual: f64, expected: f64, tolerance: f64) -> bool {
    [
        expected,
        expected.round_ties_even(),
        expected.floor(),
        expected.ceil(),
    ]
    .iter()
    .any(|target| (actual - target).abs() <= tolerance)
}

#[derive(Debug, Clone, Default)]
pub struct IncentiveMatches {
    pub pairs: Vec<IncentiveMatch>,
    pub incentive_indices: HashSet<usize>,
}

impl IncentiveMatches {
    pub fn incentive_for(&self, principal_index: usize) -> Option<usize> {
        self.pairs
            .iter()
            .find(|m| m.principal_index == principal_index)
            .map(|m| m.incentive_index)
    }

    pub fn is_incentive(&self, index: usize) -> bool {
        self.incentive_indices.contains(&index)
    }
}

/// Greedy first-match pairing in candidate order. Each row can be consumed
/// as an incentive once, and a consumed row never acts as a principal.
pub fn match_incentives(rows: &[StatementRow]) -> IncentiveMatches {
    let mut used: HashSet<usize> = HashSet::new();
    let mut result = IncentiveMatches::default();

    for (i, row) in rows.iter().enumerate() {
        let expected = INCENTIVE_RATES.map(|rate| row.credit * rate);
        for (j, other) in rows.iter().enumerate() {
            if i == j || used.contains(&other.index) || used.contains(&row.index) {
                continue;
            }
            if row.branch == EFT_BRANCH && other.branch != EFT_BRANCH {
                continue;
            }
            if expected
                .iter()
                .any(|e| is_incentive_match(other.credit, *e, TOLERANCE))
            {
                result.pairs.push(IncentiveMatch {
                    principal_index: row.index,
                    incentive_index: other.index,
                });
                used.insert(other.index);
                result.incentive_indices.insert(other.index);
                break;
            }
        }
    }

    tracing::debug!(pairs = result.pairs.len(), "matched incentives");
    result
}
