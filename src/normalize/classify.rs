// src/normalize/classify.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument, trace};

use super::types::{Mode, RawRow};

static DATE_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{2,4}").expect("date-like regex")
});

static VERSUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bvs?\b").expect("versus regex"));

/// True when some cell looks like a date, or (fixtures only) holds a `v`/`vs` token.
pub fn is_candidate(row: &[String], mode: Mode) -> bool {
    row.iter().any(|cell| {
        DATE_LIKE.is_match(cell) || (mode == Mode::Fixtures && VERSUS.is_match(cell))
    })
}

/// Keep the rows that plausibly hold fixture/result data, in input order.
/// Headers, separators and empty rows are dropped without error.
#[instrument(level = "debug", skip(matrix), fields(rows = matrix.len()))]
pub fn classify(matrix: &[RawRow], mode: Mode) -> Vec<&RawRow> {
    let kept: Vec<&RawRow> = matrix
        .iter()
        .enumerate()
        .filter(|(idx, row)| {
            let keep = is_candidate(row, mode);
            if !keep {
                trace!(row = idx, cells = ?row, "noise row dropped");
            }
            keep
        })
        .map(|(_, row)| row)
        .collect();
    debug!(candidates = kept.len(), "classified rows");
    kept
}
