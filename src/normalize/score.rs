// src/normalize/score.rs

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::Score;

static GOAL_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)[^0-9]+([0-9]+)").expect("goal pair regex"));

/// Pull the first `<digits><sep><digits>` pair out of a score cell.
///
/// Anything that does not yield two numbers (`TBC`, `P-P`, empty text, or a
/// goal count too large for `u32`) gives [`Score::EMPTY`].
pub fn parse_score(text: &str) -> Score {
    let Some(caps) = GOAL_PAIR.captures(text) else {
        return Score::EMPTY;
    };
    match (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
        (Ok(home), Ok(away)) => Score::new(home, away),
        _ => Score::EMPTY,
    }
}
