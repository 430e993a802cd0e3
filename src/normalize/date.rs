// src/normalize/date.rs

use once_cell::sync::Lazy;
use regex::Regex;

static CANONICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("canonical date regex"));

static THREE_GROUPS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})[^0-9]([0-9]{1,2})[^0-9]([0-9]{2,4})").expect("date groups regex")
});

/// Canonicalise a free-text date cell to `DD/MM/YYYY`.
///
/// - Already-canonical text comes back unchanged.
/// - Otherwise the first `day<sep>month<sep>year` run is reassembled, with day
///   and month zero-padded and a 2-digit year prefixed with `20`.
/// - Text without such a run comes back unchanged.
///
/// Day and month ranges are not checked; `32/13/2024` passes through as is.
pub fn normalize_date(text: &str) -> String {
    if CANONICAL.is_match(text) {
        return text.to_owned();
    }
    let Some(caps) = THREE_GROUPS.captures(text) else {
        return text.to_owned();
    };

    let year = &caps[3];
    let year = if year.len() == 2 {
        format!("20{year}")
    } else {
        year.to_owned()
    };
    format!("{:0>2}/{:0>2}/{}", &caps[1], &caps[2], year)
}
