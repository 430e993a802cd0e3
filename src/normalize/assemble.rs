// src/normalize/assemble.rs

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::date::normalize_date;
use super::score::parse_score;
use super::types::{FixtureRecord, Mode, Record, ResultRecord};

/// Competition used when the widget leaves the column blank.
pub const DEFAULT_COMPETITION: &str = "League";

/// Positional mapping from widget cells to record fields.
///
/// This is an assumption about the widget's column order, not something the
/// matrix proves. It lives in config so a layout change is a config edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnContract {
    pub date: usize,
    pub competition: usize,
    pub home: usize,
    pub away: usize,
    pub kickoff: usize,
    pub venue: usize,
    /// Results only.
    #[serde(default)]
    pub score: Option<usize>,
}

impl ColumnContract {
    /// Position that never holds a cell; the field reads as empty.
    pub const ABSENT: usize = usize::MAX;

    /// Date, Competition, Home, Away, KO, Venue.
    pub fn fixtures() -> Self {
        Self {
            date: 0,
            competition: 1,
            home: 2,
            away: 3,
            kickoff: 4,
            venue: 5,
            score: None,
        }
    }

    /// Date, Competition, Home, Score, Away, Venue, KO.
    pub fn results() -> Self {
        Self {
            date: 0,
            competition: 1,
            home: 2,
            score: Some(3),
            away: 4,
            venue: 5,
            kickoff: 6,
        }
    }
}

/// Cell at `idx`, trimmed; missing trailing cells read as empty.
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|c| c.trim()).unwrap_or("")
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Map one candidate row to a record. `None` when date, home or away is empty.
pub fn assemble(row: &[String], mode: Mode, columns: &ColumnContract) -> Option<Record> {
    let date = cell(row, columns.date);
    let home = cell(row, columns.home);
    let away = cell(row, columns.away);
    if date.is_empty() || home.is_empty() || away.is_empty() {
        trace!(cells = ?row, "row rejected: missing date, home or away");
        return None;
    }

    let competition = match cell(row, columns.competition) {
        "" => DEFAULT_COMPETITION,
        comp => comp,
    };
    let date = normalize_date(date);
    let venue = cell(row, columns.venue).to_owned();
    let ko = strip_whitespace(cell(row, columns.kickoff));

    let record = match mode {
        Mode::Fixtures => Record::Fixture(FixtureRecord {
            date,
            match_type: competition.to_owned(),
            home: home.to_owned(),
            away: away.to_owned(),
            venue,
            ko,
        }),
        Mode::Results => {
            let score = columns
                .score
                .map(|idx| parse_score(cell(row, idx)))
                .unwrap_or_default();
            Record::Result(ResultRecord {
                date,
                match_type: competition.to_owned(),
                home: home.to_owned(),
                away: away.to_owned(),
                home_score: score.home,
                away_score: score.away,
                venue,
                ko,
            })
        }
    };
    Some(record)
}
