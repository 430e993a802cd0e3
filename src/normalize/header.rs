// src/normalize/header.rs
//
// Opt-in header sniffing: when the widget renders a header row, map column
// names to fields instead of trusting the positional contract.

use tracing::debug;

use super::assemble::ColumnContract;
use super::types::{Mode, RawRow};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    Competition,
    Home,
    Away,
    Kickoff,
    Venue,
    Score,
}

fn field_for(label: &str) -> Option<Field> {
    let label = label.trim().to_ascii_lowercase();
    let field = match label.as_str() {
        "date" | "day" => Field::Date,
        "comp" | "competition" | "type" | "match type" | "league" => Field::Competition,
        "home" | "home team" => Field::Home,
        "away" | "away team" => Field::Away,
        "ko" | "k/o" | "kick off" | "kick-off" | "kickoff" | "time" => Field::Kickoff,
        "venue" | "ground" | "location" | "pitch" => Field::Venue,
        "score" | "result" | "ft" => Field::Score,
        _ => return None,
    };
    Some(field)
}

/// Build a column contract from a header row. `None` unless the row names
/// date, home and away (and a score column in results mode).
///
/// Optional fields the header does not name read as empty.
pub fn contract_from_header(row: &[String], mode: Mode) -> Option<ColumnContract> {
    let mut contract = ColumnContract {
        date: ColumnContract::ABSENT,
        competition: ColumnContract::ABSENT,
        home: ColumnContract::ABSENT,
        away: ColumnContract::ABSENT,
        kickoff: ColumnContract::ABSENT,
        venue: ColumnContract::ABSENT,
        score: None,
    };
    let (mut date, mut home, mut away, mut score) = (false, false, false, false);

    for (idx, cell) in row.iter().enumerate() {
        match field_for(cell) {
            Some(Field::Date) if !date => {
                contract.date = idx;
                date = true;
            }
            Some(Field::Home) if !home => {
                contract.home = idx;
                home = true;
            }
            Some(Field::Away) if !away => {
                contract.away = idx;
                away = true;
            }
            Some(Field::Score) if !score => {
                contract.score = Some(idx);
                score = true;
            }
            Some(Field::Competition) => contract.competition = idx,
            Some(Field::Kickoff) => contract.kickoff = idx,
            Some(Field::Venue) => contract.venue = idx,
            _ => {}
        }
    }

    let complete = date && home && away && (mode == Mode::Fixtures || score);
    complete.then_some(contract)
}

/// First header row in the matrix that yields a contract.
pub fn sniff(matrix: &[RawRow], mode: Mode) -> Option<ColumnContract> {
    let found = matrix
        .iter()
        .enumerate()
        .find_map(|(idx, row)| contract_from_header(row, mode).map(|c| (idx, c)));
    if let Some((idx, contract)) = &found {
        debug!(row = idx, ?contract, "header row mapped to columns");
    }
    found.map(|(_, c)| c)
}
