// src/normalize/types.rs

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One row of widget cells, already trimmed. Rows may be ragged.
pub type RawRow = Vec<String>;

/// The cell matrix pulled out of a rendered widget region.
pub type RawMatrix = Vec<RawRow>;

/// Which widget page a matrix came from. Decides the classifier rule,
/// the column contract and the output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Fixtures,
    Results,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Fixtures => f.write_str("fixtures"),
            Mode::Results => f.write_str("results"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixtures" => Ok(Mode::Fixtures),
            "results" => Ok(Mode::Results),
            other => Err(anyhow::anyhow!("unknown mode {other:?} (expected fixtures|results)")),
        }
    }
}

/// Goal pair pulled from a score cell. Both sides or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

impl Score {
    pub const EMPTY: Score = Score {
        home: None,
        away: None,
    };

    pub fn new(home: u32, away: u32) -> Self {
        Self {
            home: Some(home),
            away: Some(away),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.home.is_none() && self.away.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureRecord {
    pub date: String,
    pub match_type: String,
    pub home: String,
    pub away: String,
    pub venue: String,
    pub ko: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub date: String,
    pub match_type: String,
    pub home: String,
    pub away: String,
    #[serde(serialize_with = "score_or_empty")]
    pub home_score: Option<u32>,
    #[serde(serialize_with = "score_or_empty")]
    pub away_score: Option<u32>,
    pub venue: String,
    pub ko: String,
}

/// A normalized row. Serializes as the bare inner record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Fixture(FixtureRecord),
    Result(ResultRecord),
}

impl Record {
    pub fn date(&self) -> &str {
        match self {
            Record::Fixture(f) => &f.date,
            Record::Result(r) => &r.date,
        }
    }

    pub fn as_fixture(&self) -> Option<&FixtureRecord> {
        match self {
            Record::Fixture(f) => Some(f),
            Record::Result(_) => None,
        }
    }

    pub fn as_result(&self) -> Option<&ResultRecord> {
        match self {
            Record::Result(r) => Some(r),
            Record::Fixture(_) => None,
        }
    }
}

/// Scores are numbers when present and `""` when absent.
fn score_or_empty<S: Serializer>(value: &Option<u32>, ser: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(n) => ser.serialize_u32(*n),
        None => ser.serialize_str(""),
    }
}
