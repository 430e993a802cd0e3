// src/normalize/mod.rs
//
// Raw widget matrix -> fixture/result records.
//
//   classify (drop noise rows) -> assemble (column contract) -> collect
//
// Every function in here is total: bad rows are dropped, bad dates and scores
// degrade, nothing returns an error.

pub mod assemble;
pub mod classify;
pub mod date;
pub mod header;
pub mod score;
pub mod types;

pub use assemble::{assemble, ColumnContract, DEFAULT_COMPETITION};
pub use classify::classify;
pub use date::normalize_date;
pub use score::parse_score;
pub use types::{FixtureRecord, Mode, RawMatrix, RawRow, Record, ResultRecord, Score};

use tracing::{info, instrument};

/// Row counts from one pipeline run. Diagnostic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub rows: usize,
    pub candidates: usize,
    pub rejected: usize,
    pub records: usize,
}

impl PipelineStats {
    pub fn noise(&self) -> usize {
        self.rows - self.candidates
    }
}

/// Column contracts per mode plus the header-sniffing switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub fixtures: ColumnContract,
    pub results: ColumnContract,
    pub header_sniffing: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            fixtures: ColumnContract::fixtures(),
            results: ColumnContract::results(),
            header_sniffing: false,
        }
    }
}

impl Pipeline {
    fn contract(&self, matrix: &[RawRow], mode: Mode) -> ColumnContract {
        let configured = match mode {
            Mode::Fixtures => &self.fixtures,
            Mode::Results => &self.results,
        };
        if self.header_sniffing {
            if let Some(sniffed) = header::sniff(matrix, mode) {
                return sniffed;
            }
        }
        configured.clone()
    }

    /// Normalize `matrix` into records, in input row order.
    pub fn run(&self, matrix: &[RawRow], mode: Mode) -> Vec<Record> {
        self.run_with_stats(matrix, mode).0
    }

    #[instrument(level = "debug", skip(self, matrix), fields(rows = matrix.len()))]
    pub fn run_with_stats(&self, matrix: &[RawRow], mode: Mode) -> (Vec<Record>, PipelineStats) {
        let columns = self.contract(matrix, mode);
        let candidates = classify(matrix, mode);
        let records: Vec<Record> = candidates
            .iter()
            .filter_map(|row| assemble(row, mode, &columns))
            .collect();

        let stats = PipelineStats {
            rows: matrix.len(),
            candidates: candidates.len(),
            rejected: candidates.len() - records.len(),
            records: records.len(),
        };
        info!(
            %mode,
            rows = stats.rows,
            noise = stats.noise(),
            rejected = stats.rejected,
            records = stats.records,
            "normalized matrix"
        );
        (records, stats)
    }
}

/// [`Pipeline::run`] with the default positional contracts.
pub fn run(matrix: &[RawRow], mode: Mode) -> Vec<Record> {
    Pipeline::default().run(matrix, mode)
}
