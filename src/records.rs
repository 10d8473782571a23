//! Session run records
//!
//! The longest finished runs of the current session, best first. This is the
//! only place the session best lives; nothing is saved between sessions.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_RECORDS: usize = 10;

/// A single finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Distance reached (meters)
    pub distance: f32,
    /// Terrain seed of the run, enough to replay its track
    pub seed: u64,
    /// Ticks survived
    pub ticks: u64,
}

/// Best runs, sorted by distance descending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRecords {
    runs: Vec<RunRecord>,
}

impl RunRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a finished run, returning its rank (1-indexed) if it placed
    ///
    /// Runs that went nowhere are not recorded. On equal distance the earlier
    /// run keeps the higher rank.
    pub fn record(&mut self, run: RunRecord) -> Option<usize> {
        if run.distance.is_nan() || run.distance <= 0.0 {
            return None;
        }
        let slot = self.runs.partition_point(|r| r.distance >= run.distance);
        if slot >= MAX_RECORDS {
            return None;
        }
        self.runs.insert(slot, run);
        self.runs.truncate(MAX_RECORDS);
        Some(slot + 1)
    }

    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.runs.first()
    }

    /// Longest distance so far, zero before any run placed
    pub fn best_distance(&self) -> f32 {
        self.best().map_or(0.0, |r| r.distance)
    }
}
