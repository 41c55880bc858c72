//! Per-sequence running totals and the metrics derived from them.
//!
//! Invariants held by every [`SequenceStats`] produced by [`SequenceStats::record`]:
//! - `best_time_ms` is `Some` iff at least one perfect attempt was recorded
//! - `best_time_ms` is never above any recorded perfect time
//! - `total_perfect_time_ms / perfect_attempts` is the mean perfect time

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PERFECT: u8 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StatsRecord")]
pub struct SequenceStats {
    #[serde(rename = "totalAttempts")]
    pub total_attempts: u64,
    #[serde(rename = "totalTime")]
    pub total_time_ms: u64,
    #[serde(rename = "totalAccuracy")]
    pub total_accuracy: u64,
    #[serde(rename = "perfectAttempts")]
    pub perfect_attempts: u64,
    #[serde(rename = "bestTime", skip_serializing_if = "Option::is_none")]
    pub best_time_ms: Option<u64>,
    #[serde(rename = "totalPerfectTime")]
    pub total_perfect_time_ms: u64,
}

/// Wire shape as it may appear on disk, including legacy records written
/// before `bestTime` existed or with an infinite sentinel (`null`).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatsRecord {
    total_attempts: f64,
    total_time: f64,
    total_accuracy: f64,
    perfect_attempts: f64,
    best_time: Option<f64>,
    total_perfect_time: f64,
}

fn count(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.round() as u64
    } else {
        0
    }
}

impl From<StatsRecord> for SequenceStats {
    fn from(r: StatsRecord) -> Self {
        let perfect_attempts = count(r.perfect_attempts);
        let best_time_ms = r
            .best_time
            .filter(|b| b.is_finite() && *b >= 0.0 && perfect_attempts > 0)
            .map(count);

        Self {
            total_attempts: count(r.total_attempts),
            total_time_ms: count(r.total_time),
            total_accuracy: count(r.total_accuracy),
            perfect_attempts,
            best_time_ms,
            total_perfect_time_ms: count(r.total_perfect_time),
        }
    }
}

impl SequenceStats {
    /// Folds one completed attempt into the totals, returning the new record.
    pub fn record(&self, elapsed_ms: u64, accuracy: u8) -> Self {
        let accuracy = accuracy.min(PERFECT);
        let mut next = Self {
            total_attempts: self.total_attempts + 1,
            total_time_ms: self.total_time_ms + elapsed_ms,
            total_accuracy: self.total_accuracy + accuracy as u64,
            ..*self
        };

        if accuracy == PERFECT {
            next.perfect_attempts += 1;
            next.total_perfect_time_ms += elapsed_ms;
            next.best_time_ms = Some(match self.best_time_ms {
                Some(best) => best.min(elapsed_ms),
                None => elapsed_ms,
            });
        }
        next
    }

    pub fn display(&self) -> Option<DisplayStats> {
        if self.total_attempts == 0 {
            return None;
        }
        let attempts = self.total_attempts as f64;
        let perfect = self.perfect_attempts;

        Some(DisplayStats {
            attempts: self.total_attempts,
            avg_time_sec: self.total_time_ms as f64 / attempts / 1000.0,
            avg_accuracy: (self.total_accuracy as f64 / attempts).round() as u8,
            perfect_attempts: perfect,
            best_time_sec: self
                .best_time_ms
                .filter(|_| perfect > 0)
                .map(|ms| ms as f64 / 1000.0),
            avg_perfect_time_sec: (perfect > 0)
                .then(|| self.total_perfect_time_ms as f64 / perfect as f64 / 1000.0),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayStats {
    pub attempts: u64,
    pub avg_time_sec: f64,
    pub avg_accuracy: u8,
    pub perfect_attempts: u64,
    pub best_time_sec: Option<f64>,
    pub avg_perfect_time_sec: Option<f64>,
}

/// The persisted `playStats` object: sequence name -> totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsBook {
    records: BTreeMap<String, SequenceStats>,
}

impl StatsBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed attempt. An absent record starts from zero with
    /// no best time. Returns the record that replaced the old one.
    pub fn commit(&mut self, sequence: &str, elapsed_ms: u64, accuracy: u8) -> SequenceStats {
        let current = self.records.get(sequence).copied().unwrap_or_default();
        let next = current.record(elapsed_ms, accuracy);
        self.records.insert(sequence.to_string(), next);
        next
    }

    pub fn derive(&self, sequence: &str) -> Option<DisplayStats> {
        self.records.get(sequence).and_then(SequenceStats::display)
    }

    /// Deletes the record outright. Returns whether one existed.
    pub fn clear(&mut self, sequence: &str) -> bool {
        self.records.remove(sequence).is_some()
    }

    pub fn get(&self, sequence: &str) -> Option<&SequenceStats> {
        self.records.get(sequence)
    }

    pub fn insert(&mut self, sequence: &str, stats: SequenceStats) {
        self.records.insert(sequence.to_string(), stats);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SequenceStats)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
