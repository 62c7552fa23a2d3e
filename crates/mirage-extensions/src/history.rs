//! Resolution history
//!
//! The conflict engine never records anything itself. Callers that want a
//! history of applied fixes and the statistics derived from it implement
//! [`ResolutionStore`] on top of their own storage.

use crate::error::Result;
use crate::resolution::Resolution;
use chrono::{DateTime, Utc};
use mirage_core::Conflict;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One applied resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionRecord {
    pub conflict: Conflict,
    pub resolution: Resolution,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregate counts over a resolution history
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictStats {
    pub total: usize,
    pub auto_resolved: usize,
    pub manually_resolved: usize,

    /// Keyed by category name
    pub by_category: BTreeMap<String, usize>,

    /// Keyed by severity name
    pub by_severity: BTreeMap<String, usize>,

    /// Extension names whose rule triggered
    pub by_extension: BTreeMap<String, usize>,
}

impl ConflictStats {
    /// Build stats from a sequence of records
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ResolutionRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            if record.resolution.is_auto() {
                stats.auto_resolved += 1;
            } else {
                stats.manually_resolved += 1;
            }
            *stats
                .by_category
                .entry(record.conflict.category.to_string())
                .or_default() += 1;
            *stats
                .by_severity
                .entry(record.conflict.severity.to_string())
                .or_default() += 1;
            *stats
                .by_extension
                .entry(record.conflict.extension.clone())
                .or_default() += 1;
        }
        stats
    }

    /// Share of resolutions that were automatic, in `0.0..=1.0`
    pub fn auto_resolution_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.auto_resolved as f64 / self.total as f64
    }
}

/// Storage for applied resolutions
pub trait ResolutionStore {
    /// Record that `resolution` was applied to `conflict`
    fn save_resolution(&mut self, conflict: &Conflict, resolution: &Resolution) -> Result<()>;

    /// All records, oldest first
    fn resolution_history(&self) -> Result<Vec<ResolutionRecord>>;

    fn conflict_stats(&self) -> Result<ConflictStats> {
        Ok(ConflictStats::from_records(&self.resolution_history()?))
    }

    fn auto_resolution_rate(&self) -> Result<f64> {
        Ok(self.conflict_stats()?.auto_resolution_rate())
    }
}

/// Process-local store, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryResolutionStore {
    records: Vec<ResolutionRecord>,
}

impl MemoryResolutionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ResolutionStore for MemoryResolutionStore {
    fn save_resolution(&mut self, conflict: &Conflict, resolution: &Resolution) -> Result<()> {
        self.records.push(ResolutionRecord {
            conflict: conflict.clone(),
            resolution: resolution.clone(),
            recorded_at: Utc::now(),
        });
        Ok(())
    }

    fn resolution_history(&self) -> Result<Vec<ResolutionRecord>> {
        Ok(self.records.clone())
    }

    fn conflict_stats(&self) -> Result<ConflictStats> {
        Ok(ConflictStats::from_records(&self.records))
    }
}
