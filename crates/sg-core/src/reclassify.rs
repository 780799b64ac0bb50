//! Batch re-classification of stored records
//!
//! Cleanup jobs re-run the classifier over records persisted under older
//! rules and report which ones moved.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::types::{ClassificationResult, IndexingPurpose, PlatformType};

/// A previously persisted classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub url: String,
    pub platform_type: PlatformType,
    pub indexing_purpose: IndexingPurpose,
}

/// Outcome of re-running the classifier on one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reclassification {
    pub url: String,
    pub previous_type: PlatformType,
    pub previous_purpose: IndexingPurpose,
    pub current: ClassificationResult,
    /// True if either the platform type or the indexing purpose differs
    pub changed: bool,
}

impl Reclassification {
    /// Transition key such as `unknown/pending_review -> independent/full_index`.
    pub fn transition(&self) -> String {
        format!(
            "{}/{} -> {}/{}",
            self.previous_type, self.previous_purpose, self.current.platform_type, self.current.indexing_purpose
        )
    }
}

/// Aggregate counts for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReclassifySummary {
    pub total: usize,
    pub changed: usize,
    /// Changed records keyed by [`Reclassification::transition`]
    pub by_transition: BTreeMap<String, usize>,
}

pub fn reclassify(classifier: &Classifier<'_>, record: &StoredRecord) -> Reclassification {
    let current = classifier.classify(&record.url);
    let changed = current.platform_type != record.platform_type
        || current.indexing_purpose != record.indexing_purpose;

    Reclassification {
        url: record.url.clone(),
        previous_type: record.platform_type,
        previous_purpose: record.indexing_purpose,
        current,
        changed,
    }
}

/// Re-classify every record, returning the summary and per-record results
/// in input order.
pub fn reclassify_all<'r, I>(classifier: &Classifier<'_>, records: I) -> (ReclassifySummary, Vec<Reclassification>)
where
    I: IntoIterator<Item = &'r StoredRecord>,
{
    let mut summary = ReclassifySummary::default();
    let mut results = Vec::new();

    for record in records {
        let outcome = reclassify(classifier, record);
        summary.total += 1;
        if outcome.changed {
            summary.changed += 1;
            *summary.by_transition.entry(outcome.transition()).or_insert(0) += 1;
        }
        results.push(outcome);
    }

    log::debug!("Reclassified {} records, {} changed", summary.total, summary.changed);
    (summary, results)
}
