//! notescan-cohort
//!
//! Turns per-record scores into ranked, thresholded shortlists, runs one
//! shortlist per configured condition, and reports them for review.
pub mod pipeline;
pub mod report;
pub mod select;

use tracing::{debug, warn};

use notescan_core::error::{Error, Result};
use notescan_core::traits::TextScorer;
use notescan_core::types::{ConditionDefinition, Record, TermCategory};
use notescan_text::{ConditionScorer, NegationChecker};

pub use pipeline::{CohortPipeline, ConditionCohort};
pub use select::{rank_and_select, Scored};

/// The ranked output for one condition plus how it was arrived at.
///
/// - `entries`: shortlisted records, best first, with score and input index
/// - `scored`: records that were scored
/// - `qualified`: records meeting the threshold before the limit was applied
/// - `skipped`: records dropped because their `text` was not a string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shortlist {
    pub entries: Vec<Scored<Record>>,
    pub scored: usize,
    pub qualified: usize,
    pub skipped: usize,
}

impl Shortlist {
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn scores(&self) -> Vec<u32> { self.entries.iter().map(|e| e.score).collect() }

    pub fn records(&self) -> Vec<Record> { self.entries.iter().map(|e| e.item.clone()).collect() }

    pub fn into_records(self) -> Vec<Record> { self.entries.into_iter().map(|e| e.item).collect() }
}

pub struct CohortBuilder<S> where S: TextScorer {
    scorer: S,
    threshold: u32,
    limit: usize,
}

impl<S> CohortBuilder<S> where S: TextScorer {
    pub fn new(scorer: S, threshold: u32, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(Error::InvalidConfig("shortlist limit must be positive".to_string()));
        }
        Ok(Self { scorer, threshold, limit })
    }

    pub fn build_shortlist(&self, records: &[Record]) -> Shortlist {
        self.build_shortlist_with(records, || {})
    }

    /// Like `build_shortlist`, calling `on_record` after each record is scored.
    pub fn build_shortlist_with(&self, records: &[Record], mut on_record: impl FnMut()) -> Shortlist {
        let mut scored = Vec::with_capacity(records.len());
        let mut skipped = 0;
        for (index, record) in records.iter().enumerate() {
            match record.text() {
                Ok(text) => scored.push(Scored { index, score: self.scorer.score_text(text), item: record }),
                Err(e) => {
                    warn!(index, error = %e, "skipping record");
                    skipped += 1;
                }
            }
            on_record();
        }
        let scored_count = scored.len();
        let qualified = scored.iter().filter(|s| s.score >= self.threshold).count();
        let entries = rank_and_select(scored, self.threshold, self.limit)
            .into_iter()
            .map(|s| s.map(Record::clone))
            .collect();
        debug!(scored = scored_count, qualified, skipped, "shortlist built");
        Shortlist { entries, scored: scored_count, qualified, skipped }
    }
}

impl CohortBuilder<ConditionScorer> {
    /// Builder using the condition's own threshold and limit.
    pub fn for_condition(condition: ConditionDefinition, checker: NegationChecker) -> Result<Self> {
        let (threshold, limit) = (condition.threshold, condition.limit);
        Self::new(ConditionScorer::new(condition, checker)?, threshold, limit)
    }

    pub fn condition(&self) -> &ConditionDefinition { self.scorer.condition() }
}

/// One-shot shortlist over ad-hoc categories: score, rank, keep
/// `score >= threshold`, truncate to `limit`.
pub fn build_shortlist(
    records: &[Record],
    categories: &[TermCategory],
    checker: &NegationChecker,
    threshold: u32,
    limit: usize,
) -> Result<Vec<Record>> {
    let condition = ConditionDefinition::new("adhoc", "", categories.to_vec())
        .with_threshold(threshold)
        .with_limit(limit);
    let builder = CohortBuilder::for_condition(condition, checker.clone())?;
    Ok(builder.build_shortlist(records).into_records())
}
