use crate::types::{ConditionDefinition, Record};

/// Pure text scoring for a single condition.
pub trait TextScorer: Send + Sync {
    fn score_text(&self, text: &str) -> u32;
}

pub trait RecordSource {
    fn load(&self) -> anyhow::Result<Vec<Record>>;
}

/// Persists or displays one condition's shortlist, in rank order.
pub trait RecordSink {
    fn write(&self, condition: &ConditionDefinition, records: &[Record]) -> anyhow::Result<()>;
}
