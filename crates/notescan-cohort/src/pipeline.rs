use tracing::info;

use notescan_core::error::{Error, Result};
use notescan_core::types::{ConditionDefinition, Record, ScanSettings};
use notescan_text::{ConditionScorer, NegationChecker};

use crate::{CohortBuilder, Shortlist};

#[derive(Debug, Clone)]
pub struct ConditionCohort {
    pub condition: ConditionDefinition,
    pub shortlist: Shortlist,
}

/// One cohort builder per condition, all sharing the same negation cues.
pub struct CohortPipeline {
    builders: Vec<CohortBuilder<ConditionScorer>>,
}

impl CohortPipeline {
    pub fn from_settings(settings: &ScanSettings) -> Result<Self> {
        settings.validate()?;
        let checker = NegationChecker::from_settings(&settings.negation)?;
        let builders = settings
            .conditions
            .iter()
            .map(|c| CohortBuilder::for_condition(c.clone(), checker.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { builders })
    }

    /// Keep only the named conditions, in configuration order. An empty
    /// selection keeps everything.
    pub fn only(mut self, names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(self);
        }
        if let Some(unknown) = names.iter().find(|n| !self.builders.iter().any(|b| &b.condition().name == *n)) {
            return Err(Error::NotFound(format!("condition '{unknown}'")));
        }
        self.builders.retain(|b| names.contains(&b.condition().name));
        Ok(self)
    }

    pub fn len(&self) -> usize { self.builders.len() }

    pub fn is_empty(&self) -> bool { self.builders.is_empty() }

    pub fn conditions(&self) -> impl Iterator<Item = &ConditionDefinition> {
        self.builders.iter().map(CohortBuilder::condition)
    }

    pub fn scorers(&self) -> impl Iterator<Item = &ConditionScorer> {
        self.builders.iter().map(|b| &b.scorer)
    }

    pub fn run(&self, records: &[Record]) -> Vec<ConditionCohort> {
        self.run_with(records, |_| {})
    }

    /// Runs every condition over `records`; `on_record` is called once per
    /// record per condition.
    pub fn run_with(&self, records: &[Record], mut on_record: impl FnMut(&ConditionDefinition)) -> Vec<ConditionCohort> {
        self.builders
            .iter()
            .map(|builder| {
                let condition = builder.condition();
                let shortlist = builder.build_shortlist_with(records, || on_record(condition));
                info!(
                    condition = %condition.name,
                    shortlisted = shortlist.len(),
                    qualified = shortlist.qualified,
                    skipped = shortlist.skipped,
                    "condition scored"
                );
                ConditionCohort { condition: condition.clone(), shortlist }
            })
            .collect()
    }
}
