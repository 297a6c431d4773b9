use serde::Serialize;

use notescan_core::error::Result;
use notescan_core::traits::TextScorer;
use notescan_core::types::{ConditionDefinition, Record};

use crate::negation::NegationChecker;

/// A category that contributed to a score, with the first affirmed term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryHit {
    pub category: String,
    pub weight: u32,
    pub term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub score: u32,
    pub hits: Vec<CategoryHit>,
}

/// Scores text for one condition: each category adds its weight once if
/// any of its terms is affirmed.
#[derive(Debug, Clone)]
pub struct ConditionScorer {
    condition: ConditionDefinition,
    lowered_terms: Vec<Vec<String>>,
    checker: NegationChecker,
}

impl ConditionScorer {
    pub fn new(condition: ConditionDefinition, checker: NegationChecker) -> Result<Self> {
        condition.validate()?;
        let lowered_terms = condition
            .categories
            .iter()
            .map(|c| c.terms.iter().map(|t| t.to_lowercase()).collect())
            .collect();
        Ok(Self { condition, lowered_terms, checker })
    }

    pub fn condition(&self) -> &ConditionDefinition { &self.condition }

    pub fn checker(&self) -> &NegationChecker { &self.checker }

    pub fn max_score(&self) -> u32 { self.condition.max_score() }

    pub fn score(&self, text: &str) -> u32 { self.evaluate(text).score }

    pub fn evaluate(&self, text: &str) -> ScoreBreakdown {
        let text = text.to_lowercase();
        let window = self.checker.window();
        let mut breakdown = ScoreBreakdown::default();
        for (category, terms) in self.condition.categories.iter().zip(&self.lowered_terms) {
            let hit = terms
                .iter()
                .position(|term| self.checker.affirmed_lowered(&text, term, window));
            if let Some(i) = hit {
                breakdown.score = breakdown.score.saturating_add(category.weight);
                breakdown.hits.push(CategoryHit {
                    category: category.name.clone(),
                    weight: category.weight,
                    term: category.terms[i].clone(),
                });
            }
        }
        breakdown
    }

    /// Fails with `InvalidInput` when the record's `text` is not a string.
    pub fn score_record(&self, record: &Record) -> Result<u32> {
        Ok(self.score(record.text()?))
    }
}

impl TextScorer for ConditionScorer {
    fn score_text(&self, text: &str) -> u32 { self.score(text) }
}
