//! Domain types shared by the scorer, the cohort builder and the reporters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::presets;

/// One clinical note plus whatever metadata came with it.
///
/// The field map is kept exactly as read (key order included) and is
/// serialized back verbatim. Only `text` and `summary` have meaning here:
/// - `text`: the note body that gets scored; absent or `null` reads as ""
/// - `summary`: optional, used for review previews only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// A record holding only a `text` field.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::default().with_field("text", Value::String(text.into()))
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// The note body, or `InvalidInput` when `text` is present but not a string.
    pub fn text(&self) -> Result<&str> {
        match self.0.get("text") {
            None | Some(Value::Null) => Ok(""),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(Error::InvalidInput(format!(
                "`text` must be a string, found {}",
                value_kind(other)
            ))),
        }
    }

    pub fn summary(&self) -> &str {
        self.0.get("summary").and_then(Value::as_str).unwrap_or("")
    }

    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self { Self(fields) }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(Error::InvalidInput(format!(
                "expected a JSON object, found {}",
                value_kind(&other)
            ))),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A weighted group of related terms. The weight is awarded once if any
/// term is found affirmed in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCategory {
    pub name: String,
    pub weight: u32,
    pub terms: Vec<String>,
}

impl TermCategory {
    pub fn new<S: Into<String>>(name: impl Into<String>, weight: u32, terms: impl IntoIterator<Item = S>) -> Self {
        Self { name: name.into(), weight, terms: terms.into_iter().map(Into::into).collect() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.terms.is_empty() {
            return Err(Error::InvalidConfig(format!("category '{}' has no terms", self.name)));
        }
        if self.terms.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!("category '{}' contains a blank term", self.name)));
        }
        Ok(())
    }
}

fn default_threshold() -> u32 { presets::DEFAULT_THRESHOLD }
fn default_limit() -> usize { presets::DEFAULT_LIMIT }

/// Everything needed to score and shortlist one condition.
///
/// - `name`: machine identifier, also used for output file names
/// - `label`: human title for previews (falls back to `name`)
/// - `threshold`: minimum inclusive score to be shortlisted
/// - `limit`: maximum shortlist size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub categories: Vec<TermCategory>,
}

impl ConditionDefinition {
    pub fn new(name: impl Into<String>, label: impl Into<String>, categories: Vec<TermCategory>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            threshold: presets::DEFAULT_THRESHOLD,
            limit: presets::DEFAULT_LIMIT,
            categories,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self { self.threshold = threshold; self }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self { self.limit = limit; self }

    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() { &self.name } else { &self.label }
    }

    /// Sum of all category weights.
    pub fn max_score(&self) -> u32 {
        self.categories.iter().fold(0u32, |acc, c| acc.saturating_add(c.weight))
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfig("condition name must not be empty".to_string()));
        }
        if self.categories.is_empty() {
            return Err(Error::InvalidConfig(format!("condition '{}' has no term categories", self.name)));
        }
        if self.limit == 0 {
            return Err(Error::InvalidConfig(format!("condition '{}' has a shortlist limit of 0", self.name)));
        }
        self.categories.iter().try_for_each(TermCategory::validate)
    }
}

/// Negation cues shared by every condition and the left-context window
/// (in characters) they are searched in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegationSettings {
    pub window: usize,
    pub cues: Vec<String>,
}

impl Default for NegationSettings {
    fn default() -> Self {
        Self {
            window: presets::DEFAULT_WINDOW,
            cues: presets::NEGATION_CUES.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl NegationSettings {
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::InvalidConfig("negation window must be positive".to_string()));
        }
        if self.cues.iter().any(|c| c.trim().is_empty()) {
            return Err(Error::InvalidConfig("negation cue list contains a blank cue".to_string()));
        }
        Ok(())
    }
}

/// Where and how shortlists are reported for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub out_dir: String,
    pub samples: usize,
    pub text_preview_chars: usize,
    pub summary_preview_chars: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { out_dir: ".".to_string(), samples: 5, text_preview_chars: 1000, summary_preview_chars: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    pub negation: NegationSettings,
    pub report: ReportSettings,
    pub conditions: Vec<ConditionDefinition>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            negation: NegationSettings::default(),
            report: ReportSettings::default(),
            conditions: presets::reference_conditions(),
        }
    }
}

impl ScanSettings {
    pub fn condition(&self, name: &str) -> Option<&ConditionDefinition> {
        self.conditions.iter().find(|c| c.name == name)
    }

    pub fn validate(&self) -> Result<()> {
        self.negation.validate()?;
        let mut seen = HashSet::new();
        for condition in &self.conditions {
            condition.validate()?;
            if !seen.insert(condition.name.as_str()) {
                return Err(Error::InvalidConfig(format!("condition '{}' is defined twice", condition.name)));
            }
        }
        Ok(())
    }
}
