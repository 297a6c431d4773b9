//! Built-in term lists and defaults. These seed the configuration layer and
//! can be replaced wholesale from `notescan.toml`.

use crate::types::{ConditionDefinition, TermCategory};

pub const DEFAULT_WINDOW: usize = 50;
pub const DEFAULT_THRESHOLD: u32 = 2;
pub const DEFAULT_LIMIT: usize = 100;

pub const DIAGNOSIS_WEIGHT: u32 = 2;
pub const SUPPORT_WEIGHT: u32 = 1;
pub const MEDICATION_WEIGHT: u32 = 1;

pub const NEGATION_CUES: &[&str] = &[
    "no",
    "denies",
    "denied",
    "negative",
    "negative for",
    "not",
    "absence of",
    "free of",
    "lack of",
    "absent",
    "without",
    "rule out",
    "ruled out",
    "r/o",
    "unlikely",
    "not consistent with",
    "no evidence of",
    "without evidence of",
];

fn three_tier(
    name: &str,
    label: &str,
    diagnosis: &[&str],
    support: (&str, &[&str]),
    medications: &[&str],
) -> ConditionDefinition {
    ConditionDefinition::new(
        name,
        label,
        vec![
            TermCategory::new("diagnosis", DIAGNOSIS_WEIGHT, diagnosis.iter().copied()),
            TermCategory::new(support.0, SUPPORT_WEIGHT, support.1.iter().copied()),
            TermCategory::new("medications", MEDICATION_WEIGHT, medications.iter().copied()),
        ],
    )
}

pub fn heart_failure() -> ConditionDefinition {
    three_tier(
        "hf",
        "Heart Failure",
        &[
            "heart failure",
            "congestive heart failure",
            "chf",
            "hfref",
            "hfpef",
            "acute decompensated heart failure",
        ],
        (
            "supporting_findings",
            &["ejection fraction", "pulmonary edema", "volume overload", "fluid overload", "cardiomyopathy"],
        ),
        &["furosemide", "lasix", "bumetanide", "torsemide", "spironolactone"],
    )
}

pub fn asthma() -> ConditionDefinition {
    three_tier(
        "asthma",
        "Asthma",
        &["asthma", "reactive airway disease", "exercise induced asthma"],
        ("supporting_findings", &["wheezing", "bronchospasm"]),
        &["albuterol", "advair", "symbicort"],
    )
}

pub fn depression() -> ConditionDefinition {
    three_tier(
        "depression",
        "Depression",
        &["major depressive disorder", "depression", "mdd"],
        ("symptoms", &["depressed mood", "anhedonia", "hopelessness", "suicidal ideation"]),
        &[
            "sertraline",
            "fluoxetine",
            "citalopram",
            "escitalopram",
            "venlafaxine",
            "bupropion",
            "mirtazapine",
        ],
    )
}

pub fn reference_conditions() -> Vec<ConditionDefinition> {
    vec![heart_failure(), asthma(), depression()]
}
