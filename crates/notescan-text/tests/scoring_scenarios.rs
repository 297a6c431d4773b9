use notescan_core::presets::{self, NEGATION_CUES};
use notescan_text::{ConditionScorer, NegationChecker};

fn checker() -> NegationChecker { NegationChecker::new(NEGATION_CUES, presets::DEFAULT_WINDOW).expect("checker") }

fn scorer(condition: notescan_core::types::ConditionDefinition) -> ConditionScorer {
    ConditionScorer::new(condition, checker()).expect("scorer")
}

const NOTES: &[&str] = &[
    "Patient has congestive heart failure and was started on furosemide.",
    "No evidence of heart failure. Denies chest pain.",
    "History of asthma, currently wheezing, on albuterol.",
    "Denies depression. Reports anhedonia for several months; sertraline was increased last week.",
    "r/o CHF. Echo pending. Heart failure clinic follow-up arranged for the next available slot.",
    "",
];

#[test]
fn heart_failure_diagnosis_plus_medication_scores_three() {
    let text = "Patient has congestive heart failure and was started on furosemide.";
    assert_eq!(scorer(presets::heart_failure()).score(text), 3);
}

#[test]
fn negated_diagnosis_scores_zero() {
    let text = "No evidence of heart failure. Denies chest pain.";
    assert_eq!(scorer(presets::heart_failure()).score(text), 0);
}

#[test]
fn asthma_with_all_three_categories_scores_four() {
    let text = "History of asthma, currently wheezing, on albuterol.";
    let s = scorer(presets::asthma());
    assert_eq!(s.score(text), 4);
    assert_eq!(s.score(text), s.max_score());
}

#[test]
fn depression_negated_diagnosis_keeps_symptom_and_medication() {
    let text = "Denies depression. Over the past several months the patient describes persistent anhedonia; sertraline was increased.";
    assert_eq!(scorer(presets::depression()).score(text), 2);
}

#[test]
fn cue_also_covers_mentions_that_follow_closely() {
    let c = checker();
    let text = "Denies depression. Reports anhedonia for several months; sertraline was increased last week.";
    assert!(!c.is_affirmed(text, "anhedonia"));
    assert!(c.is_affirmed(text, "sertraline"));
    assert_eq!(scorer(presets::depression()).score(text), 1);
}

#[test]
fn absent_term_is_never_affirmed_at_any_window() {
    let c = checker();
    for note in NOTES {
        for window in [1, 5, 50, 500] {
            assert!(!c.is_affirmed_within(note, "cardiomyopathy", window));
        }
    }
}

#[test]
fn leading_no_negates_the_term() {
    let c = checker();
    for term in ["asthma", "heart failure", "CHF", "suicidal ideation"] {
        let text = format!("no {term}");
        for window in [5, 10, 50] {
            assert!(!c.is_affirmed_within(&text, term, window), "'{text}' at window {window}");
        }
    }
}

#[test]
fn negation_after_the_term_does_not_apply() {
    let c = checker();
    for term in ["asthma", "heart failure", "wheezing"] {
        let text = format!("{term} present, no issues");
        assert!(c.is_affirmed(&text, term));
    }
}

#[test]
fn widening_the_window_never_turns_negated_into_affirmed() {
    let c = checker();
    let terms = ["heart failure", "chf", "asthma", "depression", "anhedonia", "furosemide"];
    let cut_words = ["Plays piano asthma", "casino chf", "He cannot asthma", "Annotated depression", "piano; no asthma"];
    for note in NOTES.iter().chain(&cut_words) {
        for term in terms {
            let mut previous = c.is_affirmed_within(note, term, 1);
            for window in 2..=120 {
                let current = c.is_affirmed_within(note, term, window);
                assert!(previous || !current, "'{term}' in '{note}' flipped to affirmed at window {window}");
                previous = current;
            }
        }
    }
    for note in &cut_words[..4] {
        let term = terms.iter().find(|t| note.to_lowercase().contains(*t)).unwrap();
        assert!((1..=60).all(|w| c.is_affirmed_within(note, term, w)), "'{note}' negated by a cut word");
    }
}

#[test]
fn scoring_is_repeatable() {
    let scorers = [scorer(presets::heart_failure()), scorer(presets::asthma()), scorer(presets::depression())];
    for s in &scorers {
        for note in NOTES {
            assert_eq!(s.score(note), s.score(note));
            assert_eq!(s.evaluate(note), s.evaluate(note));
        }
    }
}

#[test]
fn mention_beyond_the_window_escapes_the_cue() {
    let c = checker();
    let text = "No acute distress today. The patient was seen by cardiology last month for heart failure.";
    assert!(c.is_affirmed(text, "heart failure"));
    assert!(!c.is_affirmed_within(text, "heart failure", 200));
}
