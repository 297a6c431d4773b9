use regex::Regex;

use notescan_core::error::{Error, Result};
use notescan_core::types::NegationSettings;

/// Decides whether a term is mentioned in an affirmed context.
///
/// A mention is negated when one of the cues appears, as a whole word or
/// phrase, in the `window` characters immediately to its left. All matching
/// is case-insensitive and terms are matched literally.
#[derive(Debug, Clone)]
pub struct NegationChecker {
    cues: Option<Regex>,
    window: usize,
}

impl NegationChecker {
    pub fn new<S: AsRef<str>>(cues: &[S], window: usize) -> Result<Self> {
        if window == 0 {
            return Err(Error::InvalidConfig("negation window must be positive".to_string()));
        }
        let mut alternatives = Vec::with_capacity(cues.len());
        for cue in cues {
            let cue = cue.as_ref().trim().to_lowercase();
            if cue.is_empty() {
                return Err(Error::InvalidConfig("negation cue list contains a blank cue".to_string()));
            }
            alternatives.push(regex::escape(&cue));
        }
        // An empty alternation would match everywhere.
        let cues = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
            Some(Regex::new(&pattern).map_err(|e| Error::InvalidConfig(format!("negation cues: {e}")))?)
        };
        Ok(Self { cues, window })
    }

    pub fn from_settings(settings: &NegationSettings) -> Result<Self> {
        Self::new(&settings.cues, settings.window)
    }

    pub fn window(&self) -> usize { self.window }

    /// `is_affirmed_within` using the configured window.
    pub fn is_affirmed(&self, text: &str, term: &str) -> bool {
        self.is_affirmed_within(text, term, self.window)
    }

    /// True if at least one occurrence of `term` in `text` has no cue in its
    /// left context. Absent terms and empty text are never affirmed. A
    /// `window` of 0 is treated as 1.
    pub fn is_affirmed_within(&self, text: &str, term: &str, window: usize) -> bool {
        self.affirmed_lowered(&text.to_lowercase(), &term.to_lowercase(), window)
    }

    /// Both inputs must already be lower-cased.
    pub(crate) fn affirmed_lowered(&self, text: &str, term: &str, window: usize) -> bool {
        if text.is_empty() || term.is_empty() {
            return false;
        }
        let window = window.max(1);
        text.match_indices(term)
            .any(|(start, _)| !self.is_negated(text, context_start(text, start, window), start))
    }

    /// Whether a cue lies wholly inside `text[from..end]`. Word boundaries
    /// are judged against the full text, so the tail of a word cut by the
    /// window edge never counts as a cue.
    fn is_negated(&self, text: &str, from: usize, end: usize) -> bool {
        self.cues.as_ref().is_some_and(|re| re.is_match_at(&text[..end], from))
    }
}

/// Byte offset of the first of the (up to) `window` characters before `end`,
/// clipped at the start of `text`.
fn context_start(text: &str, end: usize, window: usize) -> usize {
    if window == 0 {
        return end;
    }
    text[..end].char_indices().rev().nth(window - 1).map_or(0, |(i, _)| i)
}
