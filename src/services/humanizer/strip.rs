// Pattern Strip
// Replaces AI-tell phrases with curated alternatives and repairs capitalization

use serde::{Deserialize, Serialize};

use crate::models::Locale;
use crate::services::detection::{PatternDatabase, PatternEntry};
use crate::services::text_processor::capitalize_first;

pub const MAX_STRIP_ROUNDS: usize = 3;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    Plain,
    Formal,
    /// Any non-empty alternative, the one closest in length to the matched phrase.
    Closest,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StripReport {
    pub replaced: usize,
    pub rounds: usize,
}

/// True when `at` begins a sentence: start of text, start of a line, or after
/// sentence-final punctuation and whitespace.
fn is_sentence_initial(text: &str, at: usize) -> bool {
    let before = &text[..at];
    let trimmed = before.trim_end_matches([' ', '\t']);
    match trimmed.chars().last() {
        None => true,
        Some('\n') => true,
        Some(c) => matches!(c, '.' | '!' | '?' | '…') && trimmed.len() < before.len(),
    }
}

fn starts_with_upper(s: &str) -> bool {
    s.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

fn choose_alternative(entry: &PatternEntry, register: Register, matched: &str, at: usize) -> &'static str {
    let alternatives = match register {
        Register::Plain => entry.plain,
        Register::Formal => entry.formal,
        Register::Closest => {
            let target = matched.chars().count();
            return entry
                .plain
                .iter()
                .chain(entry.formal.iter())
                .filter(|a| !a.is_empty())
                .min_by_key(|a| a.chars().count().abs_diff(target))
                .copied()
                .unwrap_or("");
        }
    };
    alternatives.get(at % alternatives.len().max(1)).copied().unwrap_or("")
}

/// One replacement round over every hit in `text`.
pub fn strip_once(text: &str, locale: Locale, register: Register, db: &PatternDatabase) -> (String, usize) {
    let hits = db.find_hits(text, locale);
    if hits.is_empty() {
        return (text.to_string(), 0);
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    let mut capitalize_next = false;
    for hit in &hits {
        let gap = &text[cursor..hit.start];
        if capitalize_next {
            out.push_str(&capitalize_first(gap));
            capitalize_next = gap.trim().is_empty();
        } else {
            out.push_str(gap);
        }

        let alternative = choose_alternative(db.entry(hit.entry), register, &text[hit.start..hit.end], hit.start);
        let initial = is_sentence_initial(text, hit.start) || starts_with_upper(&text[hit.start..hit.end]);

        cursor = hit.end;
        if alternative.is_empty() {
            // Drop the phrase together with the whitespace after it.
            let rest = &text[cursor..];
            cursor += rest.len() - rest.trim_start_matches([' ', '\t']).len();
            capitalize_next = capitalize_next || initial;
        } else if initial || capitalize_next {
            out.push_str(&capitalize_first(alternative));
            capitalize_next = false;
        } else {
            out.push_str(alternative);
        }
    }

    let tail = &text[cursor..];
    if capitalize_next {
        out.push_str(&capitalize_first(tail));
    } else {
        out.push_str(tail);
    }
    (out, hits.len())
}

/// Strip until no hard-strip signature is left, at most [`MAX_STRIP_ROUNDS`] rounds.
pub fn strip_patterns(
    text: &str,
    locale: Locale,
    register: Register,
    db: &PatternDatabase,
) -> (String, StripReport) {
    let mut report = StripReport::default();
    let mut current = text.to_string();
    for _ in 0..MAX_STRIP_ROUNDS {
        let (next, replaced) = strip_once(&current, locale, register, db);
        if replaced == 0 {
            break;
        }
        report.replaced += replaced;
        report.rounds += 1;
        current = next;
        if !db.has_hard_strip_hit(&current, locale) {
            break;
        }
    }
    (current, report)
}
