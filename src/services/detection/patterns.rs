// Pattern Database
// Compiles every signature once; a RegexSet per locale finds the candidate
// signatures in a single pass, then overlapping spans are resolved longest-first.

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use super::pattern_table::{PatternEntry, BUILTIN_PATTERNS};
use crate::error::EngineError;
use crate::models::{Locale, PatternMatch};

/// A raw hit: entry index plus byte span, before conversion to a [`PatternMatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHit {
    pub entry: usize,
    pub start: usize,
    pub end: usize,
}

impl EntryHit {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn overlaps(&self, other: &EntryHit) -> bool {
        self.start < other.end && other.start < self.end
    }
}

struct LocaleIndex {
    set: RegexSet,
    /// Set slot -> entry index.
    members: Vec<usize>,
}

/// Immutable table of AI-tell signatures. Build once, share by reference.
pub struct PatternDatabase {
    entries: Vec<PatternEntry>,
    compiled: Vec<Regex>,
    by_locale: HashMap<Locale, LocaleIndex>,
}

impl std::fmt::Debug for PatternDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternDatabase")
            .field("entries", &self.entries.len())
            .finish()
    }
}

fn anchored(signature: &str) -> String {
    format!(r"\b(?:{})\b", signature)
}

impl PatternDatabase {
    pub fn new(entries: Vec<PatternEntry>) -> Result<Self, EngineError> {
        let mut compiled = Vec::with_capacity(entries.len());
        for entry in &entries {
            if !(entry.weight > 0.0 && entry.weight <= 100.0) {
                return Err(EngineError::Config(format!(
                    "pattern '{}' weight {} outside (0, 100]",
                    entry.label, entry.weight
                )));
            }
            let re = RegexBuilder::new(&anchored(entry.signature))
                .case_insensitive(true)
                .build()
                .map_err(|source| EngineError::Pattern {
                    signature: entry.signature.to_string(),
                    source,
                })?;
            compiled.push(re);
        }

        let mut by_locale = HashMap::new();
        for locale in Locale::ALL {
            let members: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.locale == locale)
                .map(|(i, _)| i)
                .collect();
            let set = RegexSetBuilder::new(members.iter().map(|&i| anchored(entries[i].signature)))
                .case_insensitive(true)
                .build()
                .map_err(|source| EngineError::Pattern {
                    signature: format!("<{} set>", locale.as_str()),
                    source,
                })?;
            by_locale.insert(locale, LocaleIndex { set, members });
        }

        debug!("[PATTERNS] Database compiled: {} entries", entries.len());
        Ok(Self {
            entries,
            compiled,
            by_locale,
        })
    }

    /// Process-wide database built from the curated table.
    pub fn builtin() -> &'static PatternDatabase {
        static DB: OnceLock<PatternDatabase> = OnceLock::new();
        DB.get_or_init(|| {
            PatternDatabase::new(BUILTIN_PATTERNS.to_vec())
                .expect("built-in pattern table compiles")
        })
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> &PatternEntry {
        &self.entries[index]
    }

    /// Non-overlapping hits for `locale`, ordered by start offset.
    pub fn find_hits(&self, text: &str, locale: Locale) -> Vec<EntryHit> {
        let Some(index) = self.by_locale.get(&locale) else {
            return Vec::new();
        };
        let mut candidates = Vec::new();
        for slot in index.set.matches(text).iter() {
            let entry = index.members[slot];
            for m in self.compiled[entry].find_iter(text) {
                candidates.push(EntryHit {
                    entry,
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
        resolve_overlaps(candidates, &self.entries)
    }

    pub fn match_all(&self, text: &str, locale: Locale) -> Vec<PatternMatch> {
        self.find_hits(text, locale)
            .into_iter()
            .map(|hit| {
                let entry = &self.entries[hit.entry];
                PatternMatch {
                    signature: entry.label.to_string(),
                    text: text[hit.start..hit.end].to_string(),
                    start: hit.start,
                    end: hit.end,
                    weight: entry.weight,
                    category: entry.category,
                    hard_strip: entry.hard_strip,
                }
            })
            .collect()
    }

    pub fn has_hard_strip_hit(&self, text: &str, locale: Locale) -> bool {
        self.find_hits(text, locale)
            .iter()
            .any(|h| self.entries[h.entry].hard_strip)
    }
}

/// Longest match wins; ties go to the earlier start, then the heavier entry,
/// then table order. Output is sorted by start offset.
pub fn resolve_overlaps(mut candidates: Vec<EntryHit>, entries: &[PatternEntry]) -> Vec<EntryHit> {
    candidates.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then(a.start.cmp(&b.start))
            .then(
                entries[b.entry]
                    .weight
                    .partial_cmp(&entries[a.entry].weight)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(a.entry.cmp(&b.entry))
    });

    let mut accepted: Vec<EntryHit> = Vec::with_capacity(candidates.len());
    for cand in candidates {
        if accepted.iter().all(|a| !a.overlaps(&cand)) {
            accepted.push(cand);
        }
    }
    accepted.sort_by_key(|h| (h.start, h.end));
    accepted
}
