// Detection Module
// AI-tell detection core organized into specialized submodules:
// - pattern_table: Curated signatures with plain/formal alternatives
// - patterns: Compiled pattern database and overlap resolution
// - reference_words: Locale function-word frequencies
// - statistics: Burstiness, lexical diversity and perplexity proxy
// - aggregation: Weighted human score and remediation suggestions

pub mod pattern_table;
pub mod patterns;
pub mod reference_words;
pub mod statistics;
pub mod aggregation;

pub use pattern_table::{PatternEntry, BUILTIN_PATTERNS};
pub use patterns::{resolve_overlaps, EntryHit, PatternDatabase};
pub use statistics::analyze_statistics;
pub use aggregation::{aggregate, analyze_with, empty_analysis, pattern_penalty};
