// TextGuard Core Services

pub mod text_processor;
pub mod engine_config;
pub mod discipline_catalog;
pub mod detection;
pub mod humanizer;

pub use text_processor::*;
pub use engine_config::*;

// Re-export the entry points used across modules
pub use detection::{analyze_statistics, analyze_with, PatternDatabase};
pub use humanizer::{inject_citations, Humanizer, ModeProfile, Stage};
