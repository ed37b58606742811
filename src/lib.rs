// TextGuard
// Offline AI-text signal analysis and rule-based humanization for Russian and English

pub mod api;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use api::{
    academic_humanize, aggressive_humanize, analyze_bytes, analyze_text, humanize_bytes,
    humanize_text_advanced, quick_humanize, Engine,
};
pub use error::EngineError;
pub use logging::init_logging;
pub use models::{
    HumanizationMode, HumanizationOptions, Locale, PatternCategory, PatternMatch, Suggestion,
    SuggestionKind, TextAnalysis, TextStatistics,
};
pub use services::detection::PatternDatabase;
pub use services::engine_config::EngineConfig;
