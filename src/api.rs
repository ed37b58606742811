// Public API
// Engine value plus the convenience functions most callers need

use rand::Rng;
use std::sync::OnceLock;

use crate::error::EngineError;
use crate::models::{HumanizationOptions, TextAnalysis};
use crate::services::detection::{analyze_with, PatternDatabase};
use crate::services::engine_config::EngineConfig;
use crate::services::humanizer::Humanizer;

/// A pattern database and a validated configuration. Cheap to share; every call is
/// independent and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Engine<'a> {
    db: &'a PatternDatabase,
    config: EngineConfig,
}

impl<'a> Engine<'a> {
    pub fn new(db: &'a PatternDatabase, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { db, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn database(&self) -> &PatternDatabase {
        self.db
    }

    /// Deterministic: the same text always yields the same analysis.
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        analyze_with(text, None, self.db, &self.config)
    }

    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<TextAnalysis, EngineError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.analyze(text))
    }

    pub fn humanize(&self, text: &str, options: &HumanizationOptions) -> String {
        self.humanize_with_rng(text, options, &mut rand::thread_rng())
    }

    /// Same as [`Engine::humanize`] with a caller-supplied rng; a seeded rng gives
    /// reproducible output.
    pub fn humanize_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        options: &HumanizationOptions,
        rng: &mut R,
    ) -> String {
        Humanizer::new(self.db, &self.config).humanize(text, options, rng)
    }

    pub fn humanize_bytes(&self, bytes: &[u8], options: &HumanizationOptions) -> Result<String, EngineError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.humanize(text, options))
    }
}

impl Engine<'static> {
    /// Built-in pattern table with the default configuration.
    pub fn builtin() -> Self {
        Self {
            db: PatternDatabase::builtin(),
            config: EngineConfig::default(),
        }
    }
}

fn default_engine() -> &'static Engine<'static> {
    static ENGINE: OnceLock<Engine<'static>> = OnceLock::new();
    ENGINE.get_or_init(Engine::builtin)
}

pub fn analyze_text(text: &str) -> TextAnalysis {
    default_engine().analyze(text)
}

pub fn humanize_text_advanced(text: &str, options: &HumanizationOptions) -> String {
    default_engine().humanize(text, options)
}

pub fn quick_humanize(text: &str) -> String {
    humanize_text_advanced(text, &HumanizationOptions::quick())
}

pub fn academic_humanize(text: &str) -> String {
    humanize_text_advanced(text, &HumanizationOptions::academic())
}

pub fn aggressive_humanize(text: &str) -> String {
    humanize_text_advanced(text, &HumanizationOptions::aggressive())
}

/// Byte-level entry point; the only failure is input that is not UTF-8.
pub fn analyze_bytes(bytes: &[u8]) -> Result<TextAnalysis, EngineError> {
    default_engine().analyze_bytes(bytes)
}

pub fn humanize_bytes(bytes: &[u8], options: &HumanizationOptions) -> Result<String, EngineError> {
    default_engine().humanize_bytes(bytes, options)
}
