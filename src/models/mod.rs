// TextGuard Data Models
// Analysis results and humanization options shared by the detector and the pipeline

use serde::{Deserialize, Serialize};

// ============ Locale ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ru,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ru, Locale::En];

    /// Parse a BCP-47-ish tag ("ru", "ru-RU", "en_US"). Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag.trim().to_ascii_lowercase();
        if lang.starts_with("ru") {
            Some(Locale::Ru)
        } else if lang.starts_with("en") {
            Some(Locale::En)
        } else {
            None
        }
    }

    /// Script-share detection: Cyrillic letters above 30% of all letters means Russian.
    /// Text without letters falls back to English.
    pub fn detect(text: &str) -> Self {
        let mut cyrillic = 0usize;
        let mut letters = 0usize;
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            letters += 1;
            if ('\u{0400}'..='\u{04FF}').contains(&c) {
                cyrillic += 1;
            }
        }
        if letters > 0 && cyrillic as f64 / letters as f64 > 0.3 {
            Locale::Ru
        } else {
            Locale::En
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::En => "en",
        }
    }
}

// ============ Pattern Matches ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    Filler,        // Filler and hedge phrases
    Transition,    // Generic transition cliches
    SelfReference, // AI self-reference and disclaimers
    Boilerplate,   // Overused academic boilerplate
}

impl PatternCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternCategory::Filler => "filler",
            PatternCategory::Transition => "transition",
            PatternCategory::SelfReference => "self_reference",
            PatternCategory::Boilerplate => "boilerplate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternMatch {
    /// Canonical label of the matched signature.
    pub signature: String,
    /// The matched slice of the analyzed text.
    pub text: String,
    /// UTF-8 byte offset (0-based) into the analyzed text.
    pub start: usize,
    /// UTF-8 byte offset (end-exclusive).
    pub end: usize,
    pub weight: f64,
    pub category: PatternCategory,
    pub hard_strip: bool,
}

// ============ Analysis ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    VarySentenceLength,
    RewritePhrase,
    VaryVocabulary,
    LowConfidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
}

/// Raw statistics produced by the statistical analyzer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub bursty_score: f64,
    pub perplexity_score: f64,
    pub lexical_diversity: f64,
    pub coefficient_of_variation: f64,
    pub token_count: usize,
    pub sentence_count: usize,
    /// Set when the text is too short for the statistics to mean much.
    pub low_confidence: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub human_score: f64,
    pub perplexity_score: f64,
    pub bursty_score: f64,
    pub lexical_diversity: f64,
    pub pattern_penalty: f64,
    pub ai_patterns: Vec<PatternMatch>,
    pub suggestions: Vec<Suggestion>,
    pub low_confidence: bool,
    pub locale: Locale,
    pub token_count: usize,
    pub sentence_count: usize,
}

// ============ Humanization Options ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumanizationMode {
    Quick,
    Academic,
    Aggressive,
}

impl HumanizationMode {
    pub fn default_intensity(self) -> f64 {
        match self {
            HumanizationMode::Quick => 0.3,
            HumanizationMode::Academic => 0.5,
            HumanizationMode::Aggressive => 0.8,
        }
    }

    pub fn default_max_passes(self) -> u8 {
        match self {
            HumanizationMode::Aggressive => 2,
            _ => 1,
        }
    }

    pub fn from_str(val: &str) -> Option<Self> {
        match val.trim().to_lowercase().as_str() {
            "quick" => Some(Self::Quick),
            "academic" => Some(Self::Academic),
            "aggressive" => Some(Self::Aggressive),
            _ => None,
        }
    }
}

/// Fully enumerated humanization settings. Build with [`HumanizationOptions::for_mode`]
/// to get the documented per-mode defaults:
///
/// | mode       | intensity | preserve_meaning | max_passes |
/// |------------|-----------|------------------|------------|
/// | quick      | 0.3       | true             | 1          |
/// | academic   | 0.5       | true             | 1          |
/// | aggressive | 0.8       | true             | 2          |
///
/// `language: None` means the locale is detected from the text.
/// `discipline_hint: None` selects the general citation pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizationOptions {
    pub mode: HumanizationMode,
    pub intensity: f64,
    pub preserve_meaning: bool,
    pub language: Option<Locale>,
    pub discipline_hint: Option<String>,
    pub max_passes: u8,
}

impl HumanizationOptions {
    pub fn for_mode(mode: HumanizationMode) -> Self {
        Self {
            mode,
            intensity: mode.default_intensity(),
            preserve_meaning: true,
            language: None,
            discipline_hint: None,
            max_passes: mode.default_max_passes(),
        }
    }

    pub fn quick() -> Self {
        Self::for_mode(HumanizationMode::Quick)
    }

    pub fn academic() -> Self {
        Self::for_mode(HumanizationMode::Academic)
    }

    pub fn aggressive() -> Self {
        Self::for_mode(HumanizationMode::Aggressive)
    }

    /// Clamp caller-supplied values into their documented ranges.
    pub fn normalized(&self) -> Self {
        let intensity = if self.intensity.is_finite() {
            self.intensity.clamp(0.0, 1.0)
        } else {
            self.mode.default_intensity()
        };
        Self {
            intensity,
            max_passes: self.max_passes.clamp(1, 2),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_detection() {
        assert_eq!(Locale::detect("Следует отметить, что это важно."), Locale::Ru);
        assert_eq!(Locale::detect("It is worth noting that this matters."), Locale::En);
        assert_eq!(Locale::detect("12345 $$"), Locale::En);
        assert_eq!(Locale::from_tag("ru-RU"), Some(Locale::Ru));
        assert_eq!(Locale::from_tag("de"), None);
    }

    #[test]
    fn test_mode_defaults() {
        let quick = HumanizationOptions::quick();
        assert_eq!(quick.intensity, 0.3);
        assert_eq!(quick.max_passes, 1);
        let aggressive = HumanizationOptions::aggressive();
        assert_eq!(aggressive.max_passes, 2);
        assert!(aggressive.preserve_meaning);
    }

    #[test]
    fn test_options_normalized() {
        let mut opts = HumanizationOptions::academic();
        opts.intensity = 7.0;
        opts.max_passes = 9;
        let norm = opts.normalized();
        assert_eq!(norm.intensity, 1.0);
        assert_eq!(norm.max_passes, 2);

        opts.intensity = f64::NAN;
        assert_eq!(opts.normalized().intensity, 0.5);
    }

    #[test]
    fn test_analysis_serializes_camel_case() {
        let analysis = TextAnalysis {
            human_score: 50.0,
            perplexity_score: 40.0,
            bursty_score: 30.0,
            lexical_diversity: 60.0,
            pattern_penalty: 0.0,
            ai_patterns: vec![],
            suggestions: vec![],
            low_confidence: false,
            locale: Locale::Ru,
            token_count: 12,
            sentence_count: 1,
        };
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"humanScore\":50.0"));
        assert!(json.contains("\"aiPatterns\":[]"));
        assert!(json.contains("\"locale\":\"ru\""));
    }
}
