// Engine Configuration
// Tunable scoring weights and pipeline calibration with documented defaults

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringWeights,
    #[serde(default = "default_cv_floor")]
    pub cv_floor: f64,
    #[serde(default = "default_cv_ceiling")]
    pub cv_ceiling: f64,
    #[serde(default = "default_low_confidence_tokens")]
    pub low_confidence_tokens: usize,
    #[serde(default)]
    pub suggestions: SuggestionThresholds,
    #[serde(default = "default_burstiness_target")]
    pub burstiness_target_cv: f64,
    #[serde(default = "default_discourse_fraction")]
    pub discourse_fraction: f64,
    #[serde(default = "default_words_per_citation")]
    pub words_per_citation: usize,
    #[serde(default = "default_second_pass_target")]
    pub second_pass_target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    #[serde(default = "default_perplexity_weight")]
    pub perplexity: f64,
    #[serde(default = "default_burstiness_weight")]
    pub burstiness: f64,
    #[serde(default = "default_pattern_weight")]
    pub patterns: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            perplexity: 0.4,
            burstiness: 0.3,
            patterns: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionThresholds {
    #[serde(default = "default_bursty_below")]
    pub bursty_below: f64,
    #[serde(default = "default_penalty_above")]
    pub pattern_penalty_above: f64,
    #[serde(default = "default_diversity_below")]
    pub lexical_diversity_below: f64,
    #[serde(default = "default_max_rewrite_hints")]
    pub max_rewrite_hints: usize,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            bursty_below: 50.0,
            pattern_penalty_above: 30.0,
            lexical_diversity_below: 40.0,
            max_rewrite_hints: 5,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringWeights::default(),
            cv_floor: 0.05,
            cv_ceiling: 0.6,
            low_confidence_tokens: 10,
            suggestions: SuggestionThresholds::default(),
            burstiness_target_cv: 0.35,
            discourse_fraction: 0.30,
            words_per_citation: 150,
            second_pass_target: 70.0,
        }
    }
}

fn default_perplexity_weight() -> f64 { 0.4 }
fn default_burstiness_weight() -> f64 { 0.3 }
fn default_pattern_weight() -> f64 { 0.3 }
fn default_cv_floor() -> f64 { 0.05 }
fn default_cv_ceiling() -> f64 { 0.6 }
fn default_low_confidence_tokens() -> usize { 10 }
fn default_bursty_below() -> f64 { 50.0 }
fn default_penalty_above() -> f64 { 30.0 }
fn default_diversity_below() -> f64 { 40.0 }
fn default_max_rewrite_hints() -> usize { 5 }
fn default_burstiness_target() -> f64 { 0.35 }
fn default_discourse_fraction() -> f64 { 0.30 }
fn default_words_per_citation() -> usize { 150 }
fn default_second_pass_target() -> f64 { 70.0 }

impl EngineConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let w = &self.scoring;
        for (name, value) in [
            ("scoring.perplexity", w.perplexity),
            ("scoring.burstiness", w.burstiness),
            ("scoring.patterns", w.patterns),
            ("discourseFraction", self.discourse_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::Config(format!("{} must be within [0, 1], got {}", name, value)));
            }
        }
        if (w.perplexity + w.burstiness + w.patterns - 1.0).abs() > 1e-6 {
            return Err(EngineError::Config("scoring weights must sum to 1".to_string()));
        }
        if !(self.cv_floor >= 0.0 && self.cv_ceiling > self.cv_floor) {
            return Err(EngineError::Config(format!(
                "cvCeiling ({}) must exceed cvFloor ({})",
                self.cv_ceiling, self.cv_floor
            )));
        }
        if !(self.burstiness_target_cv > 0.0 && self.burstiness_target_cv.is_finite()) {
            return Err(EngineError::Config(format!(
                "burstinessTargetCv must be a positive number, got {}",
                self.burstiness_target_cv
            )));
        }
        if self.low_confidence_tokens == 0 {
            return Err(EngineError::Config("lowConfidenceTokens must be positive".to_string()));
        }
        if self.words_per_citation == 0 {
            return Err(EngineError::Config("wordsPerCitation must be positive".to_string()));
        }
        if !(0.0..=100.0).contains(&self.second_pass_target) {
            return Err(EngineError::Config("secondPassTarget must be within [0, 100]".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.scoring.perplexity, 0.4);
        assert_eq!(config.cv_floor, 0.05);
        assert_eq!(config.words_per_citation, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = EngineConfig::from_json_str(r#"{"cvCeiling": 0.8, "suggestions": {"maxRewriteHints": 3}}"#).unwrap();
        assert_eq!(config.cv_ceiling, 0.8);
        assert_eq!(config.suggestions.max_rewrite_hints, 3);
        assert_eq!(config.suggestions.bursty_below, 50.0);
        assert_eq!(config.low_confidence_tokens, 10);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = EngineConfig::from_json_str(r#"{"scoring": {"perplexity": 0.9}}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
        for bad in [
            r#"{"burstinessTargetCv": -0.2}"#,
            r#"{"burstinessTargetCv": 0.0}"#,
            r#"{"lowConfidenceTokens": 0}"#,
        ] {
            assert!(matches!(EngineConfig::from_json_str(bad), Err(EngineError::Config(_))), "{}", bad);
        }
        let mut config = EngineConfig::default();
        config.burstiness_target_cv = f64::NAN;
        assert!(config.validate().is_err());
        let err = EngineConfig::from_json_str("{not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_config_round_trip() {
        let json = serde_json::to_string(&EngineConfig::default()).unwrap();
        assert!(json.contains("\"burstinessTargetCv\":0.35"));
    }
}
