// Statistical Analyzer
// Burstiness, lexical diversity and a perplexity proxy computed from raw text.
//
// The perplexity score is a structural heuristic, not a language-model perplexity:
// it measures how much the text leans on the most generic words of its locale and
// on a handful of its own repeated content words.

use std::collections::HashMap;

use super::reference_words::reference_frequencies;
use crate::models::{Locale, TextStatistics};
use crate::services::engine_config::EngineConfig;
use crate::services::text_processor::{normalized_tokens, split_document_sentences};

/// Share of tokens taken by generic function words above their reference frequency
/// at which predictability saturates.
const EXCESS_SATURATION: f64 = 0.20;
/// Share of tokens spent on repeating the text's own top content words at which
/// predictability saturates.
const HEAD_SATURATION: f64 = 0.15;
const HEAD_RANKS: usize = 3;

pub fn analyze_statistics(text: &str, locale: Locale, config: &EngineConfig) -> TextStatistics {
    let tokens = normalized_tokens(text);
    let sentence_lengths: Vec<usize> = split_document_sentences(text)
        .iter()
        .map(|s| normalized_tokens(&s.text).len())
        .filter(|&n| n > 0)
        .collect();

    let cv = coefficient_of_variation(&sentence_lengths);
    TextStatistics {
        bursty_score: burstiness_score(cv, config),
        perplexity_score: perplexity_proxy(&tokens, locale),
        lexical_diversity: lexical_diversity(&tokens),
        coefficient_of_variation: cv,
        token_count: tokens.len(),
        sentence_count: sentence_lengths.len(),
        low_confidence: tokens.len() < config.low_confidence_tokens,
    }
}

/// Population CV of sentence lengths; fewer than two sentences has no variation.
pub fn coefficient_of_variation(lengths: &[usize]) -> f64 {
    if lengths.len() < 2 {
        return 0.0;
    }
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<usize>() as f64 / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let variance = lengths
        .iter()
        .map(|&l| (l as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt() / mean
}

/// Clamped linear map: CV at the floor scores 0, at the ceiling 100.
pub fn burstiness_score(cv: f64, config: &EngineConfig) -> f64 {
    let span = (config.cv_ceiling - config.cv_floor).max(1e-9);
    ((cv - config.cv_floor) / span * 100.0).clamp(0.0, 100.0)
}

pub fn lexical_diversity(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let freq = frequencies(tokens);
    let ttr = freq.len() as f64 / tokens.len() as f64;
    let hapax = freq.values().filter(|&&c| c == 1).count() as f64 / freq.len() as f64;
    (100.0 * (0.5 * ttr + 0.5 * hapax)).clamp(0.0, 100.0)
}

pub fn perplexity_proxy(tokens: &[String], locale: Locale) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let total = tokens.len() as f64;
    let reference = reference_frequencies(locale);
    let table = rank_frequency(tokens);

    let excess: f64 = table
        .iter()
        .filter_map(|(word, count)| {
            reference
                .get(word.as_str())
                .map(|r| (*count as f64 / total - r).max(0.0))
        })
        .sum();

    let head: f64 = table
        .iter()
        .filter(|(word, _)| !reference.contains_key(word.as_str()))
        .take(HEAD_RANKS)
        .map(|(_, count)| count.saturating_sub(1) as f64)
        .sum::<f64>()
        / total;

    let predictability = 0.6 * (excess / EXCESS_SATURATION).clamp(0.0, 1.0)
        + 0.4 * (head / HEAD_SATURATION).clamp(0.0, 1.0);
    (100.0 * (1.0 - predictability)).clamp(0.0, 100.0)
}

fn frequencies(tokens: &[String]) -> HashMap<&str, usize> {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for t in tokens {
        *freq.entry(t.as_str()).or_insert(0) += 1;
    }
    freq
}

/// Tokens sorted by descending count, ties broken alphabetically for determinism.
pub fn rank_frequency(tokens: &[String]) -> Vec<(String, usize)> {
    let mut table: Vec<(String, usize)> = frequencies(tokens)
        .into_iter()
        .map(|(w, c)| (w.to_string(), c))
        .collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(words: usize, word: &str) -> String {
        let mut s = vec![word; words].join(" ");
        s = crate::services::text_processor::capitalize_first(&s);
        s.push('.');
        s
    }

    #[test]
    fn test_uniform_sentences_score_near_zero() {
        let config = EngineConfig::default();
        let text: Vec<String> = (0..10).map(|_| sentence(12, "слово")).collect();
        let stats = analyze_statistics(&text.join(" "), Locale::Ru, &config);
        assert_eq!(stats.sentence_count, 10);
        assert!(stats.coefficient_of_variation.abs() < 1e-9);
        assert!(stats.bursty_score < 1.0);
    }

    #[test]
    fn test_alternating_sentences_score_high() {
        let config = EngineConfig::default();
        let text: Vec<String> = (0..10)
            .map(|i| if i % 2 == 0 { sentence(4, "word") } else { sentence(40, "word") })
            .collect();
        let stats = analyze_statistics(&text.join(" "), Locale::En, &config);
        assert!(stats.bursty_score > 80.0, "got {}", stats.bursty_score);
    }

    #[test]
    fn test_burstiness_scale_is_clamped_linear() {
        let config = EngineConfig::default();
        assert_eq!(burstiness_score(0.0, &config), 0.0);
        assert_eq!(burstiness_score(0.05, &config), 0.0);
        assert!((burstiness_score(0.325, &config) - 50.0).abs() < 1e-9);
        assert_eq!(burstiness_score(0.6, &config), 100.0);
        assert_eq!(burstiness_score(3.0, &config), 100.0);
    }

    #[test]
    fn test_lexical_diversity() {
        let all_unique: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(lexical_diversity(&all_unique), 100.0);
        let repeated: Vec<String> = ["a", "a", "a", "a"].iter().map(|s| s.to_string()).collect();
        // TTR 0.25, hapax 0.0
        assert!((lexical_diversity(&repeated) - 12.5).abs() < 1e-9);
        assert_eq!(lexical_diversity(&[]), 0.0);
    }

    #[test]
    fn test_perplexity_penalizes_generic_words() {
        let generic = normalized_tokens("the the the and of to the and of to it is the");
        let varied = normalized_tokens(
            "Crimson herons wade past rusted barges while dockworkers argue over tides",
        );
        let g = perplexity_proxy(&generic, Locale::En);
        let v = perplexity_proxy(&varied, Locale::En);
        assert!(v > g, "varied {} <= generic {}", v, g);
        assert!((0.0..=100.0).contains(&g));
        assert_eq!(v, 100.0);
    }

    #[test]
    fn test_short_text_is_low_confidence() {
        let config = EngineConfig::default();
        let stats = analyze_statistics("Коротко и ясно.", Locale::Ru, &config);
        assert!(stats.low_confidence);
        assert_eq!(stats.token_count, 3);
    }

    #[test]
    fn test_rank_frequency_is_deterministic() {
        let tokens = normalized_tokens("b a b c a b");
        let table = rank_frequency(&tokens);
        assert_eq!(
            table,
            vec![("b".to_string(), 3), ("a".to_string(), 2), ("c".to_string(), 1)]
        );
    }
}
