// Aggregation Logic
// Combines pattern hits and text statistics into one human-likeness score with suggestions

use std::collections::HashSet;

use super::patterns::PatternDatabase;
use super::statistics::analyze_statistics;
use crate::models::{Locale, PatternMatch, Suggestion, SuggestionKind, TextAnalysis, TextStatistics};
use crate::services::engine_config::EngineConfig;

/// Sum of the weights of distinct matched signatures, capped at 100.
/// A phrase repeated three times is penalized once.
pub fn pattern_penalty(matches: &[PatternMatch]) -> f64 {
    let mut seen = HashSet::new();
    matches
        .iter()
        .filter(|m| seen.insert(m.signature.as_str()))
        .map(|m| m.weight)
        .sum::<f64>()
        .min(100.0)
}

pub fn aggregate(
    matches: Vec<PatternMatch>,
    stats: &TextStatistics,
    locale: Locale,
    config: &EngineConfig,
    db: &PatternDatabase,
) -> TextAnalysis {
    let penalty = pattern_penalty(&matches);
    let w = &config.scoring;
    let human_score = (w.perplexity * stats.perplexity_score
        + w.burstiness * stats.bursty_score
        + w.patterns * (100.0 - penalty))
        .clamp(0.0, 100.0);

    let suggestions = build_suggestions(&matches, stats, penalty, locale, config, db);

    TextAnalysis {
        human_score,
        perplexity_score: stats.perplexity_score.clamp(0.0, 100.0),
        bursty_score: stats.bursty_score.clamp(0.0, 100.0),
        lexical_diversity: stats.lexical_diversity.clamp(0.0, 100.0),
        pattern_penalty: penalty,
        ai_patterns: matches,
        suggestions,
        low_confidence: stats.low_confidence,
        locale,
        token_count: stats.token_count,
        sentence_count: stats.sentence_count,
    }
}

/// Full analysis of `text`: pattern hits, statistics and the aggregated score.
/// `language: None` detects the locale from the script.
pub fn analyze_with(
    text: &str,
    language: Option<Locale>,
    db: &PatternDatabase,
    config: &EngineConfig,
) -> TextAnalysis {
    let locale = language.unwrap_or_else(|| Locale::detect(text));
    if text.trim().is_empty() {
        return empty_analysis(locale);
    }
    let matches = db.match_all(text, locale);
    let stats = analyze_statistics(text, locale, config);
    aggregate(matches, &stats, locale, config, db)
}

/// Result for empty or whitespace-only input: everything zero, one "no text" hint.
pub fn empty_analysis(locale: Locale) -> TextAnalysis {
    TextAnalysis {
        human_score: 0.0,
        perplexity_score: 0.0,
        bursty_score: 0.0,
        lexical_diversity: 0.0,
        pattern_penalty: 0.0,
        ai_patterns: Vec::new(),
        suggestions: vec![Suggestion {
            kind: SuggestionKind::LowConfidence,
            message: messages(locale).no_text.to_string(),
        }],
        low_confidence: true,
        locale,
        token_count: 0,
        sentence_count: 0,
    }
}

fn build_suggestions(
    matches: &[PatternMatch],
    stats: &TextStatistics,
    penalty: f64,
    locale: Locale,
    config: &EngineConfig,
    db: &PatternDatabase,
) -> Vec<Suggestion> {
    let thresholds = &config.suggestions;
    let msg = messages(locale);
    let mut out = Vec::new();

    if stats.bursty_score < thresholds.bursty_below {
        out.push(Suggestion {
            kind: SuggestionKind::VarySentenceLength,
            message: msg.vary_length.to_string(),
        });
    }

    if penalty > thresholds.pattern_penalty_above {
        for m in top_distinct(matches, thresholds.max_rewrite_hints) {
            let alternative = db
                .entries()
                .iter()
                .find(|e| e.locale == locale && e.label == m.signature)
                .and_then(|e| e.plain.first().copied())
                .unwrap_or("");
            let message = if alternative.is_empty() {
                msg.drop_phrase.replace("{phrase}", &m.signature)
            } else {
                msg.rewrite_phrase
                    .replace("{phrase}", &m.signature)
                    .replace("{alt}", alternative)
            };
            out.push(Suggestion {
                kind: SuggestionKind::RewritePhrase,
                message,
            });
        }
    }

    if stats.lexical_diversity < thresholds.lexical_diversity_below {
        out.push(Suggestion {
            kind: SuggestionKind::VaryVocabulary,
            message: msg.vary_vocabulary.to_string(),
        });
    }

    if stats.low_confidence {
        out.push(Suggestion {
            kind: SuggestionKind::LowConfidence,
            message: msg.too_short.to_string(),
        });
    }

    out
}

/// Highest-weight distinct signatures; equal weights keep their order in the text.
fn top_distinct(matches: &[PatternMatch], limit: usize) -> Vec<&PatternMatch> {
    let mut seen = HashSet::new();
    let mut distinct: Vec<&PatternMatch> = matches
        .iter()
        .filter(|m| seen.insert(m.signature.as_str()))
        .collect();
    // stable sort keeps text order among ties
    distinct.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
    distinct.truncate(limit);
    distinct
}

struct Messages {
    vary_length: &'static str,
    rewrite_phrase: &'static str,
    drop_phrase: &'static str,
    vary_vocabulary: &'static str,
    too_short: &'static str,
    no_text: &'static str,
}

fn messages(locale: Locale) -> &'static Messages {
    static RU: Messages = Messages {
        vary_length: "Чередуйте короткие и длинные предложения: сейчас их длина слишком однородна.",
        rewrite_phrase: "Перефразируйте «{phrase}», например: «{alt}».",
        drop_phrase: "Уберите вводную фразу «{phrase}»: без неё мысль звучит прямее.",
        vary_vocabulary: "Разнообразьте лексику: в тексте много повторяющихся слов.",
        too_short: "Текст слишком короткий для надёжной оценки.",
        no_text: "Нет текста для анализа.",
    };
    static EN: Messages = Messages {
        vary_length: "Mix short and long sentences: their lengths are too uniform.",
        rewrite_phrase: "Rephrase \"{phrase}\", for example: \"{alt}\".",
        drop_phrase: "Drop the opener \"{phrase}\" and state the point directly.",
        vary_vocabulary: "Use more varied vocabulary: many words repeat.",
        too_short: "The text is too short for a reliable score.",
        no_text: "No text to analyze.",
    };
    match locale {
        Locale::Ru => &RU,
        Locale::En => &EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatternCategory;

    fn hit(signature: &str, weight: f64, start: usize) -> PatternMatch {
        PatternMatch {
            signature: signature.to_string(),
            text: signature.to_string(),
            start,
            end: start + signature.len(),
            weight,
            category: PatternCategory::Filler,
            hard_strip: false,
        }
    }

    fn stats(perplexity: f64, bursty: f64, diversity: f64) -> TextStatistics {
        TextStatistics {
            bursty_score: bursty,
            perplexity_score: perplexity,
            lexical_diversity: diversity,
            coefficient_of_variation: 0.0,
            token_count: 40,
            sentence_count: 4,
            low_confidence: false,
        }
    }

    #[test]
    fn test_penalty_counts_distinct_signatures_once() {
        let matches = vec![hit("moreover", 6.0, 0), hit("moreover", 6.0, 40), hit("delve into", 12.0, 80)];
        assert_eq!(pattern_penalty(&matches), 18.0);
        let many: Vec<PatternMatch> = (0..20).map(|i| hit(&format!("p{}", i), 15.0, i * 10)).collect();
        assert_eq!(pattern_penalty(&many), 100.0);
    }

    #[test]
    fn test_weighted_score() {
        let config = EngineConfig::default();
        let db = PatternDatabase::builtin();
        let analysis = aggregate(vec![], &stats(80.0, 60.0, 70.0), Locale::En, &config, db);
        // 0.4*80 + 0.3*60 + 0.3*100
        assert!((analysis.human_score - 80.0).abs() < 1e-9);
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn test_suggestion_order_and_rewrite_hints() {
        let config = EngineConfig::default();
        let db = PatternDatabase::builtin();
        let matches = vec![
            hit("в современном мире", 15.0, 0),
            hit("следует отметить, что", 20.0, 40),
            hit("кроме того", 8.0, 90),
        ];
        let analysis = aggregate(matches, &stats(50.0, 10.0, 20.0), Locale::Ru, &config, db);
        let kinds: Vec<SuggestionKind> = analysis.suggestions.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SuggestionKind::VarySentenceLength,
                SuggestionKind::RewritePhrase,
                SuggestionKind::RewritePhrase,
                SuggestionKind::RewritePhrase,
                SuggestionKind::VaryVocabulary,
            ]
        );
        // heaviest phrase first; its curated alternative is empty so the hint says drop it
        assert!(analysis.suggestions[1].message.contains("следует отметить"));
        assert!(analysis.suggestions[1].message.starts_with("Уберите"));
        assert!(analysis.suggestions[2].message.contains("«сегодня»"));
    }

    #[test]
    fn test_rewrite_hints_are_capped() {
        let config = EngineConfig::default();
        let db = PatternDatabase::builtin();
        let matches: Vec<PatternMatch> = (0..8).map(|i| hit(&format!("p{}", i), 10.0, i * 10)).collect();
        let analysis = aggregate(matches, &stats(90.0, 90.0, 90.0), Locale::En, &config, db);
        assert_eq!(analysis.suggestions.len(), 5);
        assert!(analysis.suggestions.iter().all(|s| s.kind == SuggestionKind::RewritePhrase));
    }

    #[test]
    fn test_analyze_with_reference_sentence() {
        let config = EngineConfig::default();
        let db = PatternDatabase::builtin();
        let text = "Следует отметить, что данный подход играет ключевую роль в современном мире.";
        let analysis = analyze_with(text, None, db, &config);
        assert_eq!(analysis.locale, Locale::Ru);
        assert_eq!(analysis.ai_patterns.len(), 3);
        assert_eq!(analysis.pattern_penalty, 50.0);
        assert!(analysis.suggestions.iter().any(|s| s.kind == SuggestionKind::RewritePhrase));
        assert_eq!(analysis, analyze_with(text, None, db, &config));
    }

    #[test]
    fn test_empty_analysis() {
        let analysis = empty_analysis(Locale::En);
        assert_eq!(analysis.human_score, 0.0);
        assert!(analysis.ai_patterns.is_empty());
        assert_eq!(analysis.suggestions.len(), 1);
        assert_eq!(analysis.suggestions[0].kind, SuggestionKind::LowConfidence);
    }
}
