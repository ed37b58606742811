// Discourse & Opinion Injection
// Connective markers, em-dash asides and first-person-plural stance phrases

use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

use super::document::{blocks, map_body_blocks, soften_initial};
use crate::models::Locale;
use crate::services::text_processor::{count_words, first_word, split_sentences_advanced, SentenceOffset};

const MIN_MARKED_SENTENCE: usize = 4;
const MIN_ASIDE_SENTENCE: usize = 8;
const MIN_OPINION_PARAGRAPH: usize = 8;

pub fn discourse_markers(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::Ru => &["И", "Но", "Впрочем,", "Причём", "Кстати,", "При этом", "Между тем,"],
        Locale::En => &["And", "But", "Still,", "Yet", "Granted,"],
    }
}

const RU_ASIDES: &[&str] = &[" — что немаловажно", " — и это существенно", " — по крайней мере отчасти", " — в известной мере"];
const EN_ASIDES: &[&str] = &[" — and this matters", " — which is no small point", " — at least in part", " — to a degree"];
/// Leading asides that only add emphasis; the rest hedge the claim.
const EMPHASIS_ASIDES: usize = 2;

/// Em-dash asides; `preserve_meaning` keeps only the ones that leave the claim as stated.
pub fn parentheticals(locale: Locale, preserve_meaning: bool) -> &'static [&'static str] {
    let all = match locale {
        Locale::Ru => RU_ASIDES,
        Locale::En => EN_ASIDES,
    };
    if preserve_meaning {
        &all[..EMPHASIS_ASIDES]
    } else {
        all
    }
}

pub fn opinion_phrases(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::Ru => &["На наш взгляд,", "Мы полагаем, что", "Как нам представляется,", "По нашему мнению,"],
        Locale::En => &["In our view,", "We would argue that", "As we see it,"],
    }
}

/// Starts with something this module would have inserted.
fn already_marked(sentence: &str, locale: Locale) -> bool {
    let lower = sentence.to_lowercase();
    discourse_markers(locale)
        .iter()
        .chain(opinion_phrases(locale).iter())
        .any(|m| {
            let head = m.trim_end_matches(',').to_lowercase();
            lower.starts_with(&head)
                && lower[head.len()..].chars().next().map(|c| !c.is_alphanumeric()).unwrap_or(true)
        })
}

/// Sentences (within one body block) that may take a leading marker.
fn eligible_sentences(block: &str, locale: Locale) -> Vec<SentenceOffset> {
    split_sentences_advanced(block)
        .into_iter()
        .enumerate()
        .filter(|(i, s)| {
            *i > 0
                && first_word(&s.text).is_some()
                && count_words(&s.text) >= MIN_MARKED_SENTENCE
                && !already_marked(&s.text, locale)
        })
        .map(|(_, s)| s)
        .collect()
}

fn body_sentence_count(text: &str) -> usize {
    blocks(text)
        .iter()
        .filter(|b| b.is_body())
        .map(|b| split_sentences_advanced(&text[b.start..b.end]).len())
        .sum()
}

/// Prefix `phrase` to `sentence`, lowering its first word when that is safe.
fn prefix_sentence(phrase: &str, sentence: &str, locale: Locale, vocabulary: &HashSet<String>) -> String {
    format!("{} {}", phrase, soften_initial(sentence, locale, vocabulary))
}

/// Rewrite the sentences at the given byte offsets inside one block.
fn rewrite_sentences<F>(block: &str, targets: &[SentenceOffset], mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(block.len() + 32);
    let mut cursor = 0usize;
    for s in targets {
        out.push_str(&block[cursor..s.start]);
        out.push_str(&f(&block[s.start..s.end]));
        cursor = s.end;
    }
    out.push_str(&block[cursor..]);
    out
}

/// Prepend discourse markers to at most `floor(eligible * intensity * fraction)` sentences.
pub fn inject_discourse_markers<R: Rng + ?Sized>(
    text: &str,
    locale: Locale,
    intensity: f64,
    fraction: f64,
    vocabulary: &HashSet<String>,
    rng: &mut R,
) -> (String, usize) {
    let eligible_total: usize = blocks(text)
        .iter()
        .filter(|b| b.is_body())
        .map(|b| eligible_sentences(&text[b.start..b.end], locale).len())
        .sum();
    let budget = ((eligible_total as f64 * intensity * fraction).floor() as usize).min(eligible_total);
    if budget == 0 {
        return (text.to_string(), 0);
    }

    let chosen: HashSet<usize> = index::sample(rng, eligible_total, budget).into_iter().collect();
    let markers = discourse_markers(locale);
    let mut seen = 0usize;
    let mut last_marker = "";
    let out = map_body_blocks(text, |block| {
        let eligible = eligible_sentences(block, locale);
        let picked: Vec<SentenceOffset> = eligible
            .into_iter()
            .filter(|_| {
                let hit = chosen.contains(&seen);
                seen += 1;
                hit
            })
            .collect();
        rewrite_sentences(block, &picked, |sentence| {
            let options: Vec<&&str> = markers.iter().filter(|m| **m != last_marker).collect();
            let marker = options.choose(rng).map(|m| **m).unwrap_or(markers[0]);
            last_marker = marker;
            prefix_sentence(marker, sentence, locale, vocabulary)
        })
    });
    (out, budget)
}

/// Em-dash asides before the terminal punctuation of long sentences.
/// At most `max(1, sentences * intensity / 10)` are inserted.
pub fn inject_parentheticals<R: Rng + ?Sized>(
    text: &str,
    locale: Locale,
    intensity: f64,
    preserve_meaning: bool,
    rng: &mut R,
) -> (String, usize) {
    let limit = ((body_sentence_count(text) as f64 * intensity / 10.0).floor() as usize).max(1);
    let candidate_count: usize = blocks(text)
        .iter()
        .filter(|b| b.is_body())
        .map(|b| aside_candidates(&text[b.start..b.end]).len())
        .sum();
    let budget = limit.min(candidate_count);
    if budget == 0 {
        return (text.to_string(), 0);
    }

    let chosen: HashSet<usize> = index::sample(rng, candidate_count, budget).into_iter().collect();
    let phrases = parentheticals(locale, preserve_meaning);
    let mut seen = 0usize;
    let out = map_body_blocks(text, |block| {
        let picked: Vec<SentenceOffset> = aside_candidates(block)
            .into_iter()
            .filter(|_| {
                let hit = chosen.contains(&seen);
                seen += 1;
                hit
            })
            .collect();
        rewrite_sentences(block, &picked, |sentence| {
            let phrase = phrases.choose(rng).copied().unwrap_or(phrases[0]);
            let body = sentence.trim_end_matches('.');
            format!("{}{}.", body, phrase)
        })
    });
    (out, budget)
}

fn aside_candidates(block: &str) -> Vec<SentenceOffset> {
    split_sentences_advanced(block)
        .into_iter()
        .filter(|s| {
            s.text.ends_with('.')
                && !s.text.ends_with("..")
                && !s.text.contains('—')
                && count_words(&s.text) >= MIN_ASIDE_SENTENCE
        })
        .collect()
}

/// Stance phrase at the start of body paragraphs, each with probability `intensity / 2`.
pub fn inject_opinions<R: Rng + ?Sized>(
    text: &str,
    locale: Locale,
    intensity: f64,
    vocabulary: &HashSet<String>,
    rng: &mut R,
) -> (String, usize) {
    let probability = (intensity / 2.0).clamp(0.0, 1.0);
    let phrases = opinion_phrases(locale);
    let mut inserted = 0usize;
    let out = map_body_blocks(text, |block| {
        let Some(first) = split_sentences_advanced(block).into_iter().next() else {
            return block.to_string();
        };
        let eligible = count_words(block) >= MIN_OPINION_PARAGRAPH
            && first_word(&first.text).is_some()
            && !already_marked(&first.text, locale);
        if !eligible || !rng.gen_bool(probability) {
            return block.to_string();
        }
        let phrase = phrases.choose(rng).copied().unwrap_or(phrases[0]);
        inserted += 1;
        rewrite_sentences(block, &[first], |sentence| prefix_sentence(phrase, sentence, locale, vocabulary))
    });
    (out, inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::detection::PatternDatabase;
    use crate::services::humanizer::document::lowercase_vocabulary;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RU_TEXT: &str = "Исследование проводилось в течение года. Участники заполняли анкеты каждую неделю. \
        Ответы затем сверялись с журналами наблюдений. Эти данные легли в основу отчёта. \
        Итоговая выборка оказалась заметно больше плановой. Это позволило уточнить выводы.";

    #[test]
    fn test_discourse_budget_is_respected() {
        let vocab = lowercase_vocabulary(RU_TEXT);
        let mut rng = StdRng::seed_from_u64(42);
        // five eligible sentences, 5 * 0.8 * 0.3 = 1.2 -> 1
        let (out, n) = inject_discourse_markers(RU_TEXT, Locale::Ru, 0.8, 0.3, &vocab, &mut rng);
        assert_eq!(n, 1);
        let marked = split_sentences_advanced(&out)
            .iter()
            .filter(|s| already_marked(&s.text, Locale::Ru))
            .count();
        assert_eq!(marked, 1);
        assert!(out.starts_with("Исследование"));
    }

    #[test]
    fn test_discourse_zero_intensity_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let (out, n) = inject_discourse_markers(RU_TEXT, Locale::Ru, 0.0, 0.3, &HashSet::new(), &mut rng);
        assert_eq!(n, 0);
        assert_eq!(out, RU_TEXT);
    }

    #[test]
    fn test_parenthetical_bound() {
        let text = "The committee reviewed every single proposal during the long autumn session. \
            Several members raised concerns about the budget for the coming year.";
        let mut rng = StdRng::seed_from_u64(5);
        let (out, n) = inject_parentheticals(text, Locale::En, 0.5, true, &mut rng);
        assert_eq!(n, 1);
        assert_eq!(out.matches('—').count(), 1);
        assert!(parentheticals(Locale::En, true).iter().any(|p| out.contains(p)));
    }

    #[test]
    fn test_preserve_meaning_drops_hedging_asides() {
        for locale in Locale::ALL {
            let emphasis = parentheticals(locale, true);
            let all = parentheticals(locale, false);
            assert!(!emphasis.is_empty());
            assert!(emphasis.len() < all.len());
            assert!(all.starts_with(emphasis));
        }
        assert!(!parentheticals(Locale::En, true).contains(&" — at least in part"));
    }

    #[test]
    fn test_opinion_at_most_one_per_paragraph() {
        let text = "The survey covered four regions and more than two thousand households overall.\n\n\
            Response rates were high in the north and noticeably lower in the south.";
        let vocab = lowercase_vocabulary(text);
        let mut rng = StdRng::seed_from_u64(9);
        // probability 1.0 marks every eligible paragraph exactly once
        let (out, n) = inject_opinions(text, Locale::En, 2.0, &vocab, &mut rng);
        assert_eq!(n, 2);
        for para in out.split("\n\n") {
            let starts = opinion_phrases(Locale::En).iter().filter(|p| para.starts_with(**p)).count();
            assert_eq!(starts, 1, "{}", para);
        }
        assert!(out.contains("the survey covered") || out.contains("The survey covered"));
    }

    #[test]
    fn test_opinion_skips_headings() {
        let text = "# Results\n\nThe survey covered four regions and more than two thousand households overall.";
        let mut rng = StdRng::seed_from_u64(2);
        let (out, _) = inject_opinions(text, Locale::En, 2.0, &HashSet::new(), &mut rng);
        assert!(out.starts_with("# Results\n\n"));
    }

    #[test]
    fn test_inserted_phrases_are_not_ai_tells() {
        let db = PatternDatabase::builtin();
        for locale in Locale::ALL {
            for phrase in discourse_markers(locale)
                .iter()
                .chain(parentheticals(locale, false).iter())
                .chain(opinion_phrases(locale).iter())
            {
                let probe = format!("{} text", phrase);
                assert!(db.match_all(&probe, locale).is_empty(), "{}", phrase);
            }
        }
    }
}
