// Source Injector
// Appends author-year markers to body paragraphs from a discipline citation pool.
//
// The markers are cosmetic: nothing checks that the cited work supports the sentence.

use rand::seq::SliceRandom;
use rand::Rng;

use super::document::map_body_blocks;
use super::protected::{is_placeholder_char, mask};
use crate::models::Locale;
use crate::services::discipline_catalog::{citation_pool, CitationSource};
use crate::services::text_processor::count_words;

pub const DEFAULT_WORDS_PER_CITATION: usize = 150;

pub fn format_marker(source: &CitationSource, locale: Locale) -> String {
    format!("({}, {})", source.author(locale), source.year)
}

/// Insert `marker` before the paragraph's terminal punctuation run.
/// Returns `None` when the paragraph does not end a sentence or already ends on a
/// protected span such as an existing citation.
fn insert_before_terminal(paragraph: &str, marker: &str) -> Option<String> {
    let trimmed = paragraph.trim_end();
    let body = trimmed.trim_end_matches(['.', '!', '?', '…']);
    if body.len() == trimmed.len() {
        return None;
    }
    match body.chars().last() {
        Some(c) if is_placeholder_char(c) || c == ')' || c == ']' => None,
        Some(c) if c.is_whitespace() => None,
        None => None,
        Some(_) => Some(format!("{} {}{}", body, marker, &paragraph[body.len()..])),
    }
}

/// Works on text whose protected spans are already masked.
pub(crate) fn inject_into_masked<R: Rng + ?Sized>(
    text: &str,
    discipline_hint: Option<&str>,
    locale: Locale,
    words_per_citation: usize,
    rng: &mut R,
) -> (String, usize) {
    let pool = citation_pool(discipline_hint);
    if pool.is_empty() {
        return (text.to_string(), 0);
    }
    let mut since_last = 0usize;
    let mut inserted = 0usize;
    let mut last_author: Option<&str> = None;
    let out = map_body_blocks(text, |block| {
        since_last += count_words(block);
        if since_last < words_per_citation.max(1) {
            return block.to_string();
        }
        let options: Vec<&CitationSource> = pool
            .iter()
            .filter(|s| Some(s.latin.as_str()) != last_author)
            .collect();
        let Some(source) = options.choose(rng).copied() else {
            return block.to_string();
        };
        match insert_before_terminal(block, &format_marker(source, locale)) {
            Some(updated) => {
                since_last = 0;
                inserted += 1;
                last_author = Some(source.latin.as_str());
                updated
            }
            None => block.to_string(),
        }
    });
    (out, inserted)
}

/// Add `(Author, Year)` markers to body paragraphs, at most one per ~150 words of
/// running text, never inside protected spans or headings.
pub fn inject_citations<R: Rng + ?Sized>(
    text: &str,
    discipline_hint: Option<&str>,
    locale: Locale,
    rng: &mut R,
) -> String {
    let masked = mask(text);
    let (out, _) = inject_into_masked(&masked.text, discipline_hint, locale, DEFAULT_WORDS_PER_CITATION, rng);
    masked.restore(&out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn paragraph(words: usize) -> String {
        let mut s = vec!["анализ"; words].join(" ");
        s = crate::services::text_processor::capitalize_first(&s);
        s.push('.');
        s
    }

    #[test]
    fn test_marker_format() {
        let pool = citation_pool(Some("psychology"));
        assert_eq!(format_marker(&pool[0], Locale::Ru), "(Выготский, 1934)");
        assert_eq!(format_marker(&pool[0], Locale::En), "(Vygotsky, 1934)");
    }

    #[test]
    fn test_insert_before_terminal() {
        assert_eq!(
            insert_before_terminal("Текст абзаца.", "(Кун, 1962)").as_deref(),
            Some("Текст абзаца (Кун, 1962).")
        );
        assert_eq!(insert_before_terminal("Заголовок без точки", "(Кун, 1962)"), None);
        assert_eq!(insert_before_terminal("Already cited (Kuhn, 1962).", "(Popper, 1959)"), None);
    }

    #[test]
    fn test_one_marker_per_word_window() {
        let text = [paragraph(100), paragraph(100), paragraph(100), paragraph(100)].join("\n\n");
        let mut rng = StdRng::seed_from_u64(4);
        let out = inject_citations(&text, Some("психология"), Locale::Ru, &mut rng);
        // markers land after 200 and 400 words
        let paragraphs: Vec<&str> = out.split("\n\n").collect();
        assert!(!paragraphs[0].contains('('));
        assert!(paragraphs[1].contains('('));
        assert!(!paragraphs[2].contains('('));
        assert!(paragraphs[3].contains('('));
        let pool = citation_pool(Some("psychology"));
        assert!(pool.iter().any(|s| paragraphs[1].contains(&s.cyrillic)));
    }

    #[test]
    fn test_headings_and_short_texts_untouched() {
        let mut rng = StdRng::seed_from_u64(8);
        let text = format!("# {}\n\n{}", "Введение", paragraph(20));
        assert_eq!(inject_citations(&text, None, Locale::Ru, &mut rng), text);
    }
}
