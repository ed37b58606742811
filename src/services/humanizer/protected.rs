// Protected Spans
// Locates math, code, quotes, citations, URLs and numbers, and swaps them for
// opaque placeholder tokens that no later stage can read or split.
//
// A placeholder is U+E000, the span index written with U+E010..U+E019 as digits,
// then U+E001. None of these chars is a letter, digit, space or punctuation mark.

use regex::Regex;
use std::sync::OnceLock;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';
const DIGIT_BASE: u32 = 0xE010;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpanKind {
    FencedCode,
    BlockMath,
    InlineCode,
    InlineMath,
    Quote,
    Url,
    Citation,
    Number,
    /// Private-use chars already present in the input.
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

impl ProtectedSpan {
    fn overlaps(&self, other: &ProtectedSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    fn contains(&self, other: &ProtectedSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

fn span_rules() -> &'static [(SpanKind, Regex)] {
    static RULES: OnceLock<Vec<(SpanKind, Regex)>> = OnceLock::new();
    RULES.get_or_init(|| {
        let rule = |kind: SpanKind, pattern: &str| {
            (kind, Regex::new(pattern).expect("protected span regex"))
        };
        // Earlier rules win; a later span may only absorb spans it fully contains.
        vec![
            rule(SpanKind::Reserved, r"[\u{E000}-\u{E01F}]+"),
            rule(SpanKind::FencedCode, r"(?ms)^[ \t]*```.*?(?:^[ \t]*```[^\n]*$|\z)"),
            rule(SpanKind::FencedCode, r"(?ms)^[ \t]*~~~.*?(?:^[ \t]*~~~[^\n]*$|\z)"),
            rule(SpanKind::BlockMath, r"(?s)\$\$.+?\$\$"),
            rule(SpanKind::InlineCode, r"`[^`\n]+`"),
            rule(SpanKind::InlineMath, r"\$[^$\n]+\$"),
            rule(SpanKind::Quote, r#""[^"\n]*"|«[^»]*»|“[^”]*”"#),
            rule(SpanKind::Url, r#"(?i)\b(?:https?://|www\.)[^\s<>"«»]*[^\s<>"«».,;:!?)\]]"#),
            rule(SpanKind::Citation, r"\[\d+(?:\s*[,;–-]\s*\d+)*\]"),
            rule(SpanKind::Citation, r"\(\p{Lu}[^()\n]{0,80}?,?\s*\d{4}[a-z]?(?:\s*[;,]\s*[^()\n]{0,80}?\d{4}[a-z]?)*\)"),
            rule(SpanKind::Citation, r"\p{Lu}[\p{L}\-]+\s+et\s+al\.(?:\s*\(\d{4}[a-z]?\))?"),
            rule(SpanKind::Number, r"\d+(?:[.,]\d+)*%?"),
        ]
    })
}

/// Non-overlapping protected spans sorted by start offset.
pub fn find_protected_spans(text: &str) -> Vec<ProtectedSpan> {
    let mut accepted: Vec<ProtectedSpan> = Vec::new();
    for (kind, re) in span_rules() {
        for m in re.find_iter(text) {
            if m.start() == m.end() {
                continue;
            }
            let cand = ProtectedSpan {
                start: m.start(),
                end: m.end(),
                kind: *kind,
            };
            let mut overlapping = accepted.iter().filter(|a| a.overlaps(&cand)).peekable();
            let free = overlapping.peek().is_none();
            let absorbs = overlapping.all(|a| cand.contains(a));
            if free {
                accepted.push(cand);
            } else if absorbs {
                accepted.retain(|a| !cand.contains(a));
                accepted.push(cand);
            }
        }
    }
    accepted.sort_by_key(|s| s.start);
    accepted
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("\u{E000}([\u{E010}-\u{E019}]+)\u{E001}").expect("placeholder regex"))
}

pub fn placeholder(index: usize) -> String {
    let mut out = String::new();
    out.push(OPEN);
    for d in index.to_string().chars() {
        let digit = d.to_digit(10).unwrap_or(0);
        out.extend(char::from_u32(DIGIT_BASE + digit));
    }
    out.push(CLOSE);
    out
}

fn placeholder_index(digits: &str) -> Option<usize> {
    let decimal: String = digits
        .chars()
        .filter_map(|c| char::from_digit((c as u32).checked_sub(DIGIT_BASE)?, 10))
        .collect();
    decimal.parse().ok()
}

/// Text with every protected span replaced by a placeholder, plus the originals.
#[derive(Debug, Clone)]
pub struct MaskedText {
    pub text: String,
    originals: Vec<String>,
}

impl MaskedText {
    pub fn span_count(&self) -> usize {
        self.originals.len()
    }

    /// Swap placeholders back for the original bytes. Single pass, so original
    /// content that looks like a placeholder is never expanded again.
    pub fn restore(&self, text: &str) -> String {
        placeholder_re()
            .replace_all(text, |caps: &regex::Captures| {
                placeholder_index(&caps[1])
                    .and_then(|i| self.originals.get(i))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

pub fn mask(text: &str) -> MaskedText {
    let spans = find_protected_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut originals = Vec::with_capacity(spans.len());
    let mut cursor = 0usize;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(&placeholder(originals.len()));
        originals.push(text[span.start..span.end].to_string());
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    MaskedText {
        text: out,
        originals,
    }
}

pub fn is_placeholder_char(c: char) -> bool {
    ('\u{E000}'..='\u{E01F}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(SpanKind, &str)> {
        find_protected_spans(text)
            .into_iter()
            .map(|s| (s.kind, &text[s.start..s.end]))
            .collect()
    }

    #[test]
    fn test_math_code_and_quotes() {
        let text = "Формула $x^2+1$ и код `let x = 1;`, а также «цитата 5.»";
        assert_eq!(
            kinds(text),
            vec![
                (SpanKind::InlineMath, "$x^2+1$"),
                (SpanKind::InlineCode, "`let x = 1;`"),
                (SpanKind::Quote, "«цитата 5.»"),
            ]
        );
    }

    #[test]
    fn test_fenced_code_block() {
        let text = "Intro.\n\n```rust\nfn main() { println!(\"2 + 2\"); }\n```\n\nOutro 42.";
        let spans = kinds(text);
        assert_eq!(spans[0].0, SpanKind::FencedCode);
        assert!(spans[0].1.ends_with("```"));
        assert_eq!(spans[1], (SpanKind::Number, "42"));
    }

    #[test]
    fn test_citations_urls_numbers() {
        let text = "See [1, 3-5] and (Smith et al., 2020) or https://example.org/a?b=1. Also 3,14 and 15%.";
        let spans = kinds(text);
        assert_eq!(spans[0], (SpanKind::Citation, "[1, 3-5]"));
        assert_eq!(spans[1], (SpanKind::Citation, "(Smith et al., 2020)"));
        assert_eq!(spans[2], (SpanKind::Url, "https://example.org/a?b=1"));
        assert_eq!(spans[3], (SpanKind::Number, "3,14"));
        assert_eq!(spans[4], (SpanKind::Number, "15%"));
    }

    #[test]
    fn test_quote_absorbs_contained_spans() {
        let text = "He said \"use $a$ here\" twice.";
        assert_eq!(kinds(text), vec![(SpanKind::Quote, "\"use $a$ here\"")]);
    }

    #[test]
    fn test_mask_and_restore() {
        let text = "Значение $$E = mc^2$$ равно 12 (Иванов, 2019).";
        let masked = mask(text);
        assert_eq!(masked.span_count(), 3);
        assert!(!masked.text.contains('$'));
        assert!(!masked.text.chars().any(|c| c.is_ascii_digit()));
        assert_eq!(masked.restore(&masked.text), text);
    }

    #[test]
    fn test_reserved_chars_survive() {
        let text = format!("odd {} input 7", placeholder(0));
        let masked = mask(&text);
        assert_eq!(masked.restore(&masked.text), text);
    }

    #[test]
    fn test_placeholder_is_opaque() {
        let p = placeholder(1207);
        assert!(p.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace() && !c.is_ascii_punctuation()));
        assert_eq!(placeholder_index(&p[3..p.len() - 3]), Some(1207));
    }
}
