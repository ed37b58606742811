// Text Processing Service
// Tokenization, sentence/paragraph segmentation and small casing helpers

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*").expect("word regex")
    })
}

fn paragraph_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n\s*").expect("paragraph regex"))
}

fn numbered_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(\d+(\.\d+)*\.?\s|(глава|раздел|часть|chapter|section|part)\s+[\dIVXLC]+)",
        )
        .expect("numbered heading regex")
    })
}

fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([-*•–]|\d+[.)])\s+").expect("list item regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Word tokens: maximal runs of letters/digits, joined across inner apostrophes and hyphens.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    word_re()
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Lowercased word tokens, the unit every statistic is computed over.
pub fn normalized_tokens(text: &str) -> Vec<String> {
    word_re()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn count_words(text: &str) -> usize {
    word_re().find_iter(text).count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceOffset {
    pub text: String,
    /// UTF-8 byte offset of the first non-space char.
    pub start: usize,
    /// UTF-8 byte offset, end-exclusive, after the terminal punctuation.
    pub end: usize,
}

const ABBREVIATIONS: &[&str] = &[
    "т", "е", "д", "п", "г", "гг", "см", "стр", "рис", "табл", "др", "пр", "им", "англ",
    "e.g", "i.e", "etc", "vs", "dr", "mr", "mrs", "ms", "prof", "fig", "no", "al", "approx",
];

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '…' | '。' | '！' | '？')
}

fn is_closing(ch: char) -> bool {
    matches!(ch, '"' | '»' | '”' | '’' | ')' | ']' | '\'')
}

/// Word immediately before byte offset `at`, used for abbreviation checks.
fn word_before(text: &str, at: usize) -> &str {
    let head = &text[..at];
    let start = head
        .char_indices()
        .rev()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '.'))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &head[start..]
}

/// Sentence splitting with byte-offset tracking.
///
/// A run of terminators ends a sentence when it is followed by whitespace and the next
/// visible char is not lowercase. Decimal points, known abbreviations, single-letter
/// initials and terminators inside double quotes/guillemets do not split.
pub fn split_sentences_advanced(text: &str) -> Vec<SentenceOffset> {
    let mut sentences = Vec::new();
    if text.trim().is_empty() {
        return sentences;
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut seg_start = 0usize;
    let mut quote_depth = 0i32;
    let mut straight_open = false;
    let mut i = 0usize;

    while i < chars.len() {
        let (pos, ch) = chars[i];
        match ch {
            '«' | '“' => quote_depth += 1,
            '»' | '”' => quote_depth = (quote_depth - 1).max(0),
            '"' => straight_open = !straight_open,
            '\n' => {
                quote_depth = 0;
                straight_open = false;
            }
            _ => {}
        }

        if !is_terminator(ch) || quote_depth > 0 || straight_open {
            i += 1;
            continue;
        }

        // Decimal numbers
        if ch == '.'
            && i > 0
            && i + 1 < chars.len()
            && chars[i - 1].1.is_ascii_digit()
            && chars[i + 1].1.is_ascii_digit()
        {
            i += 1;
            continue;
        }

        if ch == '.' {
            let word = word_before(text, pos).trim_end_matches('.').to_lowercase();
            let is_initial = word.chars().count() == 1 && word.chars().all(|c| c.is_alphabetic());
            if is_initial || ABBREVIATIONS.contains(&word.as_str()) {
                i += 1;
                continue;
            }
        }

        // Consume the terminator run and any closing quotes/brackets.
        let mut j = i + 1;
        while j < chars.len() && (is_terminator(chars[j].1) || is_closing(chars[j].1)) {
            j += 1;
        }
        let end = chars.get(j).map(|(p, _)| *p).unwrap_or(text.len());

        // Require whitespace (or end of text) and a non-lowercase continuation.
        let mut k = j;
        while k < chars.len() && chars[k].1.is_whitespace() {
            k += 1;
        }
        let at_end = k >= chars.len();
        let boundary = at_end || (k > j && !chars[k].1.is_lowercase());
        if boundary {
            push_sentence(text, seg_start, end, &mut sentences);
            seg_start = end;
        }
        i = j;
    }

    if seg_start < text.len() {
        push_sentence(text, seg_start, text.len(), &mut sentences);
    }

    sentences
}

fn push_sentence(text: &str, start: usize, end: usize, out: &mut Vec<SentenceOffset>) {
    let raw = &text[start..end];
    let trimmed_start = raw.len() - raw.trim_start().len();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let s = start + trimmed_start;
    out.push(SentenceOffset {
        text: trimmed.to_string(),
        start: s,
        end: s + trimmed.len(),
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphSpan {
    pub start: usize,
    pub end: usize,
}

/// Paragraphs separated by blank lines; offsets exclude surrounding whitespace.
pub fn split_paragraphs(text: &str) -> Vec<ParagraphSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0usize;
    let push = |from: usize, to: usize, spans: &mut Vec<ParagraphSpan>| {
        let raw = &text[from..to];
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let start = from + (raw.len() - raw.trim_start().len());
        spans.push(ParagraphSpan {
            start,
            end: start + trimmed.len(),
        });
    };
    for m in paragraph_break_re().find_iter(text) {
        push(cursor, m.start(), &mut spans);
        cursor = m.end();
    }
    push(cursor, text.len(), &mut spans);
    spans
}

/// Sentences of every paragraph, never crossing a blank line.
pub fn split_document_sentences(text: &str) -> Vec<SentenceOffset> {
    let mut out = Vec::new();
    for para in split_paragraphs(text) {
        for mut s in split_sentences_advanced(&text[para.start..para.end]) {
            s.start += para.start;
            s.end += para.start;
            out.push(s);
        }
    }
    out
}

fn has_sentence_end_punctuation(s: &str) -> bool {
    s.trim_end()
        .chars()
        .last()
        .map(|c| is_terminator(c) || matches!(c, ':' | ';'))
        .unwrap_or(false)
}

/// Headings: markdown `#` lines, numbered section titles, or short unpunctuated lines.
pub fn is_heading_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.starts_with('#') {
        return true;
    }
    let char_count = trimmed.chars().count();
    if char_count > 80 || has_sentence_end_punctuation(trimmed) {
        return false;
    }
    if numbered_heading_re().is_match(trimmed) {
        return true;
    }
    if char_count <= 60 {
        let alpha_count = trimmed.chars().filter(|c| c.is_alphabetic()).count();
        let non_ws = trimmed.chars().filter(|c| !c.is_whitespace()).count();
        return alpha_count as f64 / non_ws.max(1) as f64 > 0.6;
    }
    false
}

pub fn is_list_line(line: &str) -> bool {
    list_item_re().is_match(line)
}

/// Uppercase the first alphabetic char if it starts the string (after leading spaces).
pub fn capitalize_first(s: &str) -> String {
    change_first_letter(s, true)
}

pub fn lowercase_first(s: &str) -> String {
    change_first_letter(s, false)
}

fn change_first_letter(s: &str, upper: bool) -> String {
    let lead = s.len() - s.trim_start().len();
    let rest = &s[lead..];
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push_str(&s[..lead]);
            if upper {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            out.push_str(chars.as_str());
            out
        }
        _ => s.to_string(),
    }
}

pub fn first_word(s: &str) -> Option<&str> {
    word_re().find(s).filter(|m| s[..m.start()].trim().is_empty()).map(|m| m.as_str())
}
