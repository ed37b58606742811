// Document Blocks
// Splits masked text into body, heading and list blocks so stages only rewrite prose

use std::collections::HashSet;

use crate::models::Locale;
use crate::services::detection::reference_words::is_function_word;
use crate::services::text_processor::{
    first_word, is_heading_line, is_list_line, lowercase_first, split_paragraphs, tokenize,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BlockKind {
    Body,
    Heading,
    List,
    /// No letters at all, e.g. a paragraph that is a single code or math placeholder.
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
    pub kind: BlockKind,
}

impl Block {
    pub fn is_body(&self) -> bool {
        self.kind == BlockKind::Body
    }
}

/// Blocks in document order. Inside a paragraph, each heading or list line becomes its
/// own block and runs of other lines form body blocks.
pub fn blocks(text: &str) -> Vec<Block> {
    let mut out = Vec::new();
    for para in split_paragraphs(text) {
        let mut body_start: Option<usize> = None;
        let mut body_end = para.start;
        let mut line_start = para.start;
        for line in text[para.start..para.end].split('\n') {
            let start = line_start;
            let end = start + line.len();
            line_start = end + 1;

            let kind = if is_list_line(line) {
                Some(BlockKind::List)
            } else if is_heading_line(line) {
                Some(BlockKind::Heading)
            } else {
                None
            };
            match kind {
                Some(kind) => {
                    if let Some(bs) = body_start.take() {
                        out.push(classify(text, bs, body_end));
                    }
                    out.push(Block { start, end, kind });
                }
                None => {
                    if body_start.is_none() && !line.trim().is_empty() {
                        body_start = Some(start);
                    }
                    body_end = end;
                }
            }
        }
        if let Some(bs) = body_start {
            out.push(classify(text, bs, body_end));
        }
    }
    out
}

fn classify(text: &str, start: usize, end: usize) -> Block {
    let kind = if text[start..end].chars().any(|c| c.is_alphabetic()) {
        BlockKind::Body
    } else {
        BlockKind::Opaque
    };
    Block { start, end, kind }
}

/// Rebuild `text` with `f` applied to every block; bytes between blocks are copied verbatim.
pub fn map_blocks<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&Block, &str) -> String,
{
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut cursor = 0usize;
    for block in blocks(text) {
        out.push_str(&text[cursor..block.start]);
        out.push_str(&f(&block, &text[block.start..block.end]));
        cursor = block.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Like [`map_blocks`] but only body blocks are handed to `f`.
pub fn map_body_blocks<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    map_blocks(text, |block, slice| {
        if block.is_body() {
            f(slice)
        } else {
            slice.to_string()
        }
    })
}

/// Word forms the document itself writes in lowercase.
pub fn lowercase_vocabulary(text: &str) -> HashSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !t.text.chars().any(|c| c.is_uppercase()))
        .map(|t| t.text.to_string())
        .collect()
}

/// Lowercase the first word of a sentence that is about to lose its initial position.
/// Only function words and words the document also writes in lowercase are touched,
/// so names and acronyms keep their capitals.
pub fn soften_initial(sentence: &str, locale: Locale, vocabulary: &HashSet<String>) -> String {
    let Some(word) = first_word(sentence) else {
        return sentence.to_string();
    };
    let upper_count = word.chars().filter(|c| c.is_uppercase()).count();
    if upper_count != 1 || !word.chars().next().map(|c| c.is_uppercase()).unwrap_or(false) {
        return sentence.to_string();
    }
    let lower = word.to_lowercase();
    if is_function_word(&lower, locale) || vocabulary.contains(&lower) {
        lowercase_first(sentence)
    } else {
        sentence.to_string()
    }
}
