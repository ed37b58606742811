// Discipline Catalog
// Citation pools keyed by academic discipline, loaded from data/citation_pool.json

use serde::Deserialize;
use std::sync::OnceLock;

use crate::models::Locale;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CitationSource {
    pub latin: String,
    pub cyrillic: String,
    pub year: u16,
}

impl CitationSource {
    /// Author name in the script of the text.
    pub fn author(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ru => &self.cyrillic,
            Locale::En => &self.latin,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[allow(dead_code)]
    version: u32,
    disciplines: Vec<DisciplineEntry>,
    general: Vec<CitationSource>,
}

#[derive(Debug, Deserialize)]
struct DisciplineEntry {
    key: String,
    /// Lowercase stems; a hint matches when it contains one of them.
    synonyms: Vec<String>,
    sources: Vec<CitationSource>,
}

static CATALOG: OnceLock<CatalogFile> = OnceLock::new();

fn catalog() -> &'static CatalogFile {
    CATALOG.get_or_init(|| {
        let raw = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/citation_pool.json"));
        serde_json::from_str(raw).expect("citation_pool.json parse failed")
    })
}

/// Map a free-form hint ("Психология", "computer science", "экономика труда")
/// to a catalog key. Unknown hints yield `None`.
pub fn normalize_discipline(hint: &str) -> Option<&'static str> {
    let hint = hint.trim().to_lowercase().replace(['_', '-'], " ");
    if hint.is_empty() {
        return None;
    }
    let catalog = catalog();
    if let Some(exact) = catalog.disciplines.iter().find(|d| d.key.replace('_', " ") == hint) {
        return Some(exact.key.as_str());
    }
    catalog
        .disciplines
        .iter()
        .find(|d| d.synonyms.iter().any(|s| hint.contains(s.as_str())))
        .map(|d| d.key.as_str())
}

/// Sources for the hinted discipline, or the general pool.
pub fn citation_pool(hint: Option<&str>) -> &'static [CitationSource] {
    let catalog = catalog();
    hint.and_then(normalize_discipline)
        .and_then(|key| catalog.disciplines.iter().find(|d| d.key == key))
        .map(|d| d.sources.as_slice())
        .unwrap_or(catalog.general.as_slice())
}

pub fn discipline_keys() -> Vec<&'static str> {
    catalog().disciplines.iter().map(|d| d.key.as_str()).collect()
}
