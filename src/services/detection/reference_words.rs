// Reference Function-Word Frequencies
// Top-60 word forms per locale with approximate relative corpus frequencies.

use crate::models::Locale;
use std::collections::HashMap;
use std::sync::OnceLock;

static RU_TOP: &[(&str, f64)] = &[
    ("и", 0.0390), ("в", 0.0320), ("не", 0.0180), ("на", 0.0160), ("что", 0.0120),
    ("я", 0.0110), ("с", 0.0110), ("он", 0.0095), ("а", 0.0085), ("как", 0.0075),
    ("это", 0.0070), ("по", 0.0068), ("к", 0.0060), ("но", 0.0058), ("из", 0.0050),
    ("у", 0.0048), ("за", 0.0045), ("то", 0.0045), ("от", 0.0042), ("так", 0.0040),
    ("для", 0.0038), ("же", 0.0037), ("все", 0.0036), ("она", 0.0035), ("мы", 0.0033),
    ("они", 0.0032), ("о", 0.0032), ("вы", 0.0030), ("бы", 0.0030), ("только", 0.0028),
    ("его", 0.0028), ("ее", 0.0022), ("её", 0.0022), ("их", 0.0022), ("был", 0.0022),
    ("была", 0.0018), ("было", 0.0020), ("ли", 0.0020), ("уже", 0.0020), ("или", 0.0019),
    ("при", 0.0018), ("до", 0.0018), ("если", 0.0017), ("этот", 0.0016), ("который", 0.0015),
    ("может", 0.0014), ("также", 0.0014), ("есть", 0.0014), ("этого", 0.0013), ("этом", 0.0012),
    ("там", 0.0012), ("очень", 0.0012), ("более", 0.0011), ("данный", 0.0006), ("является", 0.0007),
    ("которые", 0.0011), ("когда", 0.0011), ("чтобы", 0.0011), ("где", 0.0009), ("этих", 0.0008),
];

static EN_TOP: &[(&str, f64)] = &[
    ("the", 0.0600), ("of", 0.0300), ("and", 0.0280), ("to", 0.0260), ("a", 0.0220),
    ("in", 0.0190), ("is", 0.0100), ("that", 0.0100), ("it", 0.0090), ("for", 0.0085),
    ("was", 0.0080), ("on", 0.0065), ("as", 0.0062), ("with", 0.0060), ("be", 0.0058),
    ("by", 0.0050), ("this", 0.0050), ("are", 0.0045), ("at", 0.0044), ("from", 0.0042),
    ("or", 0.0040), ("have", 0.0038), ("an", 0.0036), ("they", 0.0034), ("which", 0.0033),
    ("not", 0.0032), ("but", 0.0031), ("we", 0.0030), ("you", 0.0030), ("he", 0.0030),
    ("his", 0.0028), ("has", 0.0026), ("can", 0.0025), ("their", 0.0025), ("were", 0.0024),
    ("been", 0.0023), ("more", 0.0022), ("one", 0.0021), ("also", 0.0020), ("its", 0.0020),
    ("all", 0.0020), ("there", 0.0019), ("would", 0.0018), ("will", 0.0018), ("these", 0.0016),
    ("such", 0.0015), ("other", 0.0015), ("into", 0.0014), ("may", 0.0014), ("if", 0.0014),
    ("had", 0.0013), ("only", 0.0012), ("some", 0.0013), ("when", 0.0013), ("about", 0.0012),
    ("than", 0.0012), ("so", 0.0012), ("what", 0.0011), ("our", 0.0010), ("important", 0.0006),
];

fn build(table: &'static [(&'static str, f64)]) -> HashMap<&'static str, f64> {
    table.iter().copied().collect()
}

/// Reference frequency table for a locale, keyed by lowercased word form.
pub fn reference_frequencies(locale: Locale) -> &'static HashMap<&'static str, f64> {
    static RU: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    static EN: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    match locale {
        Locale::Ru => RU.get_or_init(|| build(RU_TOP)),
        Locale::En => EN.get_or_init(|| build(EN_TOP)),
    }
}

pub fn is_function_word(word: &str, locale: Locale) -> bool {
    reference_frequencies(locale).contains_key(word.to_lowercase().as_str())
}
