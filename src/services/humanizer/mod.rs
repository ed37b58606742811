// Humanizer Module
// Multi-stage rewriting pipeline organized into specialized submodules:
// - protected: Placeholder masking for math, code, quotes, citations, URLs, numbers
// - document: Body/heading/list blocks and casing helpers
// - strip: Pattern replacement with curated alternatives
// - restructure: Sentence split/merge toward a target length variation
// - injection: Discourse markers, asides and stance phrases
// - source_injector: Author-year citation markers
// - pipeline: Mode profiles, stage ordering and the length guard

pub mod protected;
pub mod document;
pub mod strip;
pub mod restructure;
pub mod injection;
pub mod source_injector;
pub mod pipeline;

pub use pipeline::{within_length_bounds, Humanizer, ModeProfile, Stage};
pub use protected::{find_protected_spans, mask, MaskedText, ProtectedSpan, SpanKind};
pub use source_injector::inject_citations;
pub use strip::{strip_patterns, Register, StripReport};
