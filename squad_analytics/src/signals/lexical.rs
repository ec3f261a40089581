//! Lexical scoring shared by the sentiment and intent analyzers.
//!
//! Matching is plain substring containment over lower-cased text, so partial
//! and overlapping matches all count ("oi" matches inside "noite").

/// A named category and the phrases that trigger it
#[derive(Debug, Clone, Copy)]
pub struct LexicalCategory<L> {
    pub label: L,
    pub triggers: &'static [&'static str],
}

impl<L> LexicalCategory<L> {
    pub const fn new(label: L, triggers: &'static [&'static str]) -> Self {
        Self { label, triggers }
    }
}

/// Count how many trigger phrases occur as substrings of `text_lower`
pub fn count_matches(text_lower: &str, triggers: &[&str]) -> usize {
    triggers
        .iter()
        .filter(|trigger| text_lower.contains(**trigger))
        .count()
}

/// Score every category against the text, preserving declaration order
pub fn score_categories<L: Copy>(
    text_lower: &str,
    categories: &[LexicalCategory<L>],
) -> Vec<(L, usize)> {
    categories
        .iter()
        .map(|category| (category.label, count_matches(text_lower, category.triggers)))
        .collect()
}
