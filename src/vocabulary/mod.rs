pub mod extractor;

pub use extractor::VocabularyExtractor;

use crate::core::VocabularyItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStatus {
    Complete,
    /// The word pass failed; only single characters were extracted.
    CharactersOnly { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub items: Vec<VocabularyItem>,
    pub status: ExtractionStatus,
}

impl Extraction {
    pub fn is_complete(&self) -> bool {
        self.status == ExtractionStatus::Complete
    }
}

/// Characters, then words, then caller-supplied entries; by Chinese string within each group.
pub fn sort_vocabulary(items: &mut [VocabularyItem]) {
    items.sort_by(|a, b| {
        a.sort_rank().cmp(&b.sort_rank()).then_with(|| a.chinese.cmp(&b.chinese))
    });
}
