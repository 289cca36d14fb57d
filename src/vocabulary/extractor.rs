use std::collections::HashSet;

use tracing::{
    debug,
    info,
    warn,
};

use super::{
    sort_vocabulary,
    Extraction,
    ExtractionStatus,
};
use crate::{
    core::{
        utils::is_cjk,
        LessonContent,
        LessonError,
        VocabType,
        VocabularyItem,
    },
    dictionary::DictionaryStore,
    segmentation::{
        MaxMatchSegmenter,
        Segmenter,
    },
};

/// Builds typed vocabulary tables from lesson text, backed by a [`DictionaryStore`].
///
/// Entries with no dictionary translation are left out of extraction results.
pub struct VocabularyExtractor<'a, S: Segmenter = MaxMatchSegmenter<'a>> {
    dictionary: &'a DictionaryStore,
    segmenter: S,
}

impl<'a> VocabularyExtractor<'a> {
    pub fn new(dictionary: &'a DictionaryStore) -> Self {
        Self::with_segmenter(dictionary, MaxMatchSegmenter::new(dictionary))
    }
}

impl<'a, S: Segmenter> VocabularyExtractor<'a, S> {
    pub fn with_segmenter(dictionary: &'a DictionaryStore, segmenter: S) -> Self {
        VocabularyExtractor { dictionary, segmenter }
    }

    fn lookup(
        &self,
        chinese: String,
        vocab_type: VocabType,
    ) -> Result<Option<VocabularyItem>, LessonError> {
        let Some(english) = self.dictionary.translate(&chinese)? else {
            debug!(chinese = %chinese, "No translation, skipping");
            return Ok(None);
        };
        let pinyin = self.dictionary.pronounce(&chinese)?;
        Ok(Some(VocabularyItem::discovered(chinese, english, pinyin, vocab_type)))
    }

    pub fn extract_from_text(&self, text: &str) -> Result<Extraction, LessonError> {
        let mut processed: HashSet<String> = HashSet::new();
        let mut items = Vec::new();

        for c in text.chars().filter(|c| is_cjk(*c)) {
            let key = c.to_string();
            if !processed.insert(key.clone()) {
                continue;
            }
            if let Some(item) = self.lookup(key, VocabType::Character)? {
                items.push(item);
            }
        }
        let character_count = items.len();

        let status = match self.segmenter.segment(text) {
            Ok(segments) => {
                for segment in segments {
                    if segment.chars().count() <= 1 || !processed.insert(segment.clone()) {
                        continue;
                    }
                    if let Some(item) = self.lookup(segment, VocabType::Word)? {
                        items.push(item);
                    }
                }
                ExtractionStatus::Complete
            }
            Err(e) => {
                warn!(error = %e, "Word segmentation failed, keeping characters only");
                ExtractionStatus::CharactersOnly { reason: e.to_string() }
            }
        };

        info!(
            characters = character_count,
            words = items.len() - character_count,
            "Extracted vocabulary"
        );

        sort_vocabulary(&mut items);
        Ok(Extraction { items, status })
    }

    /// Replaces each English gloss (and pinyin) with the dictionary's when it has one.
    pub fn enhance(&self, vocabulary: &[VocabularyItem]) -> Result<Vec<VocabularyItem>, LessonError> {
        vocabulary
            .iter()
            .map(|item| {
                let mut enhanced = item.clone();
                if let Some(english) = self.dictionary.translate(&item.chinese)? {
                    enhanced.english = english;
                }
                if let Some(pinyin) = self.dictionary.pronounce(&item.chinese)? {
                    enhanced.pinyin = Some(pinyin);
                }
                Ok(enhanced)
            })
            .collect()
    }

    /// Merges the caller's vocabulary with everything extracted from the lesson.
    ///
    /// Base entries are treated as untyped and win over extracted entries with the
    /// same Chinese string.
    pub fn expand(
        &self,
        content: &LessonContent,
        base_vocabulary: &[VocabularyItem],
    ) -> Result<Extraction, LessonError> {
        let enhanced = self.enhance(base_vocabulary)?;
        let extraction = self.extract_from_text(&content.combined_text())?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut merged = Vec::with_capacity(enhanced.len() + extraction.items.len());

        for mut item in enhanced {
            if seen.insert(item.chinese.clone()) {
                item.vocab_type = None;
                merged.push(item);
            }
        }
        let base_count = merged.len();

        for item in extraction.items {
            if seen.insert(item.chinese.clone()) {
                merged.push(item);
            }
        }

        info!(
            base = base_count,
            added = merged.len() - base_count,
            "Expanded lesson vocabulary"
        );

        sort_vocabulary(&mut merged);
        Ok(Extraction { items: merged, status: extraction.status })
    }
}
