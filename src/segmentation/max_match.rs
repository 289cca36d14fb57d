use super::Segmenter;
use crate::{
    core::{
        utils::CjkText,
        LessonError,
    },
    dictionary::DictionaryStore,
};

pub const DEFAULT_MAX_WORD_LENGTH: usize = 8;

/// Forward maximum matching against the dictionary keys.
///
/// Each run of CJK characters is consumed left to right, taking the longest prefix
/// that is a dictionary word (up to `max_word_length` characters) and falling back
/// to a single character. Text outside CJK runs produces no segments.
pub struct MaxMatchSegmenter<'a> {
    dictionary: &'a DictionaryStore,
    max_word_length: usize,
}

impl<'a> MaxMatchSegmenter<'a> {
    pub fn new(dictionary: &'a DictionaryStore) -> Self {
        Self::with_max_word_length(dictionary, DEFAULT_MAX_WORD_LENGTH)
    }

    pub fn with_max_word_length(dictionary: &'a DictionaryStore, max_word_length: usize) -> Self {
        MaxMatchSegmenter { dictionary, max_word_length }
    }

    fn segment_run(&self, run: &str, segments: &mut Vec<String>) -> Result<(), LessonError> {
        let chars: Vec<char> = run.chars().collect();
        let mut pos = 0;

        while pos < chars.len() {
            let longest = self.max_word_length.min(chars.len() - pos);
            let mut taken = 1;

            for len in (2..=longest).rev() {
                let candidate: String = chars[pos..pos + len].iter().collect();
                if self.dictionary.contains(&candidate)? {
                    taken = len;
                    break;
                }
            }

            segments.push(chars[pos..pos + taken].iter().collect());
            pos += taken;
        }

        Ok(())
    }
}

impl Segmenter for MaxMatchSegmenter<'_> {
    fn segment(&self, text: &str) -> Result<Vec<String>, LessonError> {
        if self.max_word_length == 0 {
            return Err(LessonError::Segmentation(
                "max word length must be at least 1".to_string(),
            ));
        }

        let mut segments = Vec::new();
        for run in text.cjk_runs() {
            self.segment_run(run, &mut segments)?;
        }
        Ok(segments)
    }
}
