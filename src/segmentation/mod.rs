pub mod max_match;

pub use max_match::MaxMatchSegmenter;

use crate::core::LessonError;

/// Splits continuous Chinese text into word-like units.
pub trait Segmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, LessonError>;
}
