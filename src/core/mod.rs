pub mod errors;
pub mod models;
pub mod utils;

pub use errors::LessonError;
pub use models::{
    LessonContent,
    SentenceTiming,
    TimedSentence,
    VocabType,
    VocabularyItem,
    WordTiming,
};
