pub mod alignment;
pub mod core;
pub mod dictionary;
pub mod persistence;
pub mod segmentation;
pub mod settings;
pub mod vocabulary;

pub use alignment::{
    AlignmentReconciler,
    MatchStrategy,
};
pub use crate::core::{
    LessonContent,
    LessonError,
};
pub use dictionary::DictionaryStore;
pub use settings::LessonSettings;
pub use vocabulary::VocabularyExtractor;
