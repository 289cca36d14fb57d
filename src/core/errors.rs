use thiserror::Error;

#[derive(Error, Debug)]
pub enum LessonError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load dictionary: {0}")]
    DictionaryLoad(String),

    #[error("Dictionary has not been loaded")]
    NotLoaded,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Word segmentation failed: {0}")]
    Segmentation(String),

    #[error("Sentence {index} could not be located: {sentence}")]
    SentenceMatch { index: usize, sentence: String },

    #[error("No character or word timings were provided")]
    EmptyTimingInput,

    #[error("LessonError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for LessonError {
    fn from(error: std::io::Error) -> Self {
        LessonError::Io(Box::new(error))
    }
}
