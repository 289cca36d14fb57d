pub mod reconciler;

#[cfg(test)]
mod reconciler_tests;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

pub use reconciler::{
    AlignmentReconciler,
    MatchStrategy,
    ReconcileReport,
    Reconciliation,
    SentenceOutcome,
};

pub const PROVIDER_ELEVEN_LABS: &str = "eleven_labs";

/// One timed token of the provider's transcript, usually a single character.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CharacterTiming {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WordAlignment {
    pub text: String,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub loss: f64,
}

/// Response body of the forced-alignment provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AlignmentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<CharacterTiming>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<WordAlignment>>,
    #[serde(default)]
    pub loss: f64,
}

impl AlignmentResponse {
    /// Position-ordered timings: the character timings, or the word timings when
    /// the provider returned no characters.
    pub fn timings(&self) -> Vec<CharacterTiming> {
        match (&self.characters, &self.words) {
            (Some(characters), _) if !characters.is_empty() => characters.clone(),
            (_, Some(words)) => words
                .iter()
                .map(|w| CharacterTiming { text: w.text.clone(), start: w.start, end: w.end })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A provider response as stored by the persistence layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentCacheRecord {
    pub provider: String,
    pub timestamp: DateTime<Utc>,
    pub response: AlignmentResponse,
    pub text_length: usize,
    pub audio_file: String,
}

impl AlignmentCacheRecord {
    pub fn new(response: AlignmentResponse, text_length: usize, audio_file: impl Into<String>) -> Self {
        AlignmentCacheRecord {
            provider: PROVIDER_ELEVEN_LABS.to_string(),
            timestamp: Utc::now(),
            response,
            text_length,
            audio_file: audio_file.into(),
        }
    }
}
