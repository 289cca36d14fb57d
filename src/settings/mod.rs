use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    alignment::{
        AlignmentReconciler,
        MatchStrategy,
    },
    dictionary::DictionaryStore,
    persistence::{
        get_app_data_dir,
        load_json_or_default,
    },
    segmentation::max_match::DEFAULT_MAX_WORD_LENGTH,
};

pub const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_DICTIONARY_FILE: &str = "cedict.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonSettings {
    pub match_strategy: MatchStrategy,
    pub max_word_length: usize,
    pub dictionary_path: Option<PathBuf>,
    pub use_dictionary_cache: bool,
}

impl Default for LessonSettings {
    fn default() -> Self {
        Self {
            match_strategy: MatchStrategy::default(),
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
            dictionary_path: None,
            use_dictionary_cache: true,
        }
    }
}

impl LessonSettings {
    pub fn load() -> Self {
        load_json_or_default(SETTINGS_FILE)
    }

    /// The configured dictionary, or `dictionaries/cedict.json` in the app data directory.
    pub fn resolved_dictionary_path(&self) -> PathBuf {
        self.dictionary_path.clone().unwrap_or_else(|| {
            get_app_data_dir().join("dictionaries").join(DEFAULT_DICTIONARY_FILE)
        })
    }

    pub fn dictionary_store(&self) -> DictionaryStore {
        DictionaryStore::from_path(self.resolved_dictionary_path(), self.use_dictionary_cache)
    }

    pub fn reconciler(&self) -> AlignmentReconciler {
        AlignmentReconciler::new(self.match_strategy)
    }
}
