pub mod cache;
pub mod store;

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

pub use store::{
    DictionarySource,
    DictionaryStats,
    DictionaryStore,
};

use crate::core::LessonError;

/// One record of the dictionary source file, keyed by its Chinese string.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct JsonDictionaryEntry {
    #[serde(default)]
    pub simplified: String,
    #[serde(default)]
    pub traditional: String,
    #[serde(default)]
    pub pinyin: Vec<String>,
    #[serde(default)]
    pub definitions: HashMap<String, String>, // definition index -> text
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DictionaryEntry {
    pub pronunciations: Vec<String>,
    pub definitions: Vec<String>,
}

impl DictionaryEntry {
    pub fn first_definition(&self) -> Option<&str> {
        self.definitions.first().map(String::as_str)
    }

    pub fn first_pronunciation(&self) -> Option<&str> {
        self.pronunciations.first().map(String::as_str)
    }
}

impl From<JsonDictionaryEntry> for DictionaryEntry {
    fn from(json_entry: JsonDictionaryEntry) -> Self {
        let mut indexed: Vec<(String, String)> = json_entry.definitions.into_iter().collect();
        // Numeric indices in numeric order ("2" before "10"), anything else after them.
        indexed.sort_by(|(a, _), (b, _)| match (a.parse::<u32>(), b.parse::<u32>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });

        DictionaryEntry {
            pronunciations: json_entry.pinyin,
            definitions: indexed.into_iter().map(|(_, text)| text).collect(),
        }
    }
}

pub fn parse_dictionary_json(json: &str) -> Result<HashMap<String, DictionaryEntry>, LessonError> {
    let raw: HashMap<String, JsonDictionaryEntry> = serde_json::from_str(json)
        .map_err(|e| LessonError::DictionaryLoad(format!("Invalid dictionary JSON: {}", e)))?;

    Ok(raw.into_iter().map(|(key, entry)| (key, entry.into())).collect())
}
