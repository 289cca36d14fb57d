use std::{
    collections::HashMap,
    fs::{
        self,
        File,
    },
    io::{
        BufReader,
        Read,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
    time::UNIX_EPOCH,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::DictionaryEntry;
use crate::core::LessonError;

/// Identifies the JSON source a cache was built from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub len: u64,
    pub modified_nanos: u128,
}

impl SourceFingerprint {
    pub fn of(path: &Path) -> Result<Self, LessonError> {
        let metadata = fs::metadata(path)?;
        let modified_nanos = metadata
            .modified()
            .ok()
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |duration| duration.as_nanos());
        Ok(SourceFingerprint { len: metadata.len(), modified_nanos })
    }
}

#[derive(Deserialize)]
pub struct CachedDictionary {
    pub fingerprint: SourceFingerprint,
    pub entries: HashMap<String, DictionaryEntry>,
}

#[derive(Serialize)]
struct CachedDictionaryRef<'a> {
    fingerprint: SourceFingerprint,
    entries: &'a HashMap<String, DictionaryEntry>,
}

/// `cedict.json` -> `cedict.cache.bin`
pub fn cache_path_for(source: &Path) -> PathBuf {
    source.with_extension("cache.bin")
}

pub fn load_cached_dict(cache_path: &Path) -> Result<CachedDictionary, String> {
    let file = File::open(cache_path)
        .map_err(|e| format!("Failed to open cache file at {:?}: {}", cache_path, e))?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).map_err(|e| format!("Failed to read cache file: {}", e))?;

    let (cached, _): (CachedDictionary, usize) =
        bincode::serde::decode_from_slice(&buffer, bincode::config::standard())
            .map_err(|e| format!("Failed to decode cache: {}", e))?;

    Ok(cached)
}

pub fn save_cached_dict(
    fingerprint: SourceFingerprint,
    entries: &HashMap<String, DictionaryEntry>,
    cache_path: &Path,
) -> Result<(), String> {
    let encoded = bincode::serde::encode_to_vec(
        CachedDictionaryRef { fingerprint, entries },
        bincode::config::standard(),
    )
    .map_err(|e| format!("Failed to encode dictionary: {}", e))?;

    let mut file = File::create(cache_path)
        .map_err(|e| format!("Failed to create cache file at {:?}: {}", cache_path, e))?;
    file.write_all(&encoded).map_err(|e| format!("Failed to write cache file: {}", e))?;
    Ok(())
}
