use std::{
    collections::HashMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
    sync::{
        Mutex,
        OnceLock,
    },
    time::Instant,
};

use tracing::{
    debug,
    info,
    warn,
};

use super::{
    cache::{
        cache_path_for,
        load_cached_dict,
        save_cached_dict,
        SourceFingerprint,
    },
    parse_dictionary_json,
    DictionaryEntry,
};
use crate::core::{
    utils::clean_definition,
    LessonError,
};

#[derive(Debug, Clone)]
pub enum DictionarySource {
    File { path: PathBuf, use_cache: bool },
    Inline(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryStats {
    pub entry_count: usize,
    pub loaded: bool,
}

/// Chinese string -> pronunciations and definitions.
///
/// The table is read once, on the first successful [`DictionaryStore::load`], and is
/// read-only afterwards. Lookups before that fail with [`LessonError::NotLoaded`].
/// The store is constructed explicitly and handed to whoever needs it.
#[derive(Debug)]
pub struct DictionaryStore {
    source: Option<DictionarySource>,
    entries: OnceLock<HashMap<String, DictionaryEntry>>,
    load_guard: Mutex<()>,
}

impl DictionaryStore {
    pub fn new(source: DictionarySource) -> Self {
        DictionaryStore { source: Some(source), entries: OnceLock::new(), load_guard: Mutex::new(()) }
    }

    pub fn from_path(path: impl Into<PathBuf>, use_cache: bool) -> Self {
        Self::new(DictionarySource::File { path: path.into(), use_cache })
    }

    pub fn from_json(json: impl Into<String>) -> Self {
        Self::new(DictionarySource::Inline(json.into()))
    }

    /// An already loaded store over the given table.
    pub fn preloaded(entries: HashMap<String, DictionaryEntry>) -> Self {
        DictionaryStore {
            source: None,
            entries: OnceLock::from(entries),
            load_guard: Mutex::new(()),
        }
    }

    pub fn load(&self) -> Result<(), LessonError> {
        if self.entries.get().is_some() {
            return Ok(());
        }

        let _guard = self
            .load_guard
            .lock()
            .map_err(|_| LessonError::DictionaryLoad("Dictionary load guard poisoned".to_string()))?;

        // Another caller may have finished loading while we waited on the guard.
        if self.entries.get().is_some() {
            return Ok(());
        }

        let source = self.source.as_ref().ok_or_else(|| {
            LessonError::DictionaryLoad("No dictionary source configured".to_string())
        })?;

        let start = Instant::now();
        let table = match source {
            DictionarySource::File { path, use_cache } => load_from_file(path, *use_cache)?,
            DictionarySource::Inline(json) => parse_dictionary_json(json)?,
        };
        info!(entries = table.len(), elapsed = ?start.elapsed(), "Loaded dictionary");

        let _ = self.entries.set(table);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.entries.get().is_some()
    }

    fn table(&self) -> Result<&HashMap<String, DictionaryEntry>, LessonError> {
        self.entries.get().ok_or(LessonError::NotLoaded)
    }

    pub fn entry(&self, key: &str) -> Result<Option<&DictionaryEntry>, LessonError> {
        Ok(self.table()?.get(key))
    }

    pub fn contains(&self, key: &str) -> Result<bool, LessonError> {
        Ok(self.table()?.contains_key(key))
    }

    /// First definition for `key` without trailing whitespace or semicolons.
    pub fn translate(&self, key: &str) -> Result<Option<String>, LessonError> {
        Ok(self
            .entry(key)?
            .and_then(DictionaryEntry::first_definition)
            .map(clean_definition)
            .filter(|definition| !definition.is_empty())
            .map(str::to_string))
    }

    pub fn pronounce(&self, key: &str) -> Result<Option<String>, LessonError> {
        Ok(self.entry(key)?.and_then(DictionaryEntry::first_pronunciation).map(str::to_string))
    }

    pub fn stats(&self) -> DictionaryStats {
        DictionaryStats {
            entry_count: self.entries.get().map_or(0, HashMap::len),
            loaded: self.is_loaded(),
        }
    }
}

fn load_from_file(
    path: &Path,
    use_cache: bool,
) -> Result<HashMap<String, DictionaryEntry>, LessonError> {
    if !path.exists() {
        return Err(LessonError::NotFound(format!("Dictionary file {:?}", path)));
    }

    let fingerprint = SourceFingerprint::of(path)?;
    let cache_path = cache_path_for(path);

    if use_cache {
        match load_cached_dict(&cache_path) {
            Ok(cached) if cached.fingerprint == fingerprint => {
                debug!(cache = ?cache_path, "Using cached dictionary");
                return Ok(cached.entries);
            }
            Ok(_) => debug!(cache = ?cache_path, "Dictionary cache is stale, rebuilding from JSON"),
            Err(e) => debug!(error = %e, "No usable dictionary cache, rebuilding from JSON"),
        }
    }

    let json = fs::read_to_string(path).map_err(|e| {
        LessonError::DictionaryLoad(format!("Failed to read dictionary {:?}: {}", path, e))
    })?;
    let entries = parse_dictionary_json(&json)?;

    if use_cache {
        if let Err(e) = save_cached_dict(fingerprint, &entries, &cache_path) {
            warn!(error = %e, "Failed to save dictionary cache");
        }
    }

    Ok(entries)
}
