use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    warn,
};

use crate::{
    alignment::AlignmentCacheRecord,
    core::{
        LessonContent,
        LessonError,
    },
};

const APP_NAME: &str = "hanzi_lesson";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn write_json_file<T: Serialize>(data: &T, path: &Path) -> Result<(), LessonError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "Data saved");
    Ok(())
}

pub fn read_json_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, LessonError> {
    if !path.exists() {
        return Err(LessonError::NotFound(format!("{}", path.display())));
    }
    let json = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&json)?;
    debug!(path = %path.display(), "Data loaded");
    Ok(data)
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
    filename: &str,
) -> Result<T, LessonError> {
    load_json_from(&get_data_file_path(filename))
}

fn load_json_from<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Result<T, LessonError> {
    if !path.exists() {
        return Ok(T::default());
    }
    read_json_file(path)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            warn!(file = filename, error = %e, "Failed to load, using defaults");
            T::default()
        }
    }
}

pub fn read_lesson(path: &Path) -> Result<LessonContent, LessonError> {
    read_json_file(path)
}

pub fn write_lesson(lesson: &LessonContent, path: &Path) -> Result<(), LessonError> {
    write_json_file(lesson, path)
}

pub fn read_alignment_cache(path: &Path) -> Result<AlignmentCacheRecord, LessonError> {
    read_json_file(path)
}

pub fn write_alignment_cache(record: &AlignmentCacheRecord, path: &Path) -> Result<(), LessonError> {
    write_json_file(record, path)
}
