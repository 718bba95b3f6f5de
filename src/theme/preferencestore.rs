use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file: {0}")]
    IOError(#[from] std::io::Error),
    #[error("preference file is not a JSON object of strings: {0}")]
    JsonParseError(#[from] serde_json::Error)
}

/// Persistent string key-value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Default)]
pub struct MemoryPreferenceStore {
    map_cell: RefCell<HashMap<String, String>>
}

impl MemoryPreferenceStore {
    pub fn new() -> MemoryPreferenceStore {
        MemoryPreferenceStore::default()
    }

    pub fn with(key: &str, value: &str) -> MemoryPreferenceStore {
        let store = MemoryPreferenceStore::new();
        store.map_cell.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map_cell.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.map_cell.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A flat JSON object on disk, rewritten on every `set`.
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    map_cell: RefCell<HashMap<String, String>>
}

impl JsonFilePreferenceStore {
    /// Opens `path`, treating a missing file as an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<JsonFilePreferenceStore, PreferenceError> {
        let path = path.as_ref().to_path_buf();
        let map = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(error) if error.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(error) => return Err(PreferenceError::IOError(error))
        };
        Ok(JsonFilePreferenceStore { path, map_cell: RefCell::new(map) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, map: &HashMap<String, String>) -> Result<(), PreferenceError> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, map)?;
        writer.flush()?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map_cell.borrow().get(key).cloned()
    }

    /// The value is kept in memory only once it has reached the file.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut updated = self.map_cell.borrow().clone();
        updated.insert(key.to_owned(), value.to_owned());
        self.write(&updated)?;
        *self.map_cell.borrow_mut() = updated;
        Ok(())
    }
}
