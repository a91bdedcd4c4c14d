use crate::domain::Library;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default storage file, relative to the working directory.
pub const DEFAULT_LIBRARY_FILE: &str = "library.txt";

#[derive(Debug)]
pub enum PersistenceError {
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Io(e) => write!(f, "I/O error: {}", e),
            PersistenceError::Serialization(e) => write!(f, "Serialization failed: {}", e),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(e) => Some(e),
            PersistenceError::Serialization(e) => Some(e),
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(err: io::Error) -> Self {
        PersistenceError::Io(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Serialization(err)
    }
}

/// What was found in the storage file at load time.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Library),
    /// No file yet.
    Missing,
    /// The file exists but could not be read or parsed. It is left on disk.
    Corrupt(String),
}

/// Reads and writes a whole library as one JSON array in a single file.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the file with the full library. Not atomic.
    pub fn save(&self, library: &Library) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(library)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn load(&self) -> LoadOutcome {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::Missing,
            Err(e) => return LoadOutcome::Corrupt(e.to_string()),
        };

        match serde_json::from_str::<Library>(&content) {
            Ok(library) => LoadOutcome::Loaded(library),
            Err(e) => LoadOutcome::Corrupt(format!("Invalid file format - {}", e)),
        }
    }
}

impl Default for FileRepository {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_FILE)
    }
}
