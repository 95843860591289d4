//! Persistence of worksheet rows
//!
//! Rows are stored as a whole array per user and lab. [`MemoryStore`] keeps
//! them for the lifetime of the process; [`JsonFileStore`] writes one JSON
//! file per user and lab under a results directory.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{LabKind, TableRow};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed results data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Results store is unavailable")]
    Unavailable,
}

/// Where laboratory results go
pub trait ResultsSink {
    fn save(&self, user: &str, lab: LabKind, rows: &[TableRow]) -> Result<(), SinkError>;

    /// `Ok(None)` when nothing was saved yet
    fn load(&self, user: &str, lab: LabKind) -> Result<Option<Vec<TableRow>>, SinkError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RefCell<BTreeMap<(String, LabKind), Vec<TableRow>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultsSink for MemoryStore {
    fn save(&self, user: &str, lab: LabKind, rows: &[TableRow]) -> Result<(), SinkError> {
        self.tables
            .borrow_mut()
            .insert((user.to_string(), lab), rows.to_vec());
        Ok(())
    }

    fn load(&self, user: &str, lab: LabKind) -> Result<Option<Vec<TableRow>>, SinkError> {
        Ok(self.tables.borrow().get(&(user.to_string(), lab)).cloned())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<user>/<lab>.json`, with the user id reduced to safe characters
    pub fn path_for(&self, user: &str, lab: LabKind) -> PathBuf {
        let user: String = user
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(user).join(format!("{}.json", lab.slug()))
    }
}

impl ResultsSink for JsonFileStore {
    fn save(&self, user: &str, lab: LabKind, rows: &[TableRow]) -> Result<(), SinkError> {
        let path = self.path_for(user, lab);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| SinkError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(rows)?;
        fs::write(&path, json).map_err(|source| SinkError::Io { path: path.clone(), source })?;
        log::debug!("Saved {} rows to {}", rows.len(), path.display());
        Ok(())
    }

    fn load(&self, user: &str, lab: LabKind) -> Result<Option<Vec<TableRow>>, SinkError> {
        let path = self.path_for(user, lab);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SinkError::Io { path, source }),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Worksheet;

    fn sample_rows() -> Vec<TableRow> {
        let mut sheet = Worksheet::new(LabKind::OhmsLaw);
        sheet.edit(0, "voltage", "12").unwrap();
        sheet.edit(0, "current", "0.5").unwrap();
        sheet.add_row();
        sheet.rows().to_vec()
    }

    #[test]
    fn memory_store_keeps_tables_per_user_and_lab() {
        let store = MemoryStore::new();
        assert!(store.load("ada", LabKind::OhmsLaw).unwrap().is_none());

        store.save("ada", LabKind::OhmsLaw, &sample_rows()).unwrap();
        assert_eq!(store.load("ada", LabKind::OhmsLaw).unwrap(), Some(sample_rows()));
        assert!(store.load("ada", LabKind::HookesLaw).unwrap().is_none());
        assert!(store.load("bob", LabKind::OhmsLaw).unwrap().is_none());
    }

    #[test]
    fn json_store_writes_one_file_per_lab() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.load("ada", LabKind::OhmsLaw).unwrap().is_none());
        store.save("ada", LabKind::OhmsLaw, &sample_rows()).unwrap();

        let path = dir.path().join("ada").join("ohms_law.json");
        assert!(path.exists());
        let loaded = store.load("ada", LabKind::OhmsLaw).unwrap().unwrap();
        assert_eq!(loaded, sample_rows());
        // empty cells are stored as null
        assert!(fs::read_to_string(path).unwrap().contains("null"));
    }

    #[test]
    fn user_ids_cannot_escape_the_root() {
        let store = JsonFileStore::new("/results");
        let path = store.path_for("../../etc", LabKind::FreeFall);
        assert!(path.starts_with("/results"));
        assert_eq!(path.file_name().unwrap(), "free_fall.json");
        assert!(!path.to_string_lossy().contains(".."));
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let path = store.path_for("ada", LabKind::FreeFall);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(store.load("ada", LabKind::FreeFall), Err(SinkError::Json(_))));
    }
}
