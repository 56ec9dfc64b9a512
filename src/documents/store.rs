use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

use super::models::{DocumentPlayer, NewDocumentPlayer};

/// Append-only JSON Lines collection of player documents.
///
/// Independent of the relational `Jugadores` table; nothing keeps the two in
/// sync.
pub struct DocumentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl DocumentStore {
    /// Open (or lazily create) the collection file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create document store directory")?;
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn list(&self) -> Result<Vec<DocumentPlayer>> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("Document store lock poisoned"))?;
        self.read_all()
    }

    /// Validated insert. The store assigns `_id` and `createdAt`.
    pub fn create(&self, new: NewDocumentPlayer) -> Result<DocumentPlayer> {
        new.validate()?;
        let document = new.into_document(Uuid::new_v4().to_string(), Utc::now());

        let _guard = self.lock.lock().map_err(|_| anyhow!("Document store lock poisoned"))?;
        self.append(&document)?;

        info!("Stored player document {}", document.id);
        Ok(document)
    }

    fn read_all(&self) -> Result<Vec<DocumentPlayer>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).context("Failed to read document store")?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).with_context(|| {
                    format!("Failed to parse document on line {} of {:?}", idx + 1, self.path)
                })
            })
            .collect()
    }

    fn append(&self, document: &DocumentPlayer) -> Result<()> {
        let line = serde_json::to_string(document).context("Failed to serialize document")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .context("Failed to open document store")?;

        writeln!(file, "{line}").context("Failed to write document")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::DocumentError;

    fn new_player(first: &str, last: &str) -> NewDocumentPlayer {
        NewDocumentPlayer {
            first_name: first.into(),
            last_name: last.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("nested/jugadores.jsonl")).unwrap();

        assert!(store.list().unwrap().is_empty());

        let ana = store.create(new_player("Ana", "Lopez")).unwrap();
        let juan = store.create(new_player("Juan", "Perez")).unwrap();

        assert_ne!(ana.id, juan.id);
        assert_eq!(store.list().unwrap(), vec![ana, juan]);
    }

    #[test]
    fn test_invalid_document_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("jugadores.jsonl")).unwrap();

        let err = store.create(new_player("", "Lopez")).unwrap_err();

        assert_eq!(
            err.downcast_ref::<DocumentError>(),
            Some(&DocumentError::MissingField("Nombre"))
        );
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jugadores.jsonl");
        fs::write(&path, "{not json}\n").unwrap();

        let store = DocumentStore::new(&path).unwrap();
        let err = store.list().unwrap_err();

        assert!(err.to_string().contains("line 1"));
    }
}
