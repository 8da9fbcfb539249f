use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::lang::Language;

/// A stored connection target.
///
/// `server` is the unique key: no two profiles in a store may share it.
/// `port` and `username` are optional free text; `port`, when present, must
/// be numeric.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub server: String,
    pub comment: String,
    #[serde(default)]
    pub port: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
}

impl ConnectionProfile {
    pub fn new(server: String, comment: String, port: String, username: String) -> Self {
        Self {
            server,
            comment,
            port,
            username,
        }
    }

    /// Row text shown in the connections list
    pub fn display_row(&self) -> String {
        format!("{} - {}", self.server, self.comment)
    }

    /// `[username@]server`, the target handed to ssh
    pub fn target(&self) -> String {
        if self.username.is_empty() {
            self.server.clone()
        } else {
            format!("{}@{}", self.username, self.server)
        }
    }

    /// Validates the profile fields themselves (uniqueness is checked by the store)
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(AppError::Validation("Server cannot be empty".to_string()));
        }

        if self.comment.trim().is_empty() {
            return Err(AppError::Validation("Comment cannot be empty".to_string()));
        }

        if !self.port.is_empty() && self.port.parse::<u16>().is_err() {
            return Err(AppError::Validation("Port must be a number".to_string()));
        }

        Ok(())
    }
}

/// The full persisted unit of state: all profiles plus the UI language.
///
/// Field order matters: the on-disk JSON lists `connections` before
/// `language`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub connections: Vec<ConnectionProfile>,
    #[serde(default)]
    pub language: Language,
}

/// Owns the profile collection and its on-disk document.
///
/// Every mutation persists the whole document; a write failure leaves the
/// in-memory state intact so the user can retry.
#[derive(Debug)]
pub struct ConnectionStore {
    config_path: PathBuf,
    document: Document,
}

impl ConnectionStore {
    /// Create a store backed by the default per-user config file
    pub fn new() -> Result<Self> {
        Self::with_path(Self::default_config_path()?)
    }

    /// Create a store backed by a custom path (useful for testing)
    pub fn with_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref().to_path_buf();
        let document = Self::load_document(&config_path)?;

        Ok(Self {
            config_path,
            document,
        })
    }

    /// Empty store at a path, for when the on-disk document cannot be read
    pub fn empty_at<P: AsRef<Path>>(config_path: P) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            document: Document::default(),
        }
    }

    /// `$HOME/sshman/sshman.json`
    pub fn default_config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| AppError::Persistence("Home directory not found".to_string()))?;
        Ok(home_dir.join("sshman").join("sshman.json"))
    }

    /// Load the document from disk. A missing file is an empty store, not an
    /// error. A parse failure is an error, and the store stays empty rather
    /// than partially populated.
    fn load_document(config_path: &Path) -> Result<Document> {
        if !config_path.exists() {
            return Ok(Document::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| AppError::Persistence(format!("Failed to read config file: {}", e)))?;

        match serde_json::from_str::<Document>(&content) {
            Ok(document) => Ok(document),
            Err(_) => {
                // Early releases persisted a bare array of profiles with no
                // language wrapper; accept it and upgrade on next save.
                serde_json::from_str::<Vec<ConnectionProfile>>(&content)
                    .map(|connections| Document {
                        connections,
                        language: Language::default(),
                    })
                    .map_err(|e| {
                        AppError::Persistence(format!("Failed to parse config file: {}", e))
                    })
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn connections(&self) -> &[ConnectionProfile] {
        &self.document.connections
    }

    pub fn language(&self) -> Language {
        self.document.language
    }

    /// Set the document language and persist it
    pub fn set_language(&mut self, language: Language) -> Result<()> {
        let prior = std::mem::replace(&mut self.document.language, language);
        if let Err(e) = self.persist() {
            self.document.language = prior;
            return Err(e);
        }
        Ok(())
    }

    /// Exact-match lookup on the `server` key
    pub fn exists(&self, server: &str) -> bool {
        self.document.connections.iter().any(|c| c.server == server)
    }

    /// Append a profile and persist. Fails with `DuplicateKey` if a profile
    /// with the same server already exists; the store is left unchanged.
    pub fn add(&mut self, profile: ConnectionProfile) -> Result<()> {
        profile.validate()?;

        if self.exists(&profile.server) {
            return Err(AppError::DuplicateKey(profile.server));
        }

        self.document.connections.push(profile);
        if let Err(e) = self.persist() {
            self.document.connections.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Replace the profile at `index` in place and persist. The new server
    /// value may equal the prior one (no-op rename); colliding with any
    /// *other* entry is `DuplicateKey`.
    pub fn update(&mut self, index: usize, profile: ConnectionProfile) -> Result<()> {
        profile.validate()?;

        if index >= self.document.connections.len() {
            return Err(AppError::IndexOutOfRange(index));
        }

        let collides = self
            .document
            .connections
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.server == profile.server);
        if collides {
            return Err(AppError::DuplicateKey(profile.server));
        }

        let prior = std::mem::replace(&mut self.document.connections[index], profile);
        if let Err(e) = self.persist() {
            self.document.connections[index] = prior;
            return Err(e);
        }
        Ok(())
    }

    /// Remove the profile at `index` and persist
    pub fn remove(&mut self, index: usize) -> Result<()> {
        if index >= self.document.connections.len() {
            return Err(AppError::IndexOutOfRange(index));
        }

        let removed = self.document.connections.remove(index);
        if let Err(e) = self.persist() {
            self.document.connections.insert(index, removed);
            return Err(e);
        }
        Ok(())
    }

    /// Re-read the document from disk, dropping any in-memory state. Used
    /// after the config file has been edited externally.
    pub fn reload(&mut self) -> Result<()> {
        self.document = Self::load_document(&self.config_path)?;
        Ok(())
    }

    /// Serialize the full document to the backing file: pretty-printed JSON,
    /// stable field order, trailing newline. Creates the config directory if
    /// absent.
    pub fn persist(&self) -> Result<()> {
        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                AppError::Persistence(format!("Failed to create config directory: {}", e))
            })?;
        }

        let mut json = serde_json::to_string_pretty(&self.document)
            .map_err(|e| AppError::Persistence(format!("Failed to serialize config: {}", e)))?;
        json.push('\n');

        fs::write(&self.config_path, json)
            .map_err(|e| AppError::Persistence(format!("Failed to write config: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(server: &str, comment: &str) -> ConnectionProfile {
        ConnectionProfile::new(server.into(), comment.into(), String::new(), String::new())
    }

    fn temp_store() -> (tempfile::TempDir, ConnectionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConnectionStore::with_path(dir.path().join("sshman.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty_store() {
        let (_dir, store) = temp_store();
        assert!(store.connections().is_empty());
        assert_eq!(store.language(), Language::En);
    }

    #[test]
    fn add_rejects_duplicate_server() {
        let (_dir, mut store) = temp_store();
        store.add(profile("h1", "first")).unwrap();

        let err = store.add(profile("h1", "second")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
        assert_eq!(store.connections().len(), 1);
        assert_eq!(store.connections()[0].comment, "first");
    }

    #[test]
    fn servers_stay_unique_across_mutations() {
        let (_dir, mut store) = temp_store();
        store.add(profile("a", "c1")).unwrap();
        store.add(profile("b", "c2")).unwrap();
        store.add(profile("c", "c3")).unwrap();
        store.update(1, profile("b2", "c2")).unwrap();
        store.remove(0).unwrap();
        store.add(profile("a", "c4")).unwrap();

        let mut servers: Vec<_> = store.connections().iter().map(|c| c.server.clone()).collect();
        servers.sort();
        servers.dedup();
        assert_eq!(servers.len(), store.connections().len());
    }

    #[test]
    fn update_allows_noop_rename() {
        let (_dir, mut store) = temp_store();
        store.add(profile("a", "old")).unwrap();
        store.add(profile("b", "other")).unwrap();

        // Same server value at the same index is not a collision
        store.update(0, profile("a", "new")).unwrap();
        assert_eq!(store.connections()[0].comment, "new");

        // Colliding with the *other* entry is
        let err = store.update(0, profile("b", "new")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
    }

    #[test]
    fn update_and_remove_check_bounds() {
        let (_dir, mut store) = temp_store();
        store.add(profile("a", "c")).unwrap();

        assert!(matches!(
            store.update(1, profile("x", "y")),
            Err(AppError::IndexOutOfRange(1))
        ));
        assert!(matches!(store.remove(5), Err(AppError::IndexOutOfRange(5))));
        assert_eq!(store.connections().len(), 1);
    }

    #[test]
    fn remove_preserves_order_of_remaining() {
        let (_dir, mut store) = temp_store();
        store.add(profile("a", "c1")).unwrap();
        store.add(profile("b", "c2")).unwrap();
        store.add(profile("c", "c3")).unwrap();

        store.remove(2).unwrap();
        let servers: Vec<_> = store.connections().iter().map(|c| c.server.as_str()).collect();
        assert_eq!(servers, ["a", "b"]);
    }

    #[test]
    fn round_trip_reproduces_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sshman.json");

        let mut store = ConnectionStore::with_path(&path).unwrap();
        store
            .add(ConnectionProfile::new(
                "example.com".into(),
                "prod box".into(),
                "2222".into(),
                "deploy".into(),
            ))
            .unwrap();
        store.add(profile("other", "dev")).unwrap();
        store.set_language(Language::Ru).unwrap();

        let first = fs::read_to_string(&path).unwrap();

        // A load followed by a save with no edits reproduces the same bytes
        let reloaded = ConnectionStore::with_path(&path).unwrap();
        reloaded.persist().unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(reloaded.connections(), store.connections());
        assert_eq!(reloaded.language(), Language::Ru);
    }

    #[test]
    fn persisted_format_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sshman.json");

        let mut store = ConnectionStore::with_path(&path).unwrap();
        store.add(profile("h1", "c1")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        let connections_at = content.find("\"connections\"").unwrap();
        let language_at = content.find("\"language\"").unwrap();
        assert!(connections_at < language_at);
        // Empty username is omitted entirely
        assert!(!content.contains("username"));
    }

    #[test]
    fn legacy_bare_array_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sshman.json");
        fs::write(
            &path,
            r#"[{"server": "legacy", "comment": "old format", "port": ""}]"#,
        )
        .unwrap();

        let store = ConnectionStore::with_path(&path).unwrap();
        assert_eq!(store.connections().len(), 1);
        assert_eq!(store.connections()[0].server, "legacy");
        assert_eq!(store.language(), Language::En);
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sshman.json");
        fs::write(&path, "not json at all").unwrap();

        let err = ConnectionStore::with_path(&path).unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[test]
    fn failed_write_rolls_back_memory() {
        let dir = tempfile::tempdir().unwrap();
        // The backing path is a directory, so every write fails
        let mut store = ConnectionStore::empty_at(dir.path());

        let err = store.add(profile("h1", "c1")).unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert!(store.connections().is_empty());

        let err = store.set_language(Language::Ru).unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(store.language(), Language::En);
    }

    #[test]
    fn target_includes_username_when_set() {
        let p = ConnectionProfile::new("host".into(), "c".into(), "".into(), "root".into());
        assert_eq!(p.target(), "root@host");
        assert_eq!(profile("host", "c").target(), "host");
    }
}
