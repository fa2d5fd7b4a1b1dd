//! Session store.
//!
//! One JSON file per session name under `{data_dir}/sessions/`. Every save
//! rewrites the full history: the file is written to a sibling temp path and
//! renamed into place, so the file on disk is always a complete snapshot of
//! the last successful save.

use std::path::{Path, PathBuf};

use tracing::debug;

use perkins_types::error::SessionError;
use perkins_types::llm::Message;

use crate::filesystem;

/// JSON-file-backed store for named conversation histories.
pub struct SessionStore {
    sessions_dir: PathBuf,
}

impl SessionStore {
    /// Create a store rooted at the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            sessions_dir: filesystem::sessions_dir(data_dir),
        }
    }

    /// Path of the file backing a session name.
    pub fn session_path(&self, name: &str) -> PathBuf {
        self.sessions_dir.join(format!("{name}.json"))
    }

    /// Load a session's history.
    ///
    /// A missing file is an empty history (sessions are created on first
    /// use). A present-but-unparsable file is a `Parse` error; the caller
    /// downgrades it to a warning and starts fresh.
    pub async fn load(&self, name: &str) -> Result<Vec<Message>, SessionError> {
        let path = self.session_path(name);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(session = name, "no session file, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(SessionError::Read(err.to_string())),
        };

        serde_json::from_str(&content).map_err(|err| SessionError::Parse(err.to_string()))
    }

    /// Persist a session's full history, overwriting any previous snapshot.
    pub async fn save(&self, name: &str, history: &[Message]) -> Result<(), SessionError> {
        tokio::fs::create_dir_all(&self.sessions_dir)
            .await
            .map_err(|err| SessionError::Write(err.to_string()))?;

        let json = serde_json::to_string_pretty(history)
            .map_err(|err| SessionError::Write(err.to_string()))?;

        // Write-then-rename keeps the visible file a complete snapshot even
        // if the process dies mid-write.
        let path = self.session_path(name);
        let tmp_path = self.sessions_dir.join(format!("{name}.json.tmp"));
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|err| SessionError::Write(err.to_string()))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|err| SessionError::Write(err.to_string()))?;

        debug!(session = name, messages = history.len(), "session saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_history() -> Vec<Message> {
        vec![
            Message::system("seed"),
            Message::user("hi"),
            Message::assistant("hello"),
        ]
    }

    #[tokio::test]
    async fn test_load_absent_session_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path());
        let history = store.load("nope").await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_is_identity() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path());

        let history = sample_history();
        store.save("work", &history).await.unwrap();
        let loaded = store.load("work").await.unwrap();
        assert_eq!(loaded, history);
    }

    #[tokio::test]
    async fn test_save_is_full_rewrite() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path());

        store.save("work", &sample_history()).await.unwrap();

        // A shorter history fully replaces the longer snapshot.
        let shorter = vec![Message::user("only")];
        store.save("work", &shorter).await.unwrap();
        let loaded = store.load("work").await.unwrap();
        assert_eq!(loaded, shorter);
    }

    #[tokio::test]
    async fn test_load_malformed_session_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path());
        tokio::fs::create_dir_all(filesystem::sessions_dir(tmp.path()))
            .await
            .unwrap();
        tokio::fs::write(store.session_path("bad"), "[{broken")
            .await
            .unwrap();

        let err = store.load("bad").await.unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path());
        store.save("work", &sample_history()).await.unwrap();

        let leftover = filesystem::sessions_dir(tmp.path()).join("work.json.tmp");
        assert!(!tokio::fs::try_exists(&leftover).await.unwrap());
    }
}
