//! Data-directory resolution and path layout.
//!
//! Perkins keeps all of its state under one directory:
//!
//! ```text
//! ~/.perkins/
//!   config.json       written by `init`/`models`, read by `chat`
//!   sessions/
//!     {name}.json     one file per named session
//! ```

use std::path::{Path, PathBuf};

/// Resolve the data directory.
///
/// Priority:
/// 1. `PERKINS_DATA_DIR` environment variable
/// 2. `~/.perkins`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PERKINS_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".perkins");
    }

    // Last resort: current directory
    PathBuf::from(".perkins")
}

/// Path of the configuration file.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Directory holding session files.
pub fn sessions_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("sessions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_layout() {
        let data_dir = Path::new("/tmp/perkins-data");
        assert_eq!(
            config_path(data_dir),
            Path::new("/tmp/perkins-data/config.json")
        );
        assert_eq!(
            sessions_dir(data_dir),
            Path::new("/tmp/perkins-data/sessions")
        );
    }
}
