//! Application state wiring the stores together.
//!
//! AppState holds the config and session stores used by every command,
//! pinned to the resolved data directory.

use perkins_infra::config::ConfigStore;
use perkins_infra::filesystem::resolve_data_dir;
use perkins_infra::session::SessionStore;

/// Shared application state for CLI commands.
pub struct AppState {
    pub config_store: ConfigStore,
    pub session_store: SessionStore,
}

impl AppState {
    /// Initialize the application state from the resolved data directory.
    pub fn init() -> Self {
        let data_dir = resolve_data_dir();

        Self {
            config_store: ConfigStore::new(&data_dir),
            session_store: SessionStore::new(&data_dir),
        }
    }
}
