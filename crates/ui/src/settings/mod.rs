pub mod session;
pub mod state;

pub use session::{FileSessionProvider, SESSION_FILE_NAME, StoredSession};
pub use state::{AppSettings, SettingsError, SettingsStore};
