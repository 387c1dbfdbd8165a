pub mod error;
pub mod mock_db;
pub mod models;
pub mod preferences;

pub use error::StorageError;
pub use mock_db::MockDatabase;
pub use preferences::Preferences;

use std::fs;
use std::path::Path;

/// Ensure the parent directory of a database file exists
pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
