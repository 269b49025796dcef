//! # Asset Provisioning
//!
//! The app ships a pre-built `Inventory.db`. On first launch it is copied to
//! the data directory; later launches open the copy and never look at the
//! asset again.
//!
//! ```text
//! database file exists? ── yes ──► open it
//!        │
//!        no
//!        ▼
//! asset configured? ── no ──► create an empty database (migrations add the table)
//!        │
//!       yes
//!        ▼
//! copy asset → database path, then open it
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// What provisioning did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// The database file was already there.
    Existing,
    /// The asset was copied into place.
    FromAsset,
    /// No file and no asset: SQLite will create an empty database.
    Empty,
}

/// Makes sure the database file exists, copying it from `asset` if needed.
///
/// Parent directories of `database_path` are created as required. A
/// configured asset that does not exist is an error rather than a silent
/// fall back to an empty database.
pub fn provision_database(database_path: &Path, asset: Option<&Path>) -> DbResult<Provisioned> {
    if database_path.exists() {
        debug!(path = %database_path.display(), "Database file already present");
        return Ok(Provisioned::Existing);
    }

    if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            DbError::ProvisionFailed(format!("create {}: {}", parent.display(), e))
        })?;
    }

    let Some(asset) = asset else {
        return Ok(Provisioned::Empty);
    };

    if !asset.is_file() {
        return Err(DbError::ProvisionFailed(format!(
            "asset {} does not exist",
            asset.display()
        )));
    }

    let bytes = fs::copy(asset, database_path).map_err(|e| {
        DbError::ProvisionFailed(format!(
            "copy {} to {}: {}",
            asset.display(),
            database_path.display(),
            e
        ))
    })?;

    info!(
        asset = %asset.display(),
        path = %database_path.display(),
        bytes,
        "Database provisioned from asset"
    );
    Ok(Provisioned::FromAsset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("inventory.db");
        fs::write(&db, b"existing").unwrap();
        let asset = dir.path().join("asset.db");
        fs::write(&asset, b"asset").unwrap();

        let result = provision_database(&db, Some(&asset)).unwrap();
        assert_eq!(result, Provisioned::Existing);
        assert_eq!(fs::read(&db).unwrap(), b"existing");
    }

    #[test]
    fn test_asset_is_copied_into_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("data").join("inventory.db");
        let asset = dir.path().join("asset.db");
        fs::write(&asset, b"asset").unwrap();

        let result = provision_database(&db, Some(&asset)).unwrap();
        assert_eq!(result, Provisioned::FromAsset);
        assert_eq!(fs::read(&db).unwrap(), b"asset");
    }

    #[test]
    fn test_missing_asset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("inventory.db");
        let asset = dir.path().join("nope.db");

        let err = provision_database(&db, Some(&asset)).unwrap_err();
        assert!(matches!(err, DbError::ProvisionFailed(_)));
        assert!(!db.exists());
    }

    #[test]
    fn test_no_asset_means_empty() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("inventory.db");
        assert_eq!(provision_database(&db, None).unwrap(), Provisioned::Empty);
    }
}
