use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};

use crate::error::StoreError;
use crate::traits::SecureStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// RedbStore is a SecureStore implementation backed by redb — a pure-Rust
/// embedded key-value database. Credentials live in a single file under the
/// application data directory.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(|e| StoreError::Storage(e.to_string()))?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db
            .begin_write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        {
            let _table = write_txn
                .open_table(TABLE)
                .map_err(|e| StoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        tracing::debug!(path = %path.display(), "opened credential store");

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait::async_trait]
impl SecureStore for RedbStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        let table = read_txn
            .open_table(TABLE)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Storage(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| StoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(TABLE)
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| StoreError::Storage(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (RedbStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = RedbStore::open(&temp_dir.path().join("test.redb")).unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let (store, _temp) = setup_store();

        store.set("auth:access_token", b"A1").await.unwrap();
        let value = store.get("auth:access_token").await.unwrap();
        assert_eq!(value, Some(b"A1".to_vec()));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let (store, _temp) = setup_store();

        assert!(store.get("auth:access_token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let (store, _temp) = setup_store();

        store.set("auth:access_token", b"A1").await.unwrap();
        store.set("auth:access_token", b"A2").await.unwrap();
        let value = store.get("auth:access_token").await.unwrap();
        assert_eq!(value, Some(b"A2".to_vec()));
    }

    #[tokio::test]
    async fn test_delete() {
        let (store, _temp) = setup_store();

        store.set("auth:refresh_token", b"R1").await.unwrap();
        store.delete("auth:refresh_token").await.unwrap();
        assert!(store.get("auth:refresh_token").await.unwrap().is_none());

        // Deleting a missing key is fine.
        store.delete("auth:refresh_token").await.unwrap();
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.redb");

        {
            let store = RedbStore::open(&path).unwrap();
            store.set("auth:access_token", b"A1").await.unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        let value = store.get("auth:access_token").await.unwrap();
        assert_eq!(value, Some(b"A1".to_vec()));
    }
}
