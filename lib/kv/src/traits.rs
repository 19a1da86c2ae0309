use crate::error::StoreError;

/// SecureStore provides durable key-value storage for session credentials.
///
/// Keys follow a namespaced convention: `auth:access_token`,
/// `auth:refresh_token`, `auth:user`. A missing key is not an error —
/// callers treat absence as "not authenticated".
///
/// Backends decide how values are protected at rest. [`crate::RedbStore`]
/// relies on file permissions; a platform keychain backend implements the
/// same trait without the client noticing.
#[async_trait::async_trait]
pub trait SecureStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set a key-value pair, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
