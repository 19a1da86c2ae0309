pub mod error;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use redb::RedbStore;
pub use traits::SecureStore;
