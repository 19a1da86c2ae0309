//! Genova API client.
//!
//! Authenticated HTTP client for the Genova tutoring platform:
//! - Session credentials live in a [`genova_kv::SecureStore`].
//! - Requests that fail with 401 trigger a single-flight refresh-token
//!   exchange and are retried exactly once.
//! - When the session is unrecoverable the client erases the store and
//!   publishes a [`SessionEvent`]; it never touches the UI itself.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use genova_client::ApiClient;
//! use genova_kv::RedbStore;
//!
//! let store = Arc::new(RedbStore::open(&data_dir.join("session.redb"))?);
//! let client = ApiClient::new("https://api.genova.app", store);
//! let user = client.login("alice@example.com", "secret").await?;
//! let tutors = client.list_tutors(&Default::default()).await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod events;
pub mod refresh;
pub mod session;

pub use api::{Booking, CreateBooking, Tutor, TutorQuery, WalletBalance, WalletTransaction};
pub use client::{ApiClient, RequestOptions};
pub use error::ApiError;
pub use events::{SessionEvent, Teardown};
pub use refresh::RefreshCoordinator;
pub use session::{SessionStore, SessionTokens, UserProfile};
