//! Storage crate: session and preference-profile persistence.
//!
//! ## Modules
//!
//! - [`error`] – StorageError
//! - [`session_store`] – SessionStore trait
//! - [`profile_store`] – ProfileStore trait
//! - [`sqlite_session`] – SqliteSessionStore (sqlx)
//! - [`sqlite_profile`] – SqliteProfileStore (sqlx, JSON profile column)
//! - [`memory`] – in-memory store implementations

mod error;
mod memory;
mod profile_store;
mod session_store;
mod sqlite_profile;
mod sqlite_session;


pub use error::StorageError;
pub use memory::{InMemoryProfileStore, InMemorySessionStore};
pub use profile_store::ProfileStore;
pub use session_store::SessionStore;
pub use sqlite_profile::SqliteProfileStore;
pub use sqlite_session::SqliteSessionStore;
