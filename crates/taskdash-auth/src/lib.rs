//! Session handling for Taskdash.
//!
//! A single bearer token lives in a file-backed key/value store under the key
//! `"token"`. Its presence is the only authentication signal.

pub mod client;
pub mod error;
pub mod session;
pub mod storage;

pub use client::{AuthClient, Credentials};
pub use error::{AuthError, StorageError};
pub use session::{Session, TokenProvider};
pub use storage::{LocalStorage, TOKEN_KEY};
