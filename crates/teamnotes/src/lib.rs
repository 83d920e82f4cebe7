//! `teamnotes` - Team-scoped notes with a local durable store
//!
//! Users select a team and read or manage that team's notes. Team `A` is the
//! admin team and may read and modify every note. The collection lives in
//! memory and is mirrored to a `SQLite` key-value store after each change.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod record;
pub mod session;
pub mod storage;
pub mod store;
pub mod team;

pub use config::{Config, InsertionOrder};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use persistence::{LoadSource, Loaded};
pub use record::{Record, RecordId, RecordPatch};
pub use session::Session;
pub use storage::{Backend, Storage, StorageStats};
pub use store::{search, Listing, RecordStore};
pub use team::{can_access, Team};
