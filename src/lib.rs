//! Core library surface for the class roster console application.
//!
//! The binary is a thin wrapper: it reads the configuration and hands stdin
//! and stdout to a `Session`. Everything else lives here so tests can drive
//! the same session with in-memory input.
pub mod config;
pub mod cost;
pub mod models;
pub mod roster;
pub mod session;
pub mod store;
pub mod user_log;

pub use config::{Config, Layout};
pub use cost::{CostQuote, Currency};
pub use models::{ClassMetadata, Student};
pub use roster::Roster;
pub use session::{Session, SessionState};
pub use store::{ClassSnapshot, RosterFile, StoreError};
pub use user_log::UserLog;
