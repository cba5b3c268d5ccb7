//! Persistence for the roster, split into the byte layout and the file
//! operations that move whole blocks of it.

pub mod codec;
mod error;
mod file;

pub use error::StoreError;
pub use file::{ClassSnapshot, RosterFile};
