use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::roster::MAX_CLASS_SIZE;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is truncated: expected {expected} bytes, found {found}")]
    Truncated {
        path: PathBuf,
        expected: u64,
        found: u64,
    },
    #[error("too many students to save: {0}")]
    TooManyRecords(usize),
    #[error("{path} holds {count} students, more than the limit of {MAX_CLASS_SIZE}")]
    ClassTooLarge { path: PathBuf, count: usize },
    #[error("{field} field is not valid UTF-8")]
    InvalidText { field: &'static str },
}
