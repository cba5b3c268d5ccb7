use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::Layout;
use crate::models::ClassMetadata;
use crate::roster::{Roster, MAX_CLASS_SIZE};

use super::codec::{
    decode_count, decode_metadata, decode_records, encode_count, encode_metadata,
    encode_records, COUNT_SIZE, METADATA_SIZE, RECORD_SIZE,
};
use super::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Everything a load hands back to the session.
pub struct ClassSnapshot {
    pub roster: Roster,
    pub metadata: Option<ClassMetadata>,
}

/// The persisted roster file. Each call opens, transfers, and closes the
/// file; nothing is held between operations.
#[derive(Debug, Clone)]
pub struct RosterFile {
    path: PathBuf,
    layout: Layout,
}

impl RosterFile {
    pub fn new(path: impl Into<PathBuf>, layout: Layout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with `roster`. The classic layout stores only the
    /// record block, so `metadata` is ignored there.
    pub fn save(
        &self,
        roster: &Roster,
        metadata: Option<&ClassMetadata>,
    ) -> Result<(), StoreError> {
        let students = roster.students();
        let mut bytes = Vec::with_capacity(self.file_len(students.len()));

        if self.layout.has_metadata() {
            let count = u32::try_from(students.len())
                .map_err(|_| StoreError::TooManyRecords(students.len()))?;
            bytes.extend_from_slice(&encode_count(count));
        }
        bytes.extend_from_slice(&encode_records(students));
        if self.layout.has_metadata() {
            bytes.extend_from_slice(&encode_metadata(metadata));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.open_error(source))?;
        }
        let mut file = File::create(&self.path).map_err(|source| self.open_error(source))?;
        file.write_all(&bytes)
            .and_then(|_| file.flush())
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "saved {} students to {}",
            students.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the file back. The caller owns the replacement policy: on any
    /// error the session drops its roster rather than keep stale data.
    pub fn load(&self) -> Result<ClassSnapshot, StoreError> {
        let mut file = File::open(&self.path).map_err(|source| self.open_error(source))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
        debug!("read {} bytes from {}", bytes.len(), self.path.display());

        let snapshot = match self.layout {
            Layout::Classic => self.parse_classic(&bytes)?,
            Layout::Full => self.parse_full(&bytes)?,
        };
        info!(
            "loaded {} students from {}",
            snapshot.roster.count(),
            self.path.display()
        );
        Ok(snapshot)
    }

    /// Count comes from the file size; a partial trailing record is dropped.
    fn parse_classic(&self, bytes: &[u8]) -> Result<ClassSnapshot, StoreError> {
        self.check_class_size(bytes.len() / RECORD_SIZE)?;
        let leftover = bytes.len() % RECORD_SIZE;
        if leftover != 0 {
            warn!(
                "{} has {leftover} trailing bytes, ignoring partial record",
                self.path.display()
            );
        }
        Ok(ClassSnapshot {
            roster: Roster::from_records(decode_records(bytes)?),
            metadata: None,
        })
    }

    /// Count header, record block, metadata trailer. The header is checked
    /// against the class size cap and the file length before anything is
    /// allocated.
    fn parse_full(&self, bytes: &[u8]) -> Result<ClassSnapshot, StoreError> {
        if bytes.len() < COUNT_SIZE {
            return Err(self.truncated(COUNT_SIZE, bytes.len()));
        }
        let count = decode_count(&bytes[..COUNT_SIZE]) as usize;
        self.check_class_size(count)?;
        let expected = self.file_len(count);
        if bytes.len() < expected {
            return Err(self.truncated(expected, bytes.len()));
        }
        if bytes.len() > expected {
            warn!(
                "{} has {} unexpected trailing bytes",
                self.path.display(),
                bytes.len() - expected
            );
        }

        let records_end = COUNT_SIZE + count * RECORD_SIZE;
        let records = decode_records(&bytes[COUNT_SIZE..records_end])?;
        let metadata = decode_metadata(&bytes[records_end..records_end + METADATA_SIZE])?;
        Ok(ClassSnapshot {
            roster: Roster::from_records(records),
            metadata,
        })
    }

    /// Loads obey the same cap as `Roster::allocate`.
    fn check_class_size(&self, count: usize) -> Result<(), StoreError> {
        if count > MAX_CLASS_SIZE {
            return Err(StoreError::ClassTooLarge {
                path: self.path.clone(),
                count,
            });
        }
        Ok(())
    }

    fn file_len(&self, count: usize) -> usize {
        let block = count.saturating_mul(RECORD_SIZE);
        match self.layout {
            Layout::Classic => block,
            Layout::Full => block.saturating_add(COUNT_SIZE + METADATA_SIZE),
        }
    }

    fn open_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Open {
            path: self.path.clone(),
            source,
        }
    }

    fn truncated(&self, expected: usize, found: usize) -> StoreError {
        StoreError::Truncated {
            path: self.path.clone(),
            expected: expected as u64,
            found: found as u64,
        }
    }
}
