//! Last-user log. Before the menu opens, the session can ask for a short
//! user code and leave it in a fixed-name file so the next person at the
//! machine can see who used it last. The in-memory copy is wiped as soon
//! as it has been written. The file itself is plain text.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};
use zeroize::Zeroizing;

use crate::models::clamp_text;
use crate::session::{Console, InputError, StatusKind};
use crate::store::StoreError;

/// Longest user code kept, in bytes.
pub const USER_CODE_LIMIT: usize = 19;

#[derive(Debug, Clone)]
pub struct UserLog {
    path: PathBuf,
}

impl UserLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the log contents with `code`, verbatim.
    pub fn write_code(&self, code: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, code.as_bytes()).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Prompt for a code, log it, and wipe it. A write failure is reported
    /// and the session carries on.
    pub fn capture<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let line = match console.prompt("Enter your user code: ")? {
            Ok(line) => Zeroizing::new(line),
            Err(InputError::EndOfInput) => return Ok(()),
            Err(err) => {
                console.status(format!("User code not recorded: {err}"), StatusKind::Error)?;
                return Ok(());
            }
        };
        let code = Zeroizing::new(clamp_text(&line, USER_CODE_LIMIT + 1));

        match self.write_code(&code) {
            Ok(()) => info!("recorded last user in {}", self.path.display()),
            Err(err) => {
                warn!("user log failed: {err}");
                console.status(
                    format!("Could not record user: {:#}", anyhow::Error::from(err)),
                    StatusKind::Error,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn capture_writes_and_truncates_code() {
        let dir = tempdir().unwrap();
        let log = UserLog::new(dir.path().join("last_user"));
        let mut console = Console::new(Cursor::new(b"abcdefghijklmnopqrstuvwxyz\n".to_vec()), Vec::new());

        log.capture(&mut console).unwrap();
        assert_eq!(fs::read_to_string(log.path()).unwrap(), "abcdefghijklmnopqrs");
    }

    #[test]
    fn capture_replaces_previous_entry() {
        let dir = tempdir().unwrap();
        let log = UserLog::new(dir.path().join("last_user"));
        log.write_code("someone-much-longer").unwrap();

        let mut console = Console::new(Cursor::new(b"kim\n".to_vec()), Vec::new());
        log.capture(&mut console).unwrap();
        assert_eq!(fs::read_to_string(log.path()).unwrap(), "kim");
    }

    #[test]
    fn code_is_written_verbatim() {
        let dir = tempdir().unwrap();
        let log = UserLog::new(dir.path().join("last_user"));
        let mut console = Console::new(Cursor::new(b" kim \r\n".to_vec()), Vec::new());

        log.capture(&mut console).unwrap();
        assert_eq!(fs::read_to_string(log.path()).unwrap(), " kim ");
    }

    #[test]
    fn unreadable_code_is_reported_and_skipped() {
        let dir = tempdir().unwrap();
        let log = UserLog::new(dir.path().join("last_user"));
        let mut console = Console::new(Cursor::new(b"k\xFFm\n".to_vec()), Vec::new());

        log.capture(&mut console).unwrap();
        assert!(!log.path().exists());
        let written = String::from_utf8(console.output().clone()).unwrap();
        assert!(written.contains("not valid UTF-8"));
    }

    #[test]
    fn closed_input_skips_logging() {
        let dir = tempdir().unwrap();
        let log = UserLog::new(dir.path().join("last_user"));
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new());
        log.capture(&mut console).unwrap();
        assert!(!log.path().exists());
    }
}
