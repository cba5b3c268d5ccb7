use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use crossterm::style::Stylize;

use super::input::InputError;

/// Severity of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Line-oriented console over any reader and writer, so the session runs
/// the same against stdin/stdout and in-memory buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Next line without its terminator. Closed input and bytes that are
    /// not UTF-8 come back as answers the caller can report, not as console
    /// failures.
    pub fn read_line(&mut self) -> Result<Result<String, InputError>> {
        let mut bytes = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut bytes)
            .context("failed to read from console")?;
        if read == 0 {
            return Ok(Err(InputError::EndOfInput));
        }
        while matches!(bytes.last(), Some(b'\n' | b'\r')) {
            bytes.pop();
        }
        Ok(String::from_utf8(bytes).map_err(|_| InputError::InvalidText))
    }

    pub fn prompt(&mut self, text: &str) -> Result<Result<String, InputError>> {
        write!(self.output, "{text}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush console")?;
        self.read_line()
    }

    /// Prompt once and parse the answer. The outer error means the console
    /// itself failed; the inner one is a bad answer the caller can report.
    pub fn ask<T, F>(&mut self, text: &str, parse: F) -> Result<Result<T, InputError>>
    where
        F: FnOnce(&str) -> Result<T, InputError>,
    {
        Ok(self.prompt(text)?.and_then(|line| parse(&line)))
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write to console")
    }

    pub fn status(&mut self, text: impl Display, kind: StatusKind) -> Result<()> {
        let text = text.to_string();
        let result = match kind {
            StatusKind::Info => writeln!(self.output, "{}", text.green()),
            StatusKind::Error => writeln!(self.output, "{}", text.red()),
        };
        result.context("failed to write status")
    }
}
