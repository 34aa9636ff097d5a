//! Output management module
//!
//! Writes the final wordlist to disk, one word per line, through a buffered
//! writer.

use crate::error::Result;

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for file writing (8MB)
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Output file writer with buffering
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create a new output writer, truncating any existing file
    pub fn new(path: PathBuf, buffer_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        let writer = BufWriter::with_capacity(buffer_size, file);

        Ok(Self {
            writer,
            path,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// What ended up on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub lines: u64,
    pub bytes: u64,
}

/// Write `words` newline-delimited to `path`, creating parent directories
pub fn write_wordlist(path: &Path, words: &[String], buffer_size: usize) -> Result<OutputSummary> {
    if let Some(parent) = path.parent() {
        ensure_output_dir(parent)?;
    }

    let mut writer = OutputWriter::new(path.to_path_buf(), buffer_size)?;
    for word in words {
        writer.write_line(word)?;
    }
    writer.flush()?;

    log::debug!("Wrote {} lines to {:?}", writer.lines_written(), writer.path());

    Ok(OutputSummary {
        path: writer.path().to_path_buf(),
        lines: writer.lines_written(),
        bytes: writer.bytes_written(),
    })
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
