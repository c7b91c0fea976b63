//! Append-only trace writer for crash-safe sample logging.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tiltdrift_common::error::{TiltdriftError, TiltdriftResult};
use tiltdrift_motion_model::sample::{SensorEvent, TraceHeader};

/// Writes sensor events to a JSONL file in append-only mode.
pub struct TraceWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    events_written: u64,
}

impl TraceWriter {
    /// Create a new trace writer, writing the header as the first line.
    pub fn new(path: PathBuf, header: TraceHeader) -> TiltdriftResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        // Write header as a comment line (prefixed with #)
        let header_json = serde_json::to_string(&header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| TiltdriftError::trace(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            events_written: 0,
        })
    }

    /// Write a single event as a JSONL line.
    pub fn write_event(&mut self, event: &SensorEvent) -> TiltdriftResult<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| TiltdriftError::trace(format!("Failed to write event: {e}")))?;
        self.events_written += 1;

        // Flush every 1000 events for crash safety
        if self.events_written % 1000 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> TiltdriftResult<()> {
        self.writer
            .flush()
            .map_err(|e| TiltdriftError::trace(format!("Failed to flush trace: {e}")))?;
        Ok(())
    }

    /// Number of events written.
    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    /// Path to the output file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for TraceWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
