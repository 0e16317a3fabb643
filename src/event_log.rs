//! Optional JSONL log of every published event.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::GameEvent;

pub struct EventLog<W: Write = BufWriter<File>> {
    out: W,
}

impl EventLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// One JSON object per line, tagged by `"event"`.
    pub fn write(&mut self, event: &GameEvent) -> Result<()> {
        serde_json::to_writer(&mut self.out, event).context("encode event")?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flush event log")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
