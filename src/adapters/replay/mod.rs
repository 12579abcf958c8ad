//! Recorded session replay
//!
//! Implements `PoseSource` over JSON-lines files: one pose per line,
//! `{"timestamp": "<RFC 3339>", "landmarks": [{"name": "LEFT_HIP", "x": .., "y": .., "z": .., "confidence": ..}, ..]}`.
//! Blank lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::Context;

use crate::core::models::PoseSnapshot;
use crate::core::ports::PoseSource;

/// Pose source reading one JSON snapshot per line
#[derive(Debug)]
pub struct JsonlPoseSource<R> {
    lines: Lines<R>,
    line_number: usize,
    name: String,
}

impl JsonlPoseSource<BufReader<File>> {
    /// Open a session file
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening session {}", path.display()))?;
        Ok(Self::from_reader(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> JsonlPoseSource<R> {
    /// Read from any buffered reader; `name` is used in error messages
    pub fn from_reader(reader: R, name: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            name: name.into(),
        }
    }

    /// Line number of the last line read
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> PoseSource for JsonlPoseSource<R> {
    fn next_pose(&mut self) -> anyhow::Result<Option<PoseSnapshot>> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = line.with_context(|| format!("reading {}", self.name))?;
            if line.trim().is_empty() {
                continue;
            }
            let pose: PoseSnapshot = serde_json::from_str(&line)
                .with_context(|| format!("{}:{}: invalid pose", self.name, self.line_number))?;
            return Ok(Some(pose));
        }
        Ok(None)
    }
}
