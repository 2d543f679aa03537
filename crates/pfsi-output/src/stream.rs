//! Stream keys and the descriptors that bind them to sinks.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{OutputError, OutputResult};

/// The kinds of log stream the aggregator can emit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum StreamKey {
    Pfsi,
    Mosquito,
    Vaccination,
}

impl StreamKey {
    pub fn tag(self) -> &'static str {
        match self {
            StreamKey::Pfsi => "pfsi",
            StreamKey::Mosquito => "mosquito",
            StreamKey::Vaccination => "vaccination",
        }
    }

    /// Columns per row, including the leading time and label columns.
    pub fn columns(self, n_patches: usize) -> usize {
        match self {
            StreamKey::Pfsi => 13,
            StreamKey::Mosquito => 2 + n_patches,
            StreamKey::Vaccination => 3,
        }
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for StreamKey {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pfsi" => Ok(StreamKey::Pfsi),
            "mosquito" | "mosy" => Ok(StreamKey::Mosquito),
            "vaccination" | "vaxx" => Ok(StreamKey::Vaccination),
            other => Err(OutputError::UnknownKey(other.to_string())),
        }
    }
}

/// `(sink, key, header)`: where one stream goes and what its first line is.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamDescriptor {
    pub sink:   PathBuf,
    pub key:    StreamKey,
    pub header: Vec<String>,
}

impl StreamDescriptor {
    /// `header` is a comma-separated list of column names.
    pub fn new(sink: impl Into<PathBuf>, key: StreamKey, header: &str) -> Self {
        Self {
            sink: sink.into(),
            key,
            header: header.split(',').map(|c| c.trim().to_string()).collect(),
        }
    }

    /// Check the header width against the stream layout for `n_patches`.
    pub fn validate(&self, n_patches: usize) -> OutputResult<()> {
        let expected = self.key.columns(n_patches);
        if self.header.len() != expected {
            return Err(OutputError::Header { key: self.key, expected, got: self.header.len() });
        }
        Ok(())
    }
}
