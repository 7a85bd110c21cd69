//! config.rs
//! Session configuration: engine tuning plus scratch placement.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BLOCK_SIZE, DEFAULT_COPY_CHUNK_LEN, DEFAULT_PREFIX, DEFAULT_VERBOSITY, DEFAULT_WORK_FACTOR,
    MAX_COPY_CHUNK_LEN,
};
use crate::engine::EngineParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BzipConfig {
    /// Block size in 100k units, 1..=9.
    pub block_size: u32,

    /// Engine verbosity, 0..=4.
    pub verbosity: u32,

    /// Work factor, 0..=250. 0 lets the engine pick its default.
    pub work_factor: u32,

    /// Writable directory that holds scratch files.
    pub scratch_dir: PathBuf,

    /// Scratch file name prefix.
    pub prefix: String,

    /// Chunk size for the scratch-to-sink copy. 0 selects the default;
    /// values above `MAX_COPY_CHUNK_LEN` are clamped.
    pub copy_chunk_len: usize,
}

impl Default for BzipConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            verbosity: DEFAULT_VERBOSITY,
            work_factor: DEFAULT_WORK_FACTOR,
            scratch_dir: std::env::temp_dir(),
            prefix: DEFAULT_PREFIX.to_string(),
            copy_chunk_len: DEFAULT_COPY_CHUNK_LEN,
        }
    }
}

impl BzipConfig {
    /// `None` falls back to the default for that field.
    pub fn new(block_size: Option<u32>, verbosity: Option<u32>, work_factor: Option<u32>) -> Self {
        Self {
            block_size: block_size.unwrap_or(DEFAULT_BLOCK_SIZE),
            verbosity: verbosity.unwrap_or(DEFAULT_VERBOSITY),
            work_factor: work_factor.unwrap_or(DEFAULT_WORK_FACTOR),
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_work_factor(mut self, work_factor: u32) -> Self {
        self.work_factor = work_factor;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u32) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.scratch_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_copy_chunk_len(mut self, len: usize) -> Self {
        self.copy_chunk_len = len;
        self
    }

    pub fn engine_params(&self) -> EngineParams {
        EngineParams {
            block_size: self.block_size,
            verbosity: self.verbosity,
            work_factor: self.work_factor,
        }
    }

    /// Copy chunk length in `1..=MAX_COPY_CHUNK_LEN`.
    pub fn effective_copy_chunk_len(&self) -> usize {
        match self.copy_chunk_len {
            0 => DEFAULT_COPY_CHUNK_LEN,
            n => n.min(MAX_COPY_CHUNK_LEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = BzipConfig::from_json(r#"{ "block_size": 3, "prefix": "job" }"#).unwrap();
        assert_eq!(cfg.block_size, 3);
        assert_eq!(cfg.prefix, "job");
        assert_eq!(cfg.verbosity, DEFAULT_VERBOSITY);
        assert_eq!(cfg.copy_chunk_len, DEFAULT_COPY_CHUNK_LEN);
    }

    #[test]
    fn zero_copy_chunk_is_coerced() {
        let cfg = BzipConfig::default().with_copy_chunk_len(0);
        assert_eq!(cfg.effective_copy_chunk_len(), DEFAULT_COPY_CHUNK_LEN);
    }

    #[test]
    fn oversized_copy_chunk_is_clamped() {
        let cfg = BzipConfig::from_json(r#"{ "copy_chunk_len": 18446744073709551615 }"#).unwrap();
        assert_eq!(cfg.copy_chunk_len, usize::MAX);
        assert_eq!(cfg.effective_copy_chunk_len(), MAX_COPY_CHUNK_LEN);

        let cfg = BzipConfig::default().with_copy_chunk_len(4096);
        assert_eq!(cfg.effective_copy_chunk_len(), 4096);
    }
}
