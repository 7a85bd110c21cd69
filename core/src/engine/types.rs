//! engine/types.rs
//! The engine capability: open against a file, write, close.
//!
//! The engine only ever emits compressed bytes into the file it was opened
//! with. Status is reported as raw `i32` codes (see `engine::status`).
use std::fs::File;

use serde::{Deserialize, Serialize};

/// Tuning parameters passed through unchanged to the engine's open call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineParams {
    pub block_size: u32,
    pub verbosity: u32,
    pub work_factor: u32,
}

/// Result of closing a handle. Counters are informational only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CloseReport {
    pub status: i32,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

// Require Send + Sync so one engine value can back sessions on many threads.
pub trait CompressionEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Open a write handle that appends compressed output to `file`.
    /// On failure the raw status code is returned and no handle exists.
    fn open(&self, file: File, params: &EngineParams) -> Result<Box<dyn EngineHandle>, i32>;
}

pub trait EngineHandle: Send {
    /// Feed `buf` to the engine. Returns the raw status code.
    fn write(&mut self, buf: &[u8]) -> i32;

    /// Close the handle. `abandon = false` flushes all pending output into
    /// the file; `abandon = true` discards it.
    fn close(self: Box<Self>, abandon: bool) -> CloseReport;
}
