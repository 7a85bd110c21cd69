//! bzstream-core
//!
//! Streaming bzip2 writer over an engine that can only emit to a file.
//! Callers write through a `Write`-style session; compressed bytes land in a
//! private scratch file and are copied to the caller's sink on finalize.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

pub mod engine;
pub mod scratch;
pub mod session;
pub mod telemetry;

pub mod parallel;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::BzipConfig;
    pub use crate::engine::{Bz2Engine, CompressionEngine, EngineErrorKind, EngineHandle};
    pub use crate::parallel::{compress_batch, BatchReport};
    pub use crate::session::{compress_to_vec, BzipSession, SessionState};
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{BzipError, EngineOp};
}
