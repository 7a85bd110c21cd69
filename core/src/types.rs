//! types.rs
//! Crate-level error taxonomy.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineErrorKind;
use crate::session::SessionState;

/// Engine call that produced a failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineOp {
    Open,
    Write,
    Close,
}

impl std::fmt::Display for EngineOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EngineOp::Open  => "open",
            EngineOp::Write => "write",
            EngineOp::Close => "close",
        };
        f.write_str(name)
    }
}

/// Every failure a session, the allocator or the interceptor can report.
/// - Engine failures carry the translated kind, never a raw code (except
///   `UnknownError`, where the code is all there is).
/// - `ScratchCleanupFailed` is only returned by an explicit removal; during
///   finalize it is logged instead.
#[derive(Debug, Error)]
pub enum BzipError {
    #[error("scratch allocation failed in {}: {source}", .dir.display())]
    ScratchAllocationFailed { dir: PathBuf, source: io::Error },

    #[error("engine open failed: {kind}")]
    EngineOpenFailed { kind: EngineErrorKind },

    #[error("engine write failed: {kind}")]
    EngineWriteFailed { kind: EngineErrorKind },

    #[error("engine close failed: {kind}")]
    EngineCloseFailed { kind: EngineErrorKind },

    #[error("sink write failed: {0}")]
    SinkWriteFailed(#[source] io::Error),

    #[error("scratch read failed: {0}")]
    ScratchReadFailed(#[source] io::Error),

    #[error("scratch cleanup failed for {}: {source}", .path.display())]
    ScratchCleanupFailed { path: PathBuf, source: io::Error },

    #[error("{op} called on a session in state {state}")]
    SequenceError { op: &'static str, state: SessionState },

    #[error("engine {op} returned unrecognized status {code}")]
    UnknownError { op: EngineOp, code: i32 },
}

impl BzipError {
    /// Wrap a translated engine failure for the call that produced it.
    pub fn engine(op: EngineOp, kind: EngineErrorKind) -> Self {
        match (op, kind) {
            (_, EngineErrorKind::Unknown(code)) => BzipError::UnknownError { op, code },
            (EngineOp::Open, kind)  => BzipError::EngineOpenFailed { kind },
            (EngineOp::Write, kind) => BzipError::EngineWriteFailed { kind },
            (EngineOp::Close, kind) => BzipError::EngineCloseFailed { kind },
        }
    }

    /// Translated engine kind, when this error came from the engine.
    pub fn engine_kind(&self) -> Option<EngineErrorKind> {
        match self {
            BzipError::EngineOpenFailed { kind }
            | BzipError::EngineWriteFailed { kind }
            | BzipError::EngineCloseFailed { kind } => Some(*kind),
            BzipError::UnknownError { code, .. } => Some(EngineErrorKind::Unknown(*code)),
            _ => None,
        }
    }
}

impl From<BzipError> for io::Error {
    fn from(e: BzipError) -> Self {
        let kind = match &e {
            BzipError::SinkWriteFailed(inner)
            | BzipError::ScratchReadFailed(inner)
            | BzipError::ScratchAllocationFailed { source: inner, .. }
            | BzipError::ScratchCleanupFailed { source: inner, .. } => inner.kind(),
            BzipError::SequenceError { .. } => io::ErrorKind::InvalidInput,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, e)
    }
}
