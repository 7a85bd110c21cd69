//! session/writer.rs
//!
//! `BzipSession`: the open / write / finalize state machine.
//!
//! Design notes:
//! - The engine handle and the scratch file are owned exclusively by the
//!   session and released exactly once, on whichever path ends the session.
//! - A failed write or close abandons the engine and deletes the scratch file
//!   immediately; the session stays `Errored` and rejects further calls.
//! - A session dropped without `finalize` abandons its engine handle and
//!   deletes its scratch file.
//! - Double finalize on a cleanly closed session returns the same snapshot.
use std::io::{self, Write};
use std::path::Path;

use crate::config::BzipConfig;
use crate::engine::{translate, Bz2Engine, CloseReport, CompressionEngine, EngineErrorKind, EngineHandle};
use crate::engine::status::codes;
use crate::scratch::ScratchFile;
use crate::session::intercept::intercept;
use crate::session::state::SessionState;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{BzipError, EngineOp};

/// Engine handle that is abandoned if it is still open when dropped.
struct ActiveHandle {
    inner: Option<Box<dyn EngineHandle>>,
}

impl ActiveHandle {
    fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    fn write(&mut self, buf: &[u8]) -> Option<i32> {
        self.inner.as_mut().map(|h| h.write(buf))
    }

    fn close(&mut self, abandon: bool) -> Option<CloseReport> {
        self.inner.take().map(|h| h.close(abandon))
    }
}

impl Drop for ActiveHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.inner.take() {
            log::warn!("session dropped without finalize; abandoning engine stream");
            handle.close(true);
        }
    }
}

pub struct BzipSession<W: Write> {
    state: SessionState,
    handle: ActiveHandle,
    scratch: Option<ScratchFile>,
    sink: W,
    last_status: i32,
    copy_chunk_len: usize,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
    snapshot: Option<TelemetrySnapshot>,
}

impl<W: Write> BzipSession<W> {
    /// Open a session on the default bzip2 engine.
    pub fn open(sink: W, config: &BzipConfig) -> Result<Self, BzipError> {
        Self::open_with_engine(sink, config, &Bz2Engine::new())
    }

    /// Allocate a scratch file and open `engine` against it.
    ///
    /// # Errors
    /// - `ScratchAllocationFailed` when no scratch file can be created.
    /// - `EngineOpenFailed` / `UnknownError` when the engine rejects the
    ///   parameters; the scratch file is deleted before returning.
    pub fn open_with_engine(sink: W, config: &BzipConfig, engine: &dyn CompressionEngine) -> Result<Self, BzipError> {
        let mut timer = TelemetryTimer::new();
        log::trace!("session opening: allocating scratch in {}", config.scratch_dir.display());

        let scratch = ScratchFile::allocate(&config.scratch_dir, &config.prefix)?;
        let engine_file = scratch.share().map_err(|source| BzipError::ScratchAllocationFailed {
            dir: config.scratch_dir.clone(),
            source,
        })?;

        let params = config.engine_params();
        let opened = timer.time(Stage::Open, || engine.open(engine_file, &params));

        let handle = match opened {
            Ok(handle) => handle,
            Err(code) => {
                // A success code without a handle is still a failed open.
                let kind = translate(code).err().unwrap_or(EngineErrorKind::Unknown(code));
                log::debug!("{} open failed ({}) for {}", engine.name(), kind, scratch.path().display());
                release_scratch(scratch);
                return Err(BzipError::engine(EngineOp::Open, kind));
            }
        };

        log::debug!(
            "{} session open: scratch={} block_size={} work_factor={}",
            engine.name(),
            scratch.path().display(),
            params.block_size,
            params.work_factor
        );

        Ok(Self {
            state: SessionState::Open,
            handle: ActiveHandle { inner: Some(handle) },
            scratch: Some(scratch),
            sink,
            last_status: codes::OK,
            copy_chunk_len: config.effective_copy_chunk_len(),
            counters: TelemetryCounters::default(),
            timer,
            snapshot: None,
        })
    }

    /// Feed `buf` to the engine.
    ///
    /// Returns `buf.len()` on success; writes are never short. An empty
    /// buffer succeeds without touching the engine.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, BzipError> {
        if self.state != SessionState::Open || !self.handle.is_open() {
            return Err(BzipError::SequenceError { op: "write", state: self.state });
        }
        if buf.is_empty() {
            return Ok(0);
        }

        let handle = &mut self.handle;
        let code = self
            .timer
            .time(Stage::Write, || handle.write(buf))
            .unwrap_or(codes::SEQUENCE_ERROR);
        self.last_status = code;

        if let Err(kind) = translate(code) {
            self.abandon();
            return Err(BzipError::engine(EngineOp::Write, kind));
        }

        self.counters.add_write(buf.len());
        log::trace!("session write: {} bytes (total {})", buf.len(), self.counters.bytes_in);
        Ok(buf.len())
    }

    /// Close the engine, drain the scratch file into the sink and delete it.
    ///
    /// Calling again after a clean close returns the stored snapshot.
    /// Calling after any failure returns `SequenceError`.
    pub fn finalize(&mut self) -> Result<TelemetrySnapshot, BzipError> {
        match self.state {
            SessionState::Open => {}
            SessionState::Closed => {
                if let Some(snapshot) = &self.snapshot {
                    return Ok(snapshot.clone());
                }
                return Err(BzipError::SequenceError { op: "finalize", state: self.state });
            }
            state => return Err(BzipError::SequenceError { op: "finalize", state }),
        }
        self.state = SessionState::Finalizing;

        let handle = &mut self.handle;
        let report = match self.timer.time(Stage::Close, || handle.close(false)) {
            Some(report) => report,
            None => {
                self.abandon();
                return Err(BzipError::SequenceError { op: "finalize", state: SessionState::Finalizing });
            }
        };
        self.last_status = report.status;

        if let Err(kind) = translate(report.status) {
            self.abandon();
            return Err(BzipError::engine(EngineOp::Close, kind));
        }
        self.counters.add_close(report.bytes_in, report.bytes_out);

        let Some(mut scratch) = self.scratch.take() else {
            self.state = SessionState::Errored;
            return Err(BzipError::SequenceError { op: "finalize", state: SessionState::Finalizing });
        };

        let sink = &mut self.sink;
        let chunk_len = self.copy_chunk_len;
        let copied = self
            .timer
            .time(Stage::Copy, || intercept(scratch.file_mut(), sink, chunk_len));

        // Scratch goes away whether or not the copy succeeded.
        self.timer.time(Stage::Cleanup, || release_scratch(scratch));

        let copied = match copied {
            Ok(copied) => copied,
            Err(e) => {
                self.state = SessionState::Errored;
                return Err(e);
            }
        };
        self.counters.add_copy(copied.bytes, copied.chunks);

        self.timer.finish();
        self.state = SessionState::Closed;
        let snapshot = TelemetrySnapshot::from(&self.counters, &self.timer);
        log::debug!(
            "session closed: in={} out={} copied={} ratio={:.3}",
            snapshot.counters.bytes_in,
            snapshot.counters.bytes_out,
            snapshot.counters.bytes_copied,
            snapshot.compression_ratio
        );
        self.snapshot = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Drop engine state after a failure. Idempotent.
    fn abandon(&mut self) {
        self.state = SessionState::Errored;
        self.handle.close(true);
        if let Some(scratch) = self.scratch.take() {
            release_scratch(scratch);
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Raw status code from the most recent engine call.
    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }

    /// Scratch file path while the session still owns one.
    pub fn scratch_path(&self) -> Option<&Path> {
        self.scratch.as_ref().map(|s| s.path())
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Give back the sink. An unfinalized session is abandoned.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> Write for BzipSession<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        BzipSession::write(self, buf).map_err(io::Error::from)
    }

    // No partial flushing: compressed bytes reach the sink at finalize.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Best-effort scratch deletion. Failure is logged, never returned.
fn release_scratch(scratch: ScratchFile) {
    if let Err(e) = scratch.remove() {
        log::warn!("{e}");
    }
}

/// Compress `data` through one session into a fresh buffer.
pub fn compress_to_vec(data: &[u8], config: &BzipConfig) -> Result<Vec<u8>, BzipError> {
    let mut session = BzipSession::open(Vec::new(), config)?;
    session.write(data)?;
    session.finalize()?;
    Ok(session.into_inner())
}
