//! engine/bz2.rs
//!
//! Default engine backed by the `bzip2` crate's low-level `Compress` stream.
//!
//! Design notes:
//! - Output is staged in a fixed buffer and appended to the file after every
//!   engine step; nothing is kept in memory past one buffer.
//! - `bzip2::Error` and io failures are reported as raw status codes so the
//!   session sees the same surface as the C `BZ2_bzWrite*` family.
//! - Verbosity is range-checked but otherwise unused: the crate exposes no
//!   verbosity knob.
use std::fs::File;
use std::io::Write;

use bzip2::{Action, Compress, Compression, Status};

use crate::constants::{BLOCK_SIZE_RANGE, ENGINE_OUT_BUF_LEN, VERBOSITY_RANGE, WORK_FACTOR_RANGE};
use crate::engine::status::codes;
use crate::engine::types::{CloseReport, CompressionEngine, EngineHandle, EngineParams};

#[derive(Copy, Clone, Debug, Default)]
pub struct Bz2Engine;

impl Bz2Engine {
    pub fn new() -> Self {
        Self
    }
}

impl CompressionEngine for Bz2Engine {
    fn name(&self) -> &'static str {
        "bzip2"
    }

    fn open(&self, file: File, params: &EngineParams) -> Result<Box<dyn EngineHandle>, i32> {
        if !BLOCK_SIZE_RANGE.contains(&params.block_size)
            || !VERBOSITY_RANGE.contains(&params.verbosity)
            || !WORK_FACTOR_RANGE.contains(&params.work_factor)
        {
            return Err(codes::PARAM_ERROR);
        }

        let stream = Compress::new(Compression::new(params.block_size), params.work_factor);
        Ok(Box::new(Bz2Handle {
            stream,
            file,
            out: vec![0u8; ENGINE_OUT_BUF_LEN],
        }))
    }
}

struct Bz2Handle {
    stream: Compress,
    file: File,
    out: Vec<u8>,
}

fn status_code(status: Status) -> i32 {
    match status {
        Status::Ok        => codes::OK,
        Status::RunOk     => codes::RUN_OK,
        Status::FlushOk   => codes::FLUSH_OK,
        Status::FinishOk  => codes::FINISH_OK,
        Status::StreamEnd => codes::STREAM_END,
        Status::MemNeeded => codes::MEM_ERROR,
    }
}

fn error_code(err: bzip2::Error) -> i32 {
    match err {
        bzip2::Error::Sequence  => codes::SEQUENCE_ERROR,
        bzip2::Error::Data      => codes::DATA_ERROR,
        bzip2::Error::DataMagic => codes::DATA_ERROR_MAGIC,
        bzip2::Error::Param     => codes::PARAM_ERROR,
    }
}

impl Bz2Handle {
    /// Run one engine step and append whatever it produced to the file.
    /// Returns the engine status and the number of input bytes consumed.
    fn step(&mut self, input: &[u8], action: Action) -> Result<(Status, usize), i32> {
        let before_in = self.stream.total_in();
        let before_out = self.stream.total_out();

        let status = self
            .stream
            .compress(input, &mut self.out, action)
            .map_err(error_code)?;

        let consumed = (self.stream.total_in() - before_in) as usize;
        let produced = (self.stream.total_out() - before_out) as usize;

        if produced > 0 {
            if let Err(e) = self.file.write_all(&self.out[..produced]) {
                log::error!("bzip2 engine: scratch write failed: {e}");
                return Err(codes::IO_ERROR);
            }
        }
        Ok((status, consumed))
    }

    fn finish(&mut self) -> i32 {
        loop {
            match self.step(&[], Action::Finish) {
                Ok((Status::StreamEnd, _)) => break,
                Ok((Status::FinishOk, _)) => continue,
                // Finish only reports FinishOk until the stream ends.
                Ok((other, _)) => {
                    let code = status_code(other);
                    return if code < 0 { code } else { codes::SEQUENCE_ERROR };
                }
                Err(code) => return code,
            }
        }

        if let Err(e) = self.file.flush() {
            log::error!("bzip2 engine: scratch flush failed: {e}");
            return codes::IO_ERROR;
        }
        codes::OK
    }
}

impl EngineHandle for Bz2Handle {
    fn write(&mut self, buf: &[u8]) -> i32 {
        let mut offset = 0;
        while offset < buf.len() {
            match self.step(&buf[offset..], Action::Run) {
                Ok((status, consumed)) => {
                    let code = status_code(status);
                    if code < 0 {
                        return code;
                    }
                    offset += consumed;
                }
                Err(code) => return code,
            }
        }
        codes::OK
    }

    fn close(mut self: Box<Self>, abandon: bool) -> CloseReport {
        let status = if abandon { codes::OK } else { self.finish() };
        CloseReport {
            status,
            bytes_in: self.stream.total_in(),
            bytes_out: self.stream.total_out(),
        }
    }
}
