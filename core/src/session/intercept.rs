//! session/intercept.rs
//! Output Interceptor: drain a finalized scratch file into the sink.
//!
//! - Rewinds to offset 0 and copies in fixed-size chunks (zero means the
//!   default, anything above `MAX_COPY_CHUNK_LEN` is clamped); the sink never
//!   needs to seek and the compressed stream is never held in memory whole.
//! - Stops on a zero-length read. A short read is not EOF for `Read`.
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use crate::constants::{DEFAULT_COPY_CHUNK_LEN, MAX_COPY_CHUNK_LEN};
use crate::types::BzipError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InterceptReport {
    pub bytes: u64,
    pub chunks: u64,
}

pub fn intercept<R, W>(scratch: &mut R, sink: &mut W, chunk_len: usize) -> Result<InterceptReport, BzipError>
where
    R: Read + Seek + ?Sized,
    W: Write + ?Sized,
{
    scratch.seek(SeekFrom::Start(0)).map_err(BzipError::ScratchReadFailed)?;

    let chunk_len = match chunk_len {
        0 => DEFAULT_COPY_CHUNK_LEN,
        n => n.min(MAX_COPY_CHUNK_LEN),
    };
    let mut buf = vec![0u8; chunk_len];
    let mut report = InterceptReport::default();

    loop {
        let n = match scratch.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(BzipError::ScratchReadFailed(e)),
        };
        sink.write_all(&buf[..n]).map_err(BzipError::SinkWriteFailed)?;
        report.bytes += n as u64;
        report.chunks += 1;
    }

    sink.flush().map_err(BzipError::SinkWriteFailed)?;
    Ok(report)
}
