//! constants.rs
//! Defaults and bounds shared by the engine, allocator and session.

/// Default scratch file prefix.
pub const DEFAULT_PREFIX: &str = "bzstream";

/// Defaults when a `BzipConfig` field is left unset.
pub const DEFAULT_BLOCK_SIZE: u32 = 9; // 1..=9, x100k block
pub const DEFAULT_VERBOSITY: u32 = 0;
pub const DEFAULT_WORK_FACTOR: u32 = 0; // 0 = engine default (30)

/// Bounded ranges accepted by the bzip2 write-open call.
pub const BLOCK_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=9;
pub const VERBOSITY_RANGE: std::ops::RangeInclusive<u32> = 0..=4;
pub const WORK_FACTOR_RANGE: std::ops::RangeInclusive<u32> = 0..=250;

/// Chunk size used when copying the scratch file into the sink.
pub const DEFAULT_COPY_CHUNK_LEN: usize = 1024;

/// Upper bound on the copy chunk; larger requests are clamped to it.
pub const MAX_COPY_CHUNK_LEN: usize = 1024 * 1024;

/// Staging buffer for engine output before it hits the scratch file.
pub const ENGINE_OUT_BUF_LEN: usize = 64 * 1024;

/// Attempts before giving up on a colliding scratch name.
pub const MAX_SCRATCH_ATTEMPTS: usize = 8;
