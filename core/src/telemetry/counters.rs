//! telemetry/counters.rs
//! Mutable counters collected while a session is open.
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    /// Non-empty write calls forwarded to the engine.
    pub writes: u64,
    /// Uncompressed bytes accepted.
    pub bytes_in: u64,
    /// Compressed bytes the engine reported at close.
    pub bytes_out: u64,
    /// Bytes forwarded from the scratch file to the sink.
    pub bytes_copied: u64,
    pub chunks_copied: u64,
}

impl TelemetryCounters {
    pub fn add_write(&mut self, len: usize) {
        self.writes += 1;
        self.bytes_in += len as u64;
    }

    /// Record engine close counters. The engine's own `bytes_in` wins over
    /// ours when they disagree.
    pub fn add_close(&mut self, bytes_in: u64, bytes_out: u64) {
        if bytes_in != self.bytes_in {
            log::debug!("engine bytes_in {} != counted {}", bytes_in, self.bytes_in);
            self.bytes_in = bytes_in;
        }
        self.bytes_out = bytes_out;
    }

    pub fn add_copy(&mut self, bytes: u64, chunks: u64) {
        self.bytes_copied += bytes;
        self.chunks_copied += chunks;
    }

    // Merge without locks: each worker keeps its own counters.
    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.writes += other.writes;
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
        self.bytes_copied += other.bytes_copied;
        self.chunks_copied += other.chunks_copied;
    }

    /// Compact binary form for persisting alongside archives.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        bincode::decode_from_slice(bytes, bincode::config::standard()).map(|(c, _)| c)
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
