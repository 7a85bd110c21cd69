//! telemetry/mod.rs
//! Per-session counters, stage timers and immutable snapshots.
//!
//! Notes:
//! - Counters are plain fields owned by one session; no atomics or locks.
//! - `finalize` freezes them into a `TelemetrySnapshot`.
//! - Batch callers can fold many sessions' counters together with `merge`.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
