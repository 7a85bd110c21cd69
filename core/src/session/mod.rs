//! session/mod.rs
//! Compression Session and its Output Interceptor.
//!
//! A session owns one engine handle and one scratch file. Ordinary writes go
//! to the engine (and from there to the scratch file); the sink only sees
//! bytes once `finalize` drains the scratch file into it.

pub mod intercept;
pub mod state;
pub mod writer;

pub use intercept::*;
pub use state::*;
pub use writer::*;
