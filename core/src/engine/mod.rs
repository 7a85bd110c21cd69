//! engine/mod.rs
//! Compression engine capability and status handling.
//!
//! Notes:
//! - The engine writes only to a file handle; the session redirects that
//!   output to an arbitrary sink afterwards.
//! - Raw status codes never leave this module uninterpreted: use `translate`.

pub mod bz2;
pub mod status;
pub mod types;

pub use bz2::*;
pub use status::*;
pub use types::*;
