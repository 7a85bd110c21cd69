//! engine/status.rs
//! Raw engine status codes and the Status Translator.
//!
//! Notes:
//! - Codes mirror libbzip2's `BZ_*` return values.
//! - `translate` is the only place raw codes are interpreted; every other
//!   component works with `EngineErrorKind`.
use std::fmt;
use num_enum::TryFromPrimitive;

use crate::utils::enum_name_or_hex;

/// Raw status code values (i32, as returned by the engine).
pub mod codes {
    pub const OK: i32               = 0;
    pub const RUN_OK: i32           = 1;
    pub const FLUSH_OK: i32         = 2;
    pub const FINISH_OK: i32        = 3;
    pub const STREAM_END: i32       = 4;
    pub const SEQUENCE_ERROR: i32   = -1;
    pub const PARAM_ERROR: i32      = -2;
    pub const MEM_ERROR: i32        = -3;
    pub const DATA_ERROR: i32       = -4;
    pub const DATA_ERROR_MAGIC: i32 = -5;
    pub const IO_ERROR: i32         = -6;
    pub const UNEXPECTED_EOF: i32   = -7;
    pub const OUTBUFF_FULL: i32     = -8;
    pub const CONFIG_ERROR: i32     = -9;
}

/// Every status code the engine documents.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum EngineStatus {
    Ok             = codes::OK,
    RunOk          = codes::RUN_OK,
    FlushOk        = codes::FLUSH_OK,
    FinishOk       = codes::FINISH_OK,
    StreamEnd      = codes::STREAM_END,
    SequenceError  = codes::SEQUENCE_ERROR,
    ParamError     = codes::PARAM_ERROR,
    MemError       = codes::MEM_ERROR,
    DataError      = codes::DATA_ERROR,
    DataErrorMagic = codes::DATA_ERROR_MAGIC,
    IoError        = codes::IO_ERROR,
    UnexpectedEof  = codes::UNEXPECTED_EOF,
    OutbuffFull    = codes::OUTBUFF_FULL,
    ConfigError    = codes::CONFIG_ERROR,
}

impl EngineStatus {
    pub const ALL: [EngineStatus; 14] = [
        EngineStatus::Ok,
        EngineStatus::RunOk,
        EngineStatus::FlushOk,
        EngineStatus::FinishOk,
        EngineStatus::StreamEnd,
        EngineStatus::SequenceError,
        EngineStatus::ParamError,
        EngineStatus::MemError,
        EngineStatus::DataError,
        EngineStatus::DataErrorMagic,
        EngineStatus::IoError,
        EngineStatus::UnexpectedEof,
        EngineStatus::OutbuffFull,
        EngineStatus::ConfigError,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Structured failure kinds produced by `translate`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EngineErrorKind {
    /// Stream end reported where more work was expected.
    Stream,
    Config,
    Sequence,
    Param,
    Mem,
    Data,
    DataMagic,
    Io,
    UnexpectedEof,
    OutbuffFull,
    /// Code outside the documented table.
    Unknown(i32),
}

impl EngineErrorKind {
    /// Raw code this kind was translated from.
    pub fn code(&self) -> i32 {
        match self {
            EngineErrorKind::Stream        => codes::STREAM_END,
            EngineErrorKind::Config        => codes::CONFIG_ERROR,
            EngineErrorKind::Sequence      => codes::SEQUENCE_ERROR,
            EngineErrorKind::Param         => codes::PARAM_ERROR,
            EngineErrorKind::Mem           => codes::MEM_ERROR,
            EngineErrorKind::Data          => codes::DATA_ERROR,
            EngineErrorKind::DataMagic     => codes::DATA_ERROR_MAGIC,
            EngineErrorKind::Io            => codes::IO_ERROR,
            EngineErrorKind::UnexpectedEof => codes::UNEXPECTED_EOF,
            EngineErrorKind::OutbuffFull   => codes::OUTBUFF_FULL,
            EngineErrorKind::Unknown(raw)  => *raw,
        }
    }
}

impl fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EngineErrorKind::*;
        match self {
            Stream        => f.write_str("bzip: stream"),
            Config        => f.write_str("bzip: config"),
            Sequence      => f.write_str("bzip: sequence"),
            Param         => f.write_str("bzip: parameter"),
            Mem           => f.write_str("bzip: memory"),
            Data          => f.write_str("bzip: data"),
            DataMagic     => f.write_str("bzip: data magic"),
            Io            => f.write_str("bzip: i/o"),
            UnexpectedEof => f.write_str("bzip: unexpected eof"),
            OutbuffFull   => f.write_str("bzip: output buffer full"),
            Unknown(raw)  => write!(f, "bzip: unknown status {}",
                                    enum_name_or_hex::<EngineStatus>(*raw)),
        }
    }
}

impl std::error::Error for EngineErrorKind {}

/// Map a raw engine code onto success or a structured failure kind.
///
/// Total over `i32`: codes outside the table become `Unknown`.
pub fn translate(code: i32) -> Result<(), EngineErrorKind> {
    let status = match EngineStatus::try_from_primitive(code) {
        Ok(status) => status,
        Err(_) => return Err(EngineErrorKind::Unknown(code)),
    };

    match status {
        EngineStatus::Ok
        | EngineStatus::RunOk
        | EngineStatus::FlushOk
        | EngineStatus::FinishOk       => Ok(()),
        EngineStatus::StreamEnd        => Err(EngineErrorKind::Stream),
        EngineStatus::ConfigError      => Err(EngineErrorKind::Config),
        EngineStatus::SequenceError    => Err(EngineErrorKind::Sequence),
        EngineStatus::ParamError       => Err(EngineErrorKind::Param),
        EngineStatus::MemError         => Err(EngineErrorKind::Mem),
        EngineStatus::DataError        => Err(EngineErrorKind::Data),
        EngineStatus::DataErrorMagic   => Err(EngineErrorKind::DataMagic),
        EngineStatus::IoError          => Err(EngineErrorKind::Io),
        EngineStatus::UnexpectedEof    => Err(EngineErrorKind::UnexpectedEof),
        EngineStatus::OutbuffFull      => Err(EngineErrorKind::OutbuffFull),
    }
}
