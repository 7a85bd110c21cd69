#[cfg(test)]
mod status_tests {
    use bzstream_core::engine::{codes, translate, EngineErrorKind, EngineStatus};
    use bzstream_core::types::{BzipError, EngineOp};

    #[test]
    fn progress_codes_are_success() {
        for code in [codes::OK, codes::RUN_OK, codes::FLUSH_OK, codes::FINISH_OK] {
            assert!(translate(code).is_ok(), "code {code} should map to success");
        }
    }

    #[test]
    fn every_failure_code_has_its_own_kind() {
        let table = [
            (codes::STREAM_END, EngineErrorKind::Stream),
            (codes::CONFIG_ERROR, EngineErrorKind::Config),
            (codes::SEQUENCE_ERROR, EngineErrorKind::Sequence),
            (codes::PARAM_ERROR, EngineErrorKind::Param),
            (codes::MEM_ERROR, EngineErrorKind::Mem),
            (codes::DATA_ERROR, EngineErrorKind::Data),
            (codes::DATA_ERROR_MAGIC, EngineErrorKind::DataMagic),
            (codes::IO_ERROR, EngineErrorKind::Io),
            (codes::UNEXPECTED_EOF, EngineErrorKind::UnexpectedEof),
            (codes::OUTBUFF_FULL, EngineErrorKind::OutbuffFull),
        ];
        for (code, kind) in table {
            assert_eq!(translate(code), Err(kind));
        }
    }

    #[test]
    fn documented_table_is_total() {
        for status in EngineStatus::ALL {
            match translate(status.code()) {
                Ok(()) => {}
                Err(EngineErrorKind::Unknown(c)) => panic!("documented code {c} mapped to Unknown"),
                Err(_) => {}
            }
        }
    }

    #[test]
    fn undocumented_codes_are_unknown() {
        for code in [5, 6, 100, -10, -100, i32::MIN, i32::MAX] {
            assert_eq!(translate(code), Err(EngineErrorKind::Unknown(code)));
        }
    }

    #[test]
    fn unknown_kind_becomes_unknown_error() {
        let err = BzipError::engine(EngineOp::Write, EngineErrorKind::Unknown(77));
        assert!(matches!(err, BzipError::UnknownError { op: EngineOp::Write, code: 77 }));
        assert_eq!(err.engine_kind(), Some(EngineErrorKind::Unknown(77)));
    }

    #[test]
    fn known_kind_lands_in_op_variant() {
        assert!(matches!(
            BzipError::engine(EngineOp::Open, EngineErrorKind::Param),
            BzipError::EngineOpenFailed { kind: EngineErrorKind::Param }
        ));
        assert!(matches!(
            BzipError::engine(EngineOp::Write, EngineErrorKind::Io),
            BzipError::EngineWriteFailed { kind: EngineErrorKind::Io }
        ));
        assert!(matches!(
            BzipError::engine(EngineOp::Close, EngineErrorKind::Mem),
            BzipError::EngineCloseFailed { kind: EngineErrorKind::Mem }
        ));
    }

    #[test]
    fn kind_messages_are_stable() {
        assert_eq!(EngineErrorKind::DataMagic.to_string(), "bzip: data magic");
        assert_eq!(EngineErrorKind::OutbuffFull.to_string(), "bzip: output buffer full");
        assert_eq!(
            BzipError::engine(EngineOp::Close, EngineErrorKind::Io).to_string(),
            "engine close failed: bzip: i/o"
        );
    }
}
