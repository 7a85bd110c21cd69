#[cfg(test)]
mod concurrency_tests {
    use std::io::Read;
    use std::path::Path;

    use bzip2::read::BzDecoder;

    use bzstream_core::config::BzipConfig;
    use bzstream_core::parallel::compress_batch;
    use bzstream_core::session::BzipSession;
    use bzstream_core::types::BzipError;

    const MESSAGE: &[u8] = b"Jon and several other Sworn Brothers urge the Lord Commander to burn the bodies, \
        but he refuses, wanting the Maester to examine them.";

    fn decompress(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        BzDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    fn config_in(dir: &Path) -> BzipConfig {
        BzipConfig::default().with_scratch_dir(dir).with_prefix("conc").with_block_size(1)
    }

    fn one_session(cfg: &BzipConfig, payload: &[u8]) -> Result<Vec<u8>, BzipError> {
        let mut session = BzipSession::open(Vec::new(), cfg)?;
        session.write(payload)?;
        session.finalize()?;
        Ok(session.into_inner())
    }

    #[test]
    fn hundred_threads_same_message() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..100)
                .map(|_| {
                    let cfg = &cfg;
                    s.spawn(move || {
                        for _ in 0..10 {
                            let out = one_session(cfg, MESSAGE).unwrap();
                            assert_eq!(decompress(&out), MESSAGE);
                        }
                    })
                })
                .collect();
            for h in handles {
                h.join().unwrap();
            }
        });

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn distinct_payloads_do_not_cross_contaminate() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..64u32)
                .map(|i| {
                    let cfg = &cfg;
                    s.spawn(move || {
                        let payload: Vec<u8> = format!("session-{i}-").repeat(50 + i as usize).into_bytes();
                        let out = one_session(cfg, &payload).unwrap();
                        (payload, out)
                    })
                })
                .collect();
            for h in handles {
                let (payload, out) = h.join().unwrap();
                assert_eq!(decompress(&out), payload);
            }
        });
    }

    #[test]
    fn batch_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        let payloads: Vec<Vec<u8>> = (0..40).map(|i| vec![i as u8; 100 * (i + 1)]).collect();

        let report = compress_batch(&payloads, &cfg, Some(8));
        assert!(report.all_ok());
        assert_eq!(report.outputs.len(), payloads.len());

        for (payload, out) in payloads.iter().zip(&report.outputs) {
            assert_eq!(&decompress(out.as_ref().unwrap()), payload);
        }
        let total: u64 = payloads.iter().map(|p| p.len() as u64).sum();
        assert_eq!(report.counters.bytes_in, total);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn batch_of_nothing() {
        let cfg = BzipConfig::default();
        let payloads: Vec<Vec<u8>> = Vec::new();
        let report = compress_batch(&payloads, &cfg, None);
        assert!(report.outputs.is_empty());
    }

    #[test]
    fn batch_reports_per_item_failures() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path()).with_block_size(0);
        let payloads = [MESSAGE, MESSAGE];

        let report = compress_batch(&payloads, &cfg, Some(2));
        assert!(!report.all_ok());
        assert!(report.outputs.iter().all(|r| matches!(r, Err(BzipError::EngineOpenFailed { .. }))));
    }
}
