#[cfg(test)]
mod intercept_tests {
    use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

    use bzstream_core::constants::MAX_COPY_CHUNK_LEN;
    use bzstream_core::session::intercept;
    use bzstream_core::types::BzipError;

    /// Reader that hands out at most `step` bytes per read.
    struct Trickle {
        inner: Cursor<Vec<u8>>,
        step: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(self.step);
            self.inner.read(&mut buf[..n])
        }
    }

    impl Seek for Trickle {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    /// Scratch whose reads fail after `good` bytes have been served.
    struct BadRead {
        inner: Cursor<Vec<u8>>,
        good: usize,
    }

    impl Read for BadRead {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.good == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "disk gone"));
            }
            let n = buf.len().min(self.good);
            let n = self.inner.read(&mut buf[..n])?;
            self.good -= n;
            Ok(n)
        }
    }

    impl Seek for BadRead {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    /// Scratch that cannot be rewound.
    struct NoSeek;

    impl Read for NoSeek {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            panic!("read before a successful rewind");
        }
    }

    impl Seek for NoSeek {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "not seekable"))
        }
    }

    /// Scratch whose reads are interrupted every other call.
    struct Interrupting {
        inner: Cursor<Vec<u8>>,
        interrupted: usize,
        pending: bool,
    }

    impl Read for Interrupting {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.pending = !self.pending;
            if self.pending {
                self.interrupted += 1;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    impl Seek for Interrupting {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    /// Sink that fails after accepting `budget` bytes.
    struct Failing {
        budget: usize,
    }

    impl Write for Failing {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn empty_scratch_copies_nothing() {
        let mut scratch = Cursor::new(Vec::new());
        let mut sink = Vec::new();

        let report = intercept(&mut scratch, &mut sink, 1024).unwrap();
        assert_eq!(report.bytes, 0);
        assert_eq!(report.chunks, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn rewinds_before_copying() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let mut scratch = Cursor::new(data.clone());
        scratch.seek(SeekFrom::End(0)).unwrap();
        let mut sink = Vec::new();

        let report = intercept(&mut scratch, &mut sink, 1024).unwrap();
        assert_eq!(sink, data);
        assert_eq!(report.bytes, 5000);
        assert_eq!(report.chunks, 5); // 4 full + 1 partial
    }

    #[test]
    fn exact_multiple_of_chunk() {
        let data = vec![7u8; 2048];
        let mut sink = Vec::new();
        let report = intercept(&mut Cursor::new(data.clone()), &mut sink, 1024).unwrap();
        assert_eq!(report.chunks, 2);
        assert_eq!(sink, data);
    }

    #[test]
    fn short_reads_are_not_eof() {
        let data = vec![0xABu8; 3000];
        let mut scratch = Trickle { inner: Cursor::new(data.clone()), step: 100 };
        let mut sink = Vec::new();

        intercept(&mut scratch, &mut sink, 1024).unwrap();
        assert_eq!(sink, data);
    }

    #[test]
    fn zero_chunk_len_uses_default() {
        let data = vec![1u8; 10];
        let mut sink = Vec::new();
        let report = intercept(&mut Cursor::new(data), &mut sink, 0).unwrap();
        assert_eq!(report.bytes, 10);
    }

    #[test]
    fn sink_failure_aborts_copy() {
        let data = vec![9u8; 4096];
        let mut sink = Failing { budget: 1500 };

        let err = intercept(&mut Cursor::new(data), &mut sink, 1024).unwrap_err();
        match err {
            BzipError::SinkWriteFailed(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_failure_is_scratch_read_error() {
        let mut scratch = BadRead { inner: Cursor::new(vec![3u8; 4096]), good: 1500 };
        let mut sink = Vec::new();

        let err = intercept(&mut scratch, &mut sink, 1024).unwrap_err();
        match err {
            BzipError::ScratchReadFailed(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected error: {other}"),
        }
        // Whatever was read before the failure already went out.
        assert_eq!(sink.len(), 1500);
    }

    #[test]
    fn rewind_failure_is_scratch_read_error() {
        let mut sink = Vec::new();
        let err = intercept(&mut NoSeek, &mut sink, 1024).unwrap_err();
        match err {
            BzipError::ScratchReadFailed(e) => assert_eq!(e.kind(), io::ErrorKind::Unsupported),
            other => panic!("unexpected error: {other}"),
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let data: Vec<u8> = (0..3000u32).map(|i| (i % 253) as u8).collect();
        let mut scratch = Interrupting { inner: Cursor::new(data.clone()), interrupted: 0, pending: false };
        let mut sink = Vec::new();

        let report = intercept(&mut scratch, &mut sink, 1024).unwrap();
        assert_eq!(sink, data);
        assert_eq!(report.bytes, 3000);
        assert_eq!(report.chunks, 3);
        assert!(scratch.interrupted >= 4);
    }

    #[test]
    fn oversized_chunk_len_is_clamped() {
        let data = vec![5u8; MAX_COPY_CHUNK_LEN + 10];
        let mut sink = Vec::new();

        let report = intercept(&mut Cursor::new(data.clone()), &mut sink, usize::MAX).unwrap();
        assert_eq!(sink, data);
        assert_eq!(report.chunks, 2);
    }
}
