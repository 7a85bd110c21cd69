//! parallel.rs
//! Run many independent sessions on a scoped worker pool.
//!
//! Sessions share nothing but the scratch directory; each worker opens,
//! writes and finalizes its own session per job. Results come back in input
//! order.
use crossbeam::channel::unbounded;

use crate::config::BzipConfig;
use crate::session::BzipSession;
use crate::telemetry::TelemetryCounters;
use crate::types::BzipError;
use crate::utils::effective_workers;

#[derive(Debug)]
pub struct BatchReport {
    /// One entry per input payload, same order.
    pub outputs: Vec<Result<Vec<u8>, BzipError>>,
    /// Counters merged across every successful session.
    pub counters: TelemetryCounters,
}

impl BatchReport {
    pub fn all_ok(&self) -> bool {
        self.outputs.iter().all(|r| r.is_ok())
    }
}

fn compress_one(data: &[u8], config: &BzipConfig) -> Result<(Vec<u8>, TelemetryCounters), BzipError> {
    let mut session = BzipSession::open(Vec::new(), config)?;
    session.write(data)?;
    let snapshot = session.finalize()?;
    Ok((session.into_inner(), snapshot.counters))
}

/// Compress every payload in its own session.
///
/// `workers` defaults to one per core and is clamped to `1..=payloads.len()`.
/// A panic on a worker thread is propagated to the caller.
pub fn compress_batch<P>(payloads: &[P], config: &BzipConfig, workers: Option<usize>) -> BatchReport
where
    P: AsRef<[u8]> + Sync,
{
    let mut report = BatchReport { outputs: Vec::with_capacity(payloads.len()), counters: TelemetryCounters::default() };
    if payloads.is_empty() {
        return report;
    }

    let workers = effective_workers(workers, payloads.len());
    let (job_tx, job_rx) = unbounded::<usize>();
    let (res_tx, res_rx) = unbounded();

    for idx in 0..payloads.len() {
        // Receiver is alive in this scope; send cannot fail.
        let _ = job_tx.send(idx);
    }
    drop(job_tx);

    let scoped = crossbeam::scope(|s| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let res_tx = res_tx.clone();
            s.spawn(move |_| {
                while let Ok(idx) = job_rx.recv() {
                    let out = compress_one(payloads[idx].as_ref(), config);
                    if res_tx.send((idx, out)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(res_tx);

    if let Err(panic) = scoped {
        std::panic::resume_unwind(panic);
    }

    let mut slots: Vec<Option<Result<Vec<u8>, BzipError>>> = (0..payloads.len()).map(|_| None).collect();
    for (idx, out) in res_rx.iter() {
        slots[idx] = Some(out.map(|(bytes, counters)| {
            report.counters.merge(&counters);
            bytes
        }));
    }

    report.outputs = slots.into_iter().flatten().collect();
    debug_assert_eq!(report.outputs.len(), payloads.len());
    log::debug!(
        "batch done: {} payloads on {} workers, {} bytes in",
        payloads.len(),
        workers,
        report.counters.bytes_in
    );
    report
}
