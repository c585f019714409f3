//! Cycle-count latency recording for the `#[ignore]`d micro-benchmarks.

use hdrhistogram::Histogram;

/// Reads the timestamp counter (nanoseconds off x86_64).
#[inline]
fn cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    // Safety: rdtscp is available on every x86_64 target we bench on.
    unsafe {
        core::arch::x86_64::__rdtscp(&mut 0)
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        use std::sync::OnceLock;
        use std::time::Instant;

        static EPOCH: OnceLock<Instant> = OnceLock::new();
        EPOCH.get_or_init(Instant::now).elapsed().as_nanos() as u64
    }
}

/// Histogram of per-operation cycle counts.
pub(crate) struct Recorder {
    name: &'static str,
    hist: Histogram<u64>,
}

impl Recorder {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            hist: Histogram::new(3).unwrap(),
        }
    }

    /// Runs `op` once, recording how long it took.
    #[inline]
    pub(crate) fn time<R>(&mut self, op: impl FnOnce() -> R) -> R {
        let start = cycles();
        let out = op();
        let elapsed = cycles().saturating_sub(start);
        self.hist.saturating_record(elapsed);
        out
    }

    pub(crate) fn report(&self) {
        let h = &self.hist;
        println!(
            "{:<24} p50 {:>5} | p99 {:>5} | p99.9 {:>6} | min {:>4} | max {:>7} | n {}",
            self.name,
            h.value_at_quantile(0.50),
            h.value_at_quantile(0.99),
            h.value_at_quantile(0.999),
            h.min(),
            h.max(),
            h.len(),
        );
    }
}
