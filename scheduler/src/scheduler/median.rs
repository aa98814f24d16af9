use super::{CpuUsage, QuantumPolicy, SchedulerError};
use log::debug;

/// Adaptive round robin: the slice is the median CPU progress of every
/// process that currently competes for the CPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianQuantum;

impl MedianQuantum {
    pub const MIN_QUANTUM: u64 = 1;

    pub fn new() -> Self {
        Self
    }
}

impl QuantumPolicy for MedianQuantum {
    const NAME: &'static str = "Median Round Robin Scheduler";

    fn quantum(&self, usage: &CpuUsage) -> Result<u64, SchedulerError> {
        let mut sample = Vec::new();
        sample.try_reserve_exact(usage.len())?;
        sample.extend(usage.progress());

        // A zero-length slice would never let anything run
        let quantum = median(&mut sample).max(MedianQuantum::MIN_QUANTUM);
        debug!("median quantum {} over {} samples", quantum, sample.len());
        Ok(quantum)
    }
}

/// Median of `sample`, sorting it in place. For an even count the two middle
/// values are averaged and a half result is rounded up. Empty samples give 0.
pub fn median(sample: &mut [u64]) -> u64 {
    if sample.is_empty() {
        return 0;
    }
    sample.sort_unstable();

    let middle = sample.len() / 2;
    if sample.len() % 2 == 1 {
        return sample[middle];
    }

    let sum = sample[middle - 1] + sample[middle];
    if sum % 2 == 0 {
        sum / 2
    } else {
        (sum + 1) / 2
    }
}
