use super::{CpuUsage, QuantumPolicy, SchedulerError};
use std::num::NonZeroU64;

/// Classic round robin: every dispatch gets the same slice.
#[derive(Debug, Clone, Copy)]
pub struct FixedQuantum {
    quantum: NonZeroU64,
}

impl FixedQuantum {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }
}

impl QuantumPolicy for FixedQuantum {
    const NAME: &'static str = "Round Robin Scheduler";

    fn quantum(&self, _usage: &CpuUsage) -> Result<u64, SchedulerError> {
        Ok(self.quantum.get())
    }
}
