use std::collections::TryReserveError;
use thiserror::Error;

/// Faults raised while the simulation runs. None of them are recoverable.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("ready queue is empty at dispatch")]
    EmptyReadyQueue,

    #[error("no process owns the CPU at tick {0}")]
    NoRunningProcess(u64),

    #[error("cannot allocate median sample: {0}")]
    SampleAllocation(#[from] TryReserveError),

    #[error("process {pid} has not finished")]
    Unfinished { pid: u64 },
}
