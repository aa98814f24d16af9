mod display;
mod error;
mod fixed;
mod median;
mod process;
mod ready_queue;
mod report;
mod runner;
mod simulation;

use std::{iter, time::Duration};

pub use error::SchedulerError;
pub use fixed::FixedQuantum;
pub use median::{median, MedianQuantum};
pub use process::{Process, ProcessId, ProcessState};
pub use ready_queue::ReadyQueue;
pub use report::{ProcessStats, Report};
pub use runner::{RunnerError, SimulationRunner};
pub use simulation::{Dispatch, Outcome, Simulation, Tick};

pub const DEFAULT_REFRESH_RATE: Duration = Duration::from_millis(200);

/// Decides how many ticks a process may keep the CPU once dispatched.
pub trait QuantumPolicy {
    const NAME: &'static str;

    fn quantum(&self, usage: &CpuUsage) -> Result<u64, SchedulerError>;
}

/// Read-only view of the CPU progress of everything competing for the CPU:
/// the running process, the ready queue, and arrivals of the current tick
/// that have not been queued yet.
pub struct CpuUsage<'a> {
    processes: &'a [Process],
    running: Option<ProcessId>,
    ready: &'a ReadyQueue,
    pending_arrivals: usize,
}

impl<'a> CpuUsage<'a> {
    pub fn new(
        processes: &'a [Process],
        running: Option<ProcessId>,
        ready: &'a ReadyQueue,
        pending_arrivals: usize,
    ) -> Self {
        Self {
            processes,
            running,
            ready,
            pending_arrivals,
        }
    }

    pub fn len(&self) -> usize {
        self.pending_arrivals + usize::from(self.running.is_some()) + self.ready.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Progress values; unqueued arrivals contribute zeros.
    pub fn progress(&self) -> impl Iterator<Item = u64> + '_ {
        iter::repeat(0)
            .take(self.pending_arrivals)
            .chain(self.running.into_iter().chain(self.ready.iter()).map(
                move |id| self.processes[id.index()].progress(),
            ))
    }
}
