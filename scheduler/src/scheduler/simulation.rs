use super::{
    CpuUsage, Process, ProcessId, ProcessState, QuantumPolicy, ReadyQueue, Report, SchedulerError,
};
use log::{debug, trace};
use std::fmt;

/// A process was granted the CPU at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub pid: u64,
    pub quantum: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was ready; the clock moved on to the next arrival.
    Idle,
    Ran { pid: u64 },
    /// The quantum expired with nobody waiting, so the same process got a
    /// fresh slice and ran.
    Renewed { pid: u64, quantum: u64 },
    Preempted { pid: u64 },
    Finished { pid: u64 },
    /// Every process has finished; stepping further does nothing.
    Complete,
}

/// What one call to [`Simulation::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub time: u64,
    pub dispatch: Option<Dispatch>,
    pub outcome: Outcome,
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.time)?;
        if let Some(dispatch) = self.dispatch {
            write!(
                f,
                " | dispatched {} (quantum {})",
                dispatch.pid, dispatch.quantum
            )?;
        }
        match self.outcome {
            Outcome::Idle => write!(f, " | idle"),
            Outcome::Ran { pid } => write!(f, " | {pid} ran"),
            Outcome::Renewed { pid, quantum } => {
                write!(f, " | {pid} renewed (quantum {quantum}) and ran")
            }
            Outcome::Preempted { pid } => write!(f, " | {pid} preempted"),
            Outcome::Finished { pid } => write!(f, " | {pid} finished"),
            Outcome::Complete => write!(f, " | complete"),
        }
    }
}

/// Tick-driven round-robin simulation over a fixed set of processes.
pub struct Simulation<Q> {
    processes: Vec<Process>,
    /// Process handles ordered by arrival time, then input order.
    arrivals: Vec<ProcessId>,
    next_arrival: usize,
    ready: ReadyQueue,
    running: Option<ProcessId>,
    quantum_left: u64,
    clock: u64,
    policy: Q,
}

impl<Q: QuantumPolicy> Simulation<Q> {
    pub fn new(processes: Vec<Process>, policy: Q) -> Self {
        let mut arrivals: Vec<ProcessId> = (0..processes.len()).map(ProcessId::new).collect();
        // Stable, so equal arrival times keep input order
        arrivals.sort_by_key(|id| processes[id.index()].arrival_time());

        Self {
            processes,
            arrivals,
            next_arrival: 0,
            ready: ReadyQueue::new(),
            running: None,
            quantum_left: 0,
            clock: 0,
            policy,
        }
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready
    }

    pub fn running(&self) -> Option<&Process> {
        self.running.map(|id| &self.processes[id.index()])
    }

    /// Ticks left in the running process's slice.
    pub fn quantum_left(&self) -> Option<u64> {
        self.running.map(|_| self.quantum_left)
    }

    pub fn state(&self, id: ProcessId) -> ProcessState {
        if self.processes[id.index()].is_finished() {
            ProcessState::Finished
        } else if self.running == Some(id) {
            ProcessState::Running
        } else if self.ready.contains(id) {
            ProcessState::Ready
        } else {
            ProcessState::Unarrived
        }
    }

    pub fn is_complete(&self) -> bool {
        self.ready.is_empty() && self.running.is_none() && self.next_arrival == self.arrivals.len()
    }

    /// Runs every process to completion.
    pub fn run(mut self) -> Result<Report, SchedulerError> {
        while !self.is_complete() {
            self.step()?;
        }
        self.into_report()
    }

    pub fn into_report(self) -> Result<Report, SchedulerError> {
        Report::from_processes(&self.processes)
    }

    /// Advances the simulation by one tick. A stretch of idle ticks with
    /// nothing arriving is skipped in a single step.
    pub fn step(&mut self) -> Result<Tick, SchedulerError> {
        let now = self.clock;
        if self.is_complete() {
            return Ok(Tick {
                time: now,
                dispatch: None,
                outcome: Outcome::Complete,
            });
        }

        let arrived = self.arrivals_at(now);
        let mut admitted = false;
        if self.running.is_none() && self.ready.is_empty() {
            if arrived == 0 {
                self.clock = self.next_arrival_time().unwrap_or(now + 1).max(now + 1);
                trace!("t={} idle until {}", now, self.clock);
                return Ok(Tick {
                    time: now,
                    dispatch: None,
                    outcome: Outcome::Idle,
                });
            }
            self.admit(arrived);
            admitted = true;
        }
        let pending = if admitted { 0 } else { arrived };

        let mut dispatch = None;
        if self.running.is_none() {
            let quantum = self.next_quantum(pending)?;
            let id = self.ready.dequeue()?;
            let process = &mut self.processes[id.index()];
            process.start(now);
            debug!("t={} dispatch {} with quantum {}", now, process.pid(), quantum);

            self.running = Some(id);
            self.quantum_left = quantum;
            dispatch = Some(Dispatch {
                pid: process.pid(),
                quantum,
            });
        }

        let id = self.running.ok_or(SchedulerError::NoRunningProcess(now))?;
        let pid = self.processes[id.index()].pid();
        let outcome = if self.processes[id.index()].remaining_time() == 0 {
            self.processes[id.index()].finish(now);
            self.running = None;
            debug!("t={} {} finished", now, pid);
            Outcome::Finished { pid }
        } else if self.quantum_left == 0 {
            if !self.ready.is_empty() {
                self.ready.enqueue(id);
                self.running = None;
                debug!("t={} {} preempted", now, pid);
                Outcome::Preempted { pid }
            } else {
                // Nobody to switch to. This repeats the dispatch computation
                // for the running process and spends the tick on it, instead
                // of releasing the CPU and re-dispatching on the next tick.
                let quantum = self.next_quantum(pending)?;
                self.quantum_left = quantum;
                self.execute(id);
                debug!("t={} {} renewed with quantum {}", now, pid, quantum);
                Outcome::Renewed { pid, quantum }
            }
        } else {
            self.execute(id);
            Outcome::Ran { pid }
        };

        if !admitted {
            self.admit(arrived);
        }
        self.clock += 1;

        let tick = Tick {
            time: now,
            dispatch,
            outcome,
        };
        trace!("{}", tick);
        Ok(tick)
    }

    fn execute(&mut self, id: ProcessId) {
        self.processes[id.index()].run();
        self.quantum_left -= 1;
    }

    fn next_quantum(&self, pending_arrivals: usize) -> Result<u64, SchedulerError> {
        let usage = CpuUsage::new(&self.processes, self.running, &self.ready, pending_arrivals);
        self.policy.quantum(&usage)
    }

    /// Number of not yet admitted processes arriving at `time`.
    fn arrivals_at(&self, time: u64) -> usize {
        self.arrivals[self.next_arrival..]
            .iter()
            .take_while(|id| self.processes[id.index()].arrival_time() == time)
            .count()
    }

    fn next_arrival_time(&self) -> Option<u64> {
        self.arrivals
            .get(self.next_arrival)
            .map(|id| self.processes[id.index()].arrival_time())
    }

    fn admit(&mut self, count: usize) {
        let end = self.next_arrival + count;
        for &id in &self.arrivals[self.next_arrival..end] {
            self.ready.enqueue(id);
        }
        self.next_arrival = end;
    }
}
