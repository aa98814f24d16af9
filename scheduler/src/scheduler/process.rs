use std::fmt;

/// Handle of a process inside the simulation's process table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId(usize);

impl ProcessId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Unarrived,
    Ready,
    Running,
    Finished,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::Unarrived => "Unarrived",
            ProcessState::Ready => "Ready",
            ProcessState::Running => "Running",
            ProcessState::Finished => "Finished",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: u64,
    arrival_time: u64,
    burst_time: u64,
    remaining_time: u64,
    start_exec_time: Option<u64>,
    finish_time: Option<u64>,
}

impl Process {
    pub fn new(pid: u64, arrival_time: u64, burst_time: u64) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            start_exec_time: None,
            finish_time: None,
        }
    }

    pub fn pid(&self) -> u64 {
        self.pid
    }

    pub fn arrival_time(&self) -> u64 {
        self.arrival_time
    }

    pub fn burst_time(&self) -> u64 {
        self.burst_time
    }

    pub fn remaining_time(&self) -> u64 {
        self.remaining_time
    }

    pub fn start_exec_time(&self) -> Option<u64> {
        self.start_exec_time
    }

    pub fn finish_time(&self) -> Option<u64> {
        self.finish_time
    }

    /// CPU time consumed so far.
    pub fn progress(&self) -> u64 {
        self.burst_time - self.remaining_time
    }

    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    pub fn waiting_time(&self) -> Option<u64> {
        self.finish_time
            .map(|finish| finish - self.arrival_time - self.burst_time)
    }

    pub fn response_time(&self) -> Option<u64> {
        self.start_exec_time.map(|start| start - self.arrival_time)
    }

    /// Records the first tick on the CPU; later calls keep the first one.
    pub(super) fn start(&mut self, now: u64) {
        self.start_exec_time.get_or_insert(now);
    }

    /// Consumes one unit of CPU work.
    pub(super) fn run(&mut self) {
        debug_assert!(self.remaining_time > 0, "process {} already done", self.pid);
        self.remaining_time -= 1;
    }

    pub(super) fn finish(&mut self, now: u64) {
        debug_assert_eq!(self.remaining_time, 0);
        debug_assert!(self.finish_time.is_none(), "process {} finished twice", self.pid);
        self.finish_time = Some(now);
    }
}
