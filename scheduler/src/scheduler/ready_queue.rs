use super::{ProcessId, SchedulerError};
use std::collections::VecDeque;

/// FIFO of processes waiting for the CPU.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    queue: VecDeque<ProcessId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, id: ProcessId) {
        self.queue.push_back(id);
    }

    /// Removes the head. Callers check `is_empty` first; an empty queue here
    /// is a broken scheduler, not bad input.
    pub fn dequeue(&mut self) -> Result<ProcessId, SchedulerError> {
        self.queue
            .pop_front()
            .ok_or(SchedulerError::EmptyReadyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.queue.iter().copied()
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.queue.contains(&id)
    }
}
