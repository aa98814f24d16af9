use super::{Process, SchedulerError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStats {
    pub waiting_time: u64,
    pub response_time: u64,
}

/// Waiting and response times of a finished run, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    processes: Vec<ProcessStats>,
    average_waiting_time: f64,
    average_response_time: f64,
}

impl Report {
    pub fn from_processes(processes: &[Process]) -> Result<Self, SchedulerError> {
        let stats = processes
            .iter()
            .map(|process| {
                let unfinished = || SchedulerError::Unfinished { pid: process.pid() };
                Ok(ProcessStats {
                    waiting_time: process.waiting_time().ok_or_else(unfinished)?,
                    response_time: process.response_time().ok_or_else(unfinished)?,
                })
            })
            .collect::<Result<Vec<_>, SchedulerError>>()?;

        let average = |total: u128| {
            if stats.is_empty() {
                0.0
            } else {
                total as f64 / stats.len() as f64
            }
        };
        let average_waiting_time = average(stats.iter().map(|s| u128::from(s.waiting_time)).sum());
        let average_response_time =
            average(stats.iter().map(|s| u128::from(s.response_time)).sum());

        Ok(Self {
            processes: stats,
            average_waiting_time,
            average_response_time,
        })
    }

    pub fn processes(&self) -> &[ProcessStats] {
        &self.processes
    }

    pub fn average_waiting_time(&self) -> f64 {
        self.average_waiting_time
    }

    pub fn average_response_time(&self) -> f64 {
        self.average_response_time
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stats in &self.processes {
            writeln!(f, "{}\t{}", stats.waiting_time, stats.response_time)?;
        }
        writeln!(f, "Average wait time: {:.2}", self.average_waiting_time)?;
        write!(f, "Average response time: {:.2}", self.average_response_time)
    }
}
