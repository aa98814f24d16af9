//! Reading the process table and the quantum argument.
//!
//! The input format is loose: a process count followed by that many
//! `pid arrival burst` triples. Anything that is not a decimal digit
//! separates numbers.

use crate::scheduler::Process;
use log::debug;
use std::{fs, io, num::NonZeroU64, path::Path, path::PathBuf};
use thiserror::Error;

/// Largest value accepted for any input integer.
pub const MAX_INTEGER: u64 = i64::MAX as u64;

pub const MEDIAN_TOKEN: &str = "median";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("{}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("missing integer")]
    MissingInteger,

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("no processes")]
    NoProcesses,

    #[error("process {pid} has zero burst time")]
    ZeroBurstTime { pid: u64 },

    #[error("zero quantum length")]
    ZeroQuantum,
}

/// How the time slice is chosen for each dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantumSpec {
    Fixed(NonZeroU64),
    Median,
}

/// Pulls unsigned decimal integers out of a byte buffer.
pub struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skips leading non-digits and scans the integer after them.
    pub fn next_int(&mut self) -> Result<u64, InputError> {
        let mut value: u64 = 0;
        let mut started = false;

        while let Some(&byte) = self.data.get(self.pos) {
            if byte.is_ascii_digit() {
                started = true;
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(byte - b'0')))
                    .filter(|&v| v <= MAX_INTEGER)
                    .ok_or(InputError::IntegerOverflow)?;
            } else if started {
                break;
            }
            self.pos += 1;
        }

        if !started {
            return Err(InputError::MissingInteger);
        }
        Ok(value)
    }
}

/// Parses a process table. Content after the last declared process is ignored.
pub fn parse_processes(data: &[u8]) -> Result<Vec<Process>, InputError> {
    let mut scanner = Scanner::new(data);

    let count = scanner.next_int()?;
    if count == 0 {
        return Err(InputError::NoProcesses);
    }

    let mut processes = Vec::new();
    for _ in 0..count {
        let pid = scanner.next_int()?;
        let arrival_time = scanner.next_int()?;
        let burst_time = scanner.next_int()?;
        if burst_time == 0 {
            return Err(InputError::ZeroBurstTime { pid });
        }
        processes.push(Process::new(pid, arrival_time, burst_time));
    }
    Ok(processes)
}

pub fn load_processes(path: impl AsRef<Path>) -> Result<Vec<Process>, InputError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| InputError::Read {
        path: path.to_owned(),
        source,
    })?;

    let processes = parse_processes(&data)?;
    debug!("loaded {} processes from {}", processes.len(), path.display());
    Ok(processes)
}

/// Parses the quantum argument: `median`, or a positive integer.
pub fn parse_quantum(arg: &str) -> Result<QuantumSpec, InputError> {
    if arg == MEDIAN_TOKEN {
        return Ok(QuantumSpec::Median);
    }
    let quantum = Scanner::new(arg.as_bytes()).next_int()?;
    NonZeroU64::new(quantum)
        .map(QuantumSpec::Fixed)
        .ok_or(InputError::ZeroQuantum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scanner_skips_any_separator() {
        let mut scanner = Scanner::new(b"  12,x7\n\t300");

        assert_eq!(scanner.next_int().unwrap(), 12);
        assert_eq!(scanner.next_int().unwrap(), 7);
        assert_eq!(scanner.next_int().unwrap(), 300);
        assert!(matches!(
            scanner.next_int(),
            Err(InputError::MissingInteger)
        ));
    }

    #[test]
    fn test_scanner_rejects_values_past_signed_range() {
        let mut fits = Scanner::new(b"9223372036854775807");
        let mut too_big = Scanner::new(b"9223372036854775808");

        assert_eq!(fits.next_int().unwrap(), MAX_INTEGER);
        assert!(matches!(
            too_big.next_int(),
            Err(InputError::IntegerOverflow)
        ));
    }

    #[test]
    fn test_parses_process_table_in_order() {
        let processes = parse_processes(b"3\n1 0 7\n2 2 4\n3 4 1\n").unwrap();

        let triples: Vec<_> = processes
            .iter()
            .map(|p| (p.pid(), p.arrival_time(), p.burst_time()))
            .collect();
        assert_eq!(triples, vec![(1, 0, 7), (2, 2, 4), (3, 4, 1)]);
        assert!(processes.iter().all(|p| p.remaining_time() == p.burst_time()));
    }

    #[test]
    fn test_ignores_trailing_content() {
        let processes = parse_processes(b"1\n1 0 2\n2 0 5\n").unwrap();

        assert_eq!(processes.len(), 1);
    }

    #[test]
    fn test_short_table_is_missing_an_integer() {
        assert!(matches!(
            parse_processes(b"2\n1 0 2\n2 0"),
            Err(InputError::MissingInteger)
        ));
        assert!(matches!(parse_processes(b""), Err(InputError::MissingInteger)));
    }

    #[test]
    fn test_zero_count_and_zero_burst_are_rejected() {
        assert!(matches!(
            parse_processes(b"0\n"),
            Err(InputError::NoProcesses)
        ));
        assert!(matches!(
            parse_processes(b"1\n4 0 0\n"),
            Err(InputError::ZeroBurstTime { pid: 4 })
        ));
    }

    #[test]
    fn test_quantum_is_median_or_positive_integer() {
        assert_eq!(parse_quantum("median").unwrap(), QuantumSpec::Median);
        assert_eq!(
            parse_quantum("3").unwrap(),
            QuantumSpec::Fixed(NonZeroU64::new(3).unwrap())
        );
        assert!(matches!(parse_quantum("0"), Err(InputError::ZeroQuantum)));
        assert!(matches!(
            parse_quantum("Median"),
            Err(InputError::MissingInteger)
        ));
    }
}
