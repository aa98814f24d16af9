//! Round-robin CPU scheduling simulator with a fixed or median-adaptive
//! time quantum.

pub mod loader;
pub mod scheduler;

pub use loader::{load_processes, parse_processes, parse_quantum, InputError, QuantumSpec};
pub use scheduler::{
    FixedQuantum, MedianQuantum, Process, QuantumPolicy, Report, SchedulerError, Simulation,
};
