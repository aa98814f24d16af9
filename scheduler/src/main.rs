use clap::Parser;
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use log::info;
use median_round_robin::{
    load_processes, parse_quantum,
    scheduler::{RunnerError, SimulationRunner, DEFAULT_REFRESH_RATE},
    FixedQuantum, InputError, MedianQuantum, QuantumPolicy, QuantumSpec, Report, SchedulerError,
    Simulation,
};
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};
use thiserror::Error;

/// Simulate round-robin CPU scheduling and report waiting and response times.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Process table: a count followed by `pid arrival burst` triples
    file: PathBuf,

    /// Time quantum: a positive integer, or `median` for the adaptive quantum
    quantum: String,

    /// Step through the schedule in an interactive terminal view
    #[arg(long)]
    watch: bool,

    /// Delay between simulated ticks in the terminal view
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_REFRESH_RATE.as_millis() as u64)]
    refresh_ms: u64,
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("stdout: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let program = std::env::args().next().unwrap_or_else(|| "rr".to_owned());
            eprintln!("{program}: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    // The table is checked before the quantum
    let processes = load_processes(&args.file)?;
    let quantum = parse_quantum(&args.quantum)?;
    info!(
        "simulating {} processes with quantum {:?}",
        processes.len(),
        quantum
    );

    let report = match quantum {
        QuantumSpec::Fixed(quantum) => {
            simulate(Simulation::new(processes, FixedQuantum::new(quantum)), args)?
        }
        QuantumSpec::Median => simulate(Simulation::new(processes, MedianQuantum::new()), args)?,
    };

    if let Some(report) = report {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{report}")?;
        stdout.flush()?;
    }
    Ok(())
}

/// Runs to completion, either straight through or under the terminal view.
/// Returns `None` when the user quit the view before the last process finished.
fn simulate<Q: QuantumPolicy>(
    simulation: Simulation<Q>,
    args: &Args,
) -> Result<Option<Report>, AppError> {
    if !args.watch {
        return Ok(Some(simulation.run()?));
    }

    execute!(io::stdout(), Clear(ClearType::All))?;
    let mut runner = SimulationRunner::new(simulation, Duration::from_millis(args.refresh_ms))?;
    let result = loop {
        match runner.run() {
            Ok(true) => {}
            Ok(false) => break Ok(()),
            Err(err) => break Err(err),
        }
    };
    let simulation = runner.into_simulation();
    execute!(io::stdout(), Clear(ClearType::All))?;
    result?;

    if simulation.is_complete() {
        Ok(Some(simulation.into_report()?))
    } else {
        Ok(None)
    }
}
