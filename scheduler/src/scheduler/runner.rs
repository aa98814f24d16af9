use super::{display::DisplayTerminal, QuantumPolicy, SchedulerError, Simulation, Tick};
use std::{io, time::Duration};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    None,
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("terminal: {0}")]
    Terminal(#[from] io::Error),
}

/// Pause/step bookkeeping around a simulation, independent of the terminal.
struct Playback<Q> {
    simulation: Simulation<Q>,
    last_tick: Option<Tick>,
    paused: bool,
}

impl<Q: QuantumPolicy> Playback<Q> {
    fn new(simulation: Simulation<Q>) -> Self {
        Self {
            simulation,
            last_tick: None,
            paused: false,
        }
    }

    fn step_simulation(&mut self) -> Result<(), SchedulerError> {
        if !self.simulation.is_complete() {
            self.last_tick = Some(self.simulation.step()?);
        }
        Ok(())
    }

    /// Takes the tick that is due at a refresh unless paused.
    fn advance(&mut self) -> Result<(), SchedulerError> {
        if !self.paused {
            self.step_simulation()?;
        }
        Ok(())
    }

    // Returns false if the program should quit
    fn handle(&mut self, event: RunnerEvent) -> Result<bool, SchedulerError> {
        match event {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => self.step_simulation()?,
            _ => {}
        }
        Ok(true)
    }
}

/// Drives a simulation one tick per refresh while drawing it.
pub struct SimulationRunner<Q> {
    terminal: DisplayTerminal,
    playback: Playback<Q>,
}

impl<Q: QuantumPolicy> SimulationRunner<Q> {
    pub fn new(simulation: Simulation<Q>, refresh_rate: Duration) -> Result<Self, RunnerError> {
        let terminal = DisplayTerminal::new(refresh_rate)?;

        Ok(Self {
            terminal,
            playback: Playback::new(simulation),
        })
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, RunnerError> {
        self.playback.advance()?;
        self.terminal.draw(
            &self.playback.simulation,
            self.playback.last_tick.as_ref(),
            self.playback.paused,
        )?;

        let event = self.terminal.get_input();
        Ok(self.playback.handle(event)?)
    }

    /// Tears down the terminal and hands the simulation back.
    pub fn into_simulation(self) -> Simulation<Q> {
        self.playback.simulation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{FixedQuantum, Outcome, Process};
    use std::num::NonZeroU64;

    fn playback() -> Playback<FixedQuantum> {
        let processes = vec![Process::new(1, 0, 2), Process::new(2, 0, 1)];
        let quantum = FixedQuantum::new(NonZeroU64::new(1).unwrap());
        Playback::new(Simulation::new(processes, quantum))
    }

    #[test]
    fn test_refresh_advances_one_tick_unless_paused() {
        let mut playback = playback();

        playback.advance().unwrap();
        assert_eq!(playback.simulation.clock(), 1);

        assert!(playback.handle(RunnerEvent::Pause).unwrap());
        playback.advance().unwrap();
        playback.advance().unwrap();
        assert_eq!(playback.simulation.clock(), 1);

        assert!(playback.handle(RunnerEvent::Resume).unwrap());
        playback.advance().unwrap();
        assert_eq!(playback.simulation.clock(), 2);
    }

    #[test]
    fn test_step_only_applies_while_paused() {
        let mut playback = playback();

        assert!(playback.handle(RunnerEvent::Step).unwrap());
        assert_eq!(playback.simulation.clock(), 0);
        assert!(playback.last_tick.is_none());

        playback.handle(RunnerEvent::Pause).unwrap();
        playback.handle(RunnerEvent::Step).unwrap();

        assert_eq!(playback.simulation.clock(), 1);
        assert_eq!(
            playback.last_tick.map(|tick| tick.outcome),
            Some(Outcome::Ran { pid: 1 })
        );
    }

    #[test]
    fn test_complete_simulation_keeps_last_tick() {
        let mut playback = playback();
        while !playback.simulation.is_complete() {
            playback.advance().unwrap();
        }
        let last = playback.last_tick;
        let clock = playback.simulation.clock();

        playback.advance().unwrap();

        assert_eq!(playback.last_tick, last);
        assert_eq!(playback.simulation.clock(), clock);
        assert_eq!(
            last.map(|tick| tick.outcome),
            Some(Outcome::Finished { pid: 1 })
        );
    }

    #[test]
    fn test_quit_stops_the_runner() {
        let mut playback = playback();

        assert!(!playback.handle(RunnerEvent::Quit).unwrap());
        assert!(playback.handle(RunnerEvent::None).unwrap());
    }
}
