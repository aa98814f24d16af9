use super::{runner::RunnerEvent, ProcessId, QuantumPolicy, Simulation, Tick};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new(refresh_rate: Duration) -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread; it stops once the receiver is gone
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = refresh_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(_) => break,
                }

                if last_tick.elapsed() >= refresh_rate {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = crossterm::terminal::disable_raw_mode();
                return Err(err);
            }
        };

        Ok(Self { terminal, input_rx })
    }

    pub fn draw<Q>(
        &mut self,
        simulation: &Simulation<Q>,
        last_tick: Option<&Tick>,
        paused: bool,
    ) -> Result<(), io::Error>
    where
        Q: QuantumPolicy,
    {
        let status = if simulation.is_complete() {
            "complete, press q to quit"
        } else if paused {
            "paused"
        } else {
            "running"
        };
        let current = match simulation.running() {
            Some(process) => format!(
                "CPU: {} | remaining {} | quantum left {}",
                process.pid(),
                process.remaining_time(),
                simulation.quantum_left().unwrap_or(0),
            ),
            None => "CPU: idle".to_owned(),
        };
        let last = last_tick.map_or_else(|| "t=- | not started".to_owned(), Tick::to_string);
        let queue = simulation
            .ready_queue()
            .iter()
            .map(|id| simulation.processes()[id.index()].pid().to_string())
            .collect::<Vec<_>>()
            .join(" <- ");

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([Constraint::Length(6), Constraint::Min(5)])
                .split(f.size());

            let summary = Paragraph::new(vec![
                Spans::from(Span::styled(
                    format!("Clock: {} ({})", simulation.clock(), status),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(current.as_str()),
                Spans::from(format!("Ready: [{}]", queue)),
                Spans::from(last.as_str()),
            ])
            .style(Style::default().fg(Color::LightBlue))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Current Tick")
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(summary, chunks[0]);

            let items = simulation
                .processes()
                .iter()
                .enumerate()
                .map(|(index, process)| {
                    Row::new(vec![
                        Cell::from(process.pid().to_string())
                            .style(Style::default().add_modifier(Modifier::BOLD)),
                        Cell::from("|"),
                        Cell::from(process.arrival_time().to_string()),
                        Cell::from("|"),
                        Cell::from(process.burst_time().to_string()),
                        Cell::from("|"),
                        Cell::from(process.remaining_time().to_string()),
                        Cell::from("|"),
                        Cell::from(process.progress().to_string()),
                        Cell::from("|"),
                        Cell::from(simulation.state(ProcessId::new(index)).to_string()),
                    ])
                });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "PID", "|", "Arrival", "|", "Burst", "|", "Left", "|", "Used", "|",
                        "State",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(6),
                    Constraint::Length(1),
                    Constraint::Length(8),
                    Constraint::Length(1),
                    Constraint::Length(6),
                    Constraint::Length(1),
                    Constraint::Length(6),
                    Constraint::Length(1),
                    Constraint::Length(6),
                    Constraint::Length(1),
                    Constraint::Length(10),
                ])
                .block(Block::default().title(Q::NAME).borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        // Get the user's input and return a matching event
        match self.input_rx.recv() {
            Ok(DisplayEvent::Input(key)) => {
                if key.modifiers.is_empty() {
                    match key.code {
                        KeyCode::Char('q') => return RunnerEvent::Quit,
                        KeyCode::Char('p') => return RunnerEvent::Pause,
                        KeyCode::Char('r') => return RunnerEvent::Resume,
                        KeyCode::Char('s') => return RunnerEvent::Step,
                        _ => {}
                    };
                }
            }
            Ok(DisplayEvent::Tick) => {}
            // The input thread died, nothing can reach us anymore
            Err(_) => return RunnerEvent::Quit,
        }
        RunnerEvent::None
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = self.terminal.show_cursor();
    }
}
