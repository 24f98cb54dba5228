use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use towersim::status::EmergencyState;
use towersim::tower::ControlTower;
use towersim::{scenario, view};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    scenario: PathBuf,

    /// Run this many ticks, print the resulting state and exit
    #[arg(short, long, value_name = "N")]
    ticks: Option<u64>,
}

/// Commands whose argument is a callsign.
const CALLSIGN_COMMANDS: [&str; 6] = ["show", "next", "park", "leave", "emergency", "clear"];

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
    pub callsigns: Vec<String>,
}

impl CompleteHelper {
    /// Start of the word being completed and the words that can finish it.
    fn candidates<'a>(&'a self, line: &'a str) -> (usize, Vec<&'a str>) {
        let (start, words, prefix) = match line.split_once(' ') {
            Some((cmd, rest)) if CALLSIGN_COMMANDS.contains(&cmd) => {
                let prefix = rest.trim_start();
                (line.len() - prefix.len(), &self.callsigns, prefix)
            }
            Some(_) => return (line.len(), Vec::new()),
            None => (0, &self.commands, line),
        };
        (start, words.iter().map(String::as_str).filter(|w| w.starts_with(prefix)).collect())
    }
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let candidates = words
            .into_iter()
            .map(|w| Pair {
                display: w.to_string(),
                replacement: format!("{} ", w),
            })
            .collect();

        Ok((start, candidates))
    }
}

fn paginate(content: String) -> std::io::Result<()> {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())?;

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    pager.wait()?;
    Ok(())
}

fn show(content: String, rows: usize) {
    if rows > 20 {
        if let Err(e) = paginate(content.clone()) {
            tracing::debug!("pager unavailable: {}", e);
            println!("{}", content);
        }
    } else {
        println!("{}", content);
    }
}

fn print_state(tower: &ControlTower) {
    println!("{}", tower.now().to_string().bold());
    println!("{}", view::render(&view::gate_rows(tower)));
    println!("{}", view::render(&view::aircraft_rows(tower)));
}

fn run_ticks(tower: &mut ControlTower, count: u64) {
    for _ in 0..count {
        tower.tick();
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut tower = scenario::load_from_file(&args.scenario)?;

    if let Some(count) = args.ticks {
        run_ticks(&mut tower, count);
        print_state(&tower);
        return Ok(());
    }

    println!("Tower online. Loaded scenario from {}", args.scenario.display());

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: [
            "ls", "terminals", "show", "tick", "next", "park", "leave", "emergency", "clear",
            "gate", "lockdown", "reopen", "help", "exit",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
        callsigns: tower.aircraft().iter().map(|a| a.callsign().to_string()).collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => {
                        let rows = view::aircraft_rows(&tower);
                        if rows.is_empty() {
                            println!("No aircraft under jurisdiction.")
                        } else {
                            show(view::render(&rows), rows.len());
                        }
                    },
                    "terminals" => {
                        let rows = view::gate_rows(&tower);
                        if rows.is_empty() {
                            println!("No terminals registered.")
                        } else {
                            show(view::render(&rows), rows.len());
                        }
                    },
                    "show" => match parts.get(1).and_then(|cs| tower.find_aircraft(cs)) {
                        Some(aircraft) => {
                            let task = aircraft.task_list().current_task();
                            println!("{}", aircraft);
                            println!("  {} - {}", aircraft.task_list(), task.kind().description());
                            match tower.find_gate_of_aircraft(aircraft) {
                                Some(gate) => println!("  {}", gate),
                                None => println!("  not at a gate"),
                            }
                        },
                        None => println!("Usage: show <callsign>"),
                    },
                    "tick" => {
                        let count = parts.get(1).and_then(|n| n.parse::<u64>().ok()).unwrap_or(1);
                        run_ticks(&mut tower, count);
                        println!("Advanced {} tick(s), now at {}.", count, tower.now());
                    },
                    "next" => match parts.get(1).and_then(|cs| tower.find_aircraft_mut(cs)) {
                        Some(aircraft) => {
                            aircraft.task_list_mut().move_to_next_task();
                            println!("{}", aircraft.task_list());
                        },
                        None => println!("Usage: next <callsign>"),
                    },
                    "park" => match parts.get(1) {
                        Some(cs) => match tower.park_at_unoccupied_gate(cs) {
                            Ok(gate) => println!("{} parked at gate {}.", cs, gate),
                            Err(e) => println!("{}", e.to_string().yellow()),
                        },
                        None => println!("Usage: park <callsign>"),
                    },
                    "leave" => match parts.get(1) {
                        Some(cs) => match tower.release_gate(cs) {
                            Some(gate) => println!("{} left gate {}.", cs, gate),
                            None => println!("{} is not at a gate.", cs),
                        },
                        None => println!("Usage: leave <callsign>"),
                    },
                    "emergency" | "clear" => match parts.get(1).and_then(|cs| tower.find_aircraft_mut(cs)) {
                        Some(aircraft) => {
                            if parts[0] == "emergency" {
                                aircraft.declare_emergency();
                            } else {
                                aircraft.clear_emergency();
                            }
                            println!("{}", aircraft);
                        },
                        None => println!("Usage: {} <callsign>", parts[0]),
                    },
                    "gate" => {
                        let terminal = parts.get(1).and_then(|n| n.parse::<u32>().ok());
                        let number = parts.get(2).and_then(|n| n.parse::<u32>().ok());
                        match (terminal, number) {
                            (Some(terminal), Some(number)) => match tower.add_gate(terminal, number) {
                                Ok(()) => println!("Gate {} opened at terminal {}.", number, terminal),
                                Err(e) => println!("{}", e.to_string().yellow()),
                            },
                            _ => println!("Usage: gate <terminal> <number>"),
                        }
                    },
                    "lockdown" | "reopen" => {
                        let number = parts.get(1).and_then(|n| n.parse::<u32>().ok());
                        match number.and_then(|n| tower.find_terminal_mut(n)) {
                            Some(terminal) => {
                                if parts[0] == "lockdown" {
                                    terminal.declare_emergency();
                                } else {
                                    terminal.clear_emergency();
                                }
                                println!("{}", terminal);
                            },
                            None => println!("Usage: {} <terminal>", parts[0]),
                        }
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls                   - List all aircraft under the tower's jurisdiction");
                        println!("  terminals            - List terminals and the occupancy of their gates");
                        println!("  show <callsign>      - Show an aircraft, its task list and its gate");
                        println!("  tick [n]             - Advance the simulation by [n] ticks (default 1)");
                        println!("  next <callsign>      - Move the aircraft on to its next task");
                        println!("  park <callsign>      - Park the aircraft at the first free suitable gate");
                        println!("  leave <callsign>     - Release the gate held by the aircraft");
                        println!("  emergency <callsign> - Declare an emergency on the aircraft");
                        println!("  clear <callsign>     - Clear the aircraft's emergency");
                        println!("  gate <terminal> <n>  - Open gate <n> at the terminal");
                        println!("  lockdown <terminal>  - Declare an emergency at the terminal");
                        println!("  reopen <terminal>    - Clear the terminal's emergency");
                        println!("  help / ?             - Show this help menu");
                        println!("  exit / quit          - Exit the simulator\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
