use crate::aircraft::{Aircraft, AircraftCharacteristics};
use crate::error::{ScenarioError, TowerError};
use crate::ground::{Gate, Terminal, TerminalKind};
use crate::status::EmergencyState;
use crate::task::TaskList;
use crate::tower::ControlTower;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Deserialize)]
struct RawTerminal {
    number: u32,
    kind: TerminalKind,
    #[serde(default)]
    gates: Vec<u32>,
    #[serde(default)]
    emergency: bool,
}

#[derive(Deserialize)]
struct RawAircraft {
    callsign: String,
    model: String,
    tasks: String,
    fuel: f64,
    #[serde(default)]
    cargo: f64,
    #[serde(default)]
    emergency: bool,
}

#[derive(Deserialize)]
struct RawScenario {
    #[serde(default)]
    terminals: Vec<RawTerminal>,
    #[serde(default)]
    aircraft: Vec<RawAircraft>,
}

impl RawAircraft {
    /// Passenger capable models become passenger aircraft, everything else
    /// carries freight.
    fn build(self) -> Result<Aircraft, ScenarioError> {
        let chars = AircraftCharacteristics::lookup(&self.model)
            .ok_or_else(|| ScenarioError::UnknownModel(self.model.clone()))?;
        let tasks: TaskList = self.tasks.parse()?;
        let mut aircraft = if chars.passenger_capacity > 0 {
            if self.cargo.fract() != 0.0 || self.cargo < 0.0 {
                return Err(TowerError::InvalidPassengers {
                    count: self.cargo.max(0.0) as u32,
                    capacity: chars.passenger_capacity,
                }
                .into());
            }
            Aircraft::passenger(self.callsign, chars, tasks, self.fuel, self.cargo as u32)?
        } else {
            Aircraft::freight(self.callsign, chars, tasks, self.fuel, self.cargo)?
        };
        if self.emergency {
            aircraft.declare_emergency();
        }
        Ok(aircraft)
    }
}

impl RawTerminal {
    fn build(self) -> Result<Terminal, TowerError> {
        let mut terminal = Terminal::new(self.kind, self.number);
        for gate in self.gates {
            terminal.add_gate(Gate::new(gate))?;
        }
        if self.emergency {
            terminal.declare_emergency();
        }
        Ok(terminal)
    }
}

/// Builds a tower from a scenario document. Terminals are registered before
/// any aircraft; aircraft that find no gate stay registered without one.
/// Callsigns identify aircraft at their gates, so a repeated one fails the load.
pub fn from_str(data: &str) -> Result<ControlTower, ScenarioError> {
    let raw: RawScenario = serde_json::from_str(data)?;
    let mut tower = ControlTower::new();

    for terminal in raw.terminals {
        tower.add_terminal(terminal.build()?);
    }

    for aircraft in raw.aircraft {
        if tower.find_aircraft(&aircraft.callsign).is_some() {
            return Err(ScenarioError::DuplicateCallsign(aircraft.callsign));
        }
        match tower.add_aircraft(aircraft.build()?) {
            Ok(()) => {}
            Err(TowerError::NoSuitableGate(callsign)) => {
                warn!(%callsign, "registered without a gate");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(tower)
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ControlTower, ScenarioError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)?;
    let tower = from_str(&data)?;
    info!(
        path = %path.display(),
        terminals = tower.terminals().len(),
        aircraft = tower.aircraft().len(),
        "scenario loaded"
    );
    Ok(tower)
}
