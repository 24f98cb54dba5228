use crate::aircraft::{Aircraft, AircraftId, AircraftKind};
use crate::error::TowerError;
use crate::ground::{Gate, Terminal};
use crate::time::Tick;
use tracing::{debug, trace, warn};

/// Root of the simulation: owns every terminal and every aircraft under the
/// tower's jurisdiction, in the order they were handed over.
#[derive(Debug, Default)]
pub struct ControlTower {
    terminals: Vec<Terminal>,
    aircraft: Vec<Aircraft>,
    now: Tick,
}

impl ControlTower {
    pub fn new() -> ControlTower {
        ControlTower::default()
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn add_terminal(&mut self, terminal: Terminal) {
        debug!(terminal = %terminal, "terminal registered");
        self.terminals.push(terminal);
        self.assert_invariants();
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    pub fn find_terminal_mut(&mut self, number: u32) -> Option<&mut Terminal> {
        self.terminals.iter_mut().find(|t| t.number() == number)
    }

    /// Opens a new gate at an existing terminal.
    pub fn add_gate(&mut self, terminal: u32, number: u32) -> Result<(), TowerError> {
        self.find_terminal_mut(terminal)
            .ok_or(TowerError::UnknownTerminal(terminal))?
            .add_gate(Gate::new(number))?;
        debug!(terminal, gate = number, "gate opened");
        self.assert_invariants();
        Ok(())
    }

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn find_aircraft(&self, callsign: &str) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| **a.callsign() == *callsign)
    }

    pub fn find_aircraft_mut(&mut self, callsign: &str) -> Option<&mut Aircraft> {
        self.aircraft.iter_mut().find(|a| **a.callsign() == *callsign)
    }

    /// Registers the aircraft. One that is waiting or loading is also parked
    /// at the first free compatible gate; if there is none the aircraft stays
    /// registered and `NoSuitableGate` is returned.
    pub fn add_aircraft(&mut self, aircraft: Aircraft) -> Result<(), TowerError> {
        let callsign = aircraft.callsign().clone();
        let kind = aircraft.kind();
        let needs_gate = aircraft.task_list().current_task().kind().is_at_gate();
        debug!(aircraft = %aircraft, "aircraft registered");
        self.aircraft.push(aircraft);

        let result = if needs_gate {
            self.park(kind, callsign).map(|_| ())
        } else {
            Ok(())
        };
        self.assert_invariants();
        result
    }

    /// First free gate able to take the aircraft, scanning terminals and
    /// then their gates in registration order.
    pub fn find_unoccupied_gate(&self, aircraft: &Aircraft) -> Result<&Gate, TowerError> {
        self.terminals
            .iter()
            .filter(|t| t.kind().accepts(aircraft.kind()))
            .find_map(Terminal::find_unoccupied_gate)
            .ok_or_else(|| TowerError::NoSuitableGate(aircraft.callsign().clone()))
    }

    /// Finds a free gate and parks the aircraft there in one step, returning
    /// the gate number. An aircraft that already holds a gate keeps it.
    pub fn park_at_unoccupied_gate(&mut self, callsign: &str) -> Result<u32, TowerError> {
        let aircraft = self
            .find_aircraft(callsign)
            .ok_or_else(|| TowerError::UnknownAircraft(callsign.to_string()))?;
        if let Some(gate) = self.find_gate_of_aircraft(aircraft) {
            return Ok(gate.number());
        }
        let (kind, callsign) = (aircraft.kind(), aircraft.callsign().clone());
        let result = self.park(kind, callsign);
        self.assert_invariants();
        result
    }

    fn park(&mut self, kind: AircraftKind, callsign: AircraftId) -> Result<u32, TowerError> {
        let found = self
            .terminals
            .iter_mut()
            .filter(|t| t.kind().accepts(kind))
            .flat_map(|t| {
                let terminal = t.number();
                t.gates_mut().iter_mut().map(move |g| (terminal, g))
            })
            .find(|(_, g)| !g.is_occupied());

        match found {
            Some((terminal, gate)) => {
                gate.park_aircraft(callsign.clone())?;
                debug!(%callsign, terminal, gate = gate.number(), "aircraft parked");
                Ok(gate.number())
            }
            None => {
                warn!(%callsign, ?kind, "no suitable gate");
                Err(TowerError::NoSuitableGate(callsign))
            }
        }
    }

    /// Gate the aircraft is parked at, if any. Airborne aircraft hold none.
    pub fn find_gate_of_aircraft(&self, aircraft: &Aircraft) -> Option<&Gate> {
        self.terminals
            .iter()
            .flat_map(Terminal::gates)
            .find(|g| g.aircraft_at_gate() == Some(aircraft.callsign()))
    }

    /// Frees the gate held by the aircraft and returns its number.
    pub fn release_gate(&mut self, callsign: &str) -> Option<u32> {
        let gate = self
            .terminals
            .iter_mut()
            .flat_map(|t| t.gates_mut().iter_mut())
            .find(|g| g.aircraft_at_gate().is_some_and(|c| **c == *callsign))?;
        gate.aircraft_leaves();
        debug!(callsign, gate = gate.number(), "gate released");
        Some(gate.number())
    }

    /// Advances every aircraft by one tick, in arrival order. Gates are left
    /// untouched.
    pub fn tick(&mut self) {
        self.aircraft.iter_mut().for_each(Aircraft::tick);
        self.now += 1;
        trace!(now = %self.now, aircraft = self.aircraft.len(), "tick");
        self.assert_invariants();
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        use crate::aircraft::Cargo;

        debug_assert!(
            self.terminals
                .iter()
                .all(|t| t.gates().len() <= Terminal::MAX_NUM_GATES),
            "Terminal gate limit violated"
        );

        for aircraft in &self.aircraft {
            let chars = aircraft.characteristics();
            debug_assert!(
                (0.0..=chars.fuel_capacity).contains(&aircraft.fuel_amount()),
                "Fuel bounds violated for {}",
                aircraft.callsign()
            );
            debug_assert!(
                match aircraft.cargo() {
                    Cargo::Passengers(n) => n <= chars.passenger_capacity,
                    Cargo::Freight(kg) => (0.0..=chars.freight_capacity as f64).contains(&kg),
                },
                "Cargo bounds violated for {}",
                aircraft.callsign()
            );
        }
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}
}
