use crate::aircraft::{AircraftId, AircraftKind};
use crate::error::TowerError;
use crate::status::{EmergencyState, OccupancyLevel, percent_of};
use serde::Deserialize;
use std::fmt;

/// A parking slot for a single aircraft. The gate only remembers the callsign
/// of whoever is parked there.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    number: u32,
    parked: Option<AircraftId>,
}

impl Gate {
    pub fn new(number: u32) -> Gate {
        Gate {
            number,
            parked: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn park_aircraft(&mut self, callsign: AircraftId) -> Result<(), TowerError> {
        if let Some(occupant) = &self.parked {
            return Err(TowerError::NoSpace(format!(
                "gate {} is occupied by {}",
                self.number, occupant
            )));
        }
        self.parked = Some(callsign);
        Ok(())
    }

    pub fn aircraft_leaves(&mut self) -> Option<AircraftId> {
        self.parked.take()
    }

    pub fn is_occupied(&self) -> bool {
        self.parked.is_some()
    }

    pub fn aircraft_at_gate(&self) -> Option<&AircraftId> {
        self.parked.as_ref()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parked {
            Some(callsign) => write!(f, "Gate {} [{}]", self.number, callsign),
            None => write!(f, "Gate {} [empty]", self.number),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum TerminalKind {
    AirplaneTerminal,
    HelicopterTerminal,
}

impl TerminalKind {
    pub fn accepts(&self, kind: AircraftKind) -> bool {
        matches!(
            (self, kind),
            (TerminalKind::AirplaneTerminal, AircraftKind::Airplane)
                | (TerminalKind::HelicopterTerminal, AircraftKind::Helicopter)
        )
    }
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalKind::AirplaneTerminal => write!(f, "AirplaneTerminal"),
            TerminalKind::HelicopterTerminal => write!(f, "HelicopterTerminal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    number: u32,
    kind: TerminalKind,
    emergency: bool,
    gates: Vec<Gate>,
}

impl Terminal {
    pub const MAX_NUM_GATES: usize = 6;

    pub fn new(kind: TerminalKind, number: u32) -> Terminal {
        Terminal {
            number,
            kind,
            emergency: false,
            gates: Vec::with_capacity(Self::MAX_NUM_GATES),
        }
    }

    pub fn airplane(number: u32) -> Terminal {
        Self::new(TerminalKind::AirplaneTerminal, number)
    }

    pub fn helicopter(number: u32) -> Terminal {
        Self::new(TerminalKind::HelicopterTerminal, number)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> TerminalKind {
        self.kind
    }

    pub fn add_gate(&mut self, gate: Gate) -> Result<(), TowerError> {
        if self.gates.len() >= Self::MAX_NUM_GATES {
            return Err(TowerError::NoSpace(format!(
                "terminal {} already has {} gates",
                self.number,
                Self::MAX_NUM_GATES
            )));
        }
        self.gates.push(gate);
        Ok(())
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub(crate) fn gates_mut(&mut self) -> &mut [Gate] {
        &mut self.gates
    }

    /// First free gate in the order gates were added.
    pub fn find_unoccupied_gate(&self) -> Option<&Gate> {
        self.gates.iter().find(|g| !g.is_occupied())
    }
}

impl EmergencyState for Terminal {
    fn declare_emergency(&mut self) {
        self.emergency = true;
    }

    fn clear_emergency(&mut self) {
        self.emergency = false;
    }

    fn has_emergency(&self) -> bool {
        self.emergency
    }
}

impl OccupancyLevel for Terminal {
    fn calculate_occupancy_level(&self) -> u32 {
        let occupied = self.gates.iter().filter(|g| g.is_occupied()).count();
        percent_of(occupied as f64, self.gates.len() as f64)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {} gates", self.kind, self.number, self.gates.len())?;
        if self.emergency {
            write!(f, " (EMERGENCY)")?;
        }
        Ok(())
    }
}
