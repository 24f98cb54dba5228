use crate::aircraft::AircraftId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TowerError {
    #[error("fuel amount {amount} outside of [0, {capacity}] litres")]
    InvalidFuel { amount: f64, capacity: f64 },

    #[error("passenger count {count} outside of [0, {capacity}]")]
    InvalidPassengers { count: u32, capacity: u32 },

    #[error("freight amount {amount} outside of [0, {capacity}] kg")]
    InvalidFreight { amount: f64, capacity: u32 },

    #[error("task list must contain at least one task")]
    EmptyTaskList,

    #[error("invalid task: {0}")]
    InvalidTask(String),

    #[error("no space: {0}")]
    NoSpace(String),

    #[error("no suitable gate available for aircraft {0}")]
    NoSuitableGate(AircraftId),

    #[error("aircraft {0} is not under the tower's jurisdiction")]
    UnknownAircraft(String),

    #[error("terminal {0} does not exist")]
    UnknownTerminal(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown aircraft model {0}")]
    UnknownModel(String),

    #[error("callsign {0} is used by more than one aircraft")]
    DuplicateCallsign(String),

    #[error(transparent)]
    Tower(#[from] TowerError),
}
