use crate::aircraft::{Aircraft, AircraftCharacteristics, CATALOG};
use crate::ground::{Gate, Terminal, TerminalKind};
use crate::task::{Task, TaskList, TaskType};
use crate::tower::ControlTower;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::sample::select;
use proptest::strategy::Just;

pub fn tasks(list: &str) -> TaskList {
    list.parse().unwrap()
}

pub fn add_terminal(tower: &mut ControlTower, kind: TerminalKind, number: u32, gates: &[u32]) {
    let mut terminal = Terminal::new(kind, number);
    for gate in gates {
        terminal.add_gate(Gate::new(*gate)).unwrap();
    }
    tower.add_terminal(terminal);
}

pub fn passenger(
    callsign: &str,
    characteristics: &'static AircraftCharacteristics,
    task_list: &str,
    fuel: f64,
) -> Aircraft {
    Aircraft::passenger(callsign, characteristics, tasks(task_list), fuel, 0).unwrap()
}

pub fn freighter(
    callsign: &str,
    characteristics: &'static AircraftCharacteristics,
    task_list: &str,
    fuel: f64,
) -> Aircraft {
    Aircraft::freight(callsign, characteristics, tasks(task_list), fuel, 0.0).unwrap()
}

pub fn gate_labels(tower: &ControlTower, terminal: usize) -> Vec<String> {
    tower.terminals()[terminal]
        .gates()
        .iter()
        .map(|g| g.to_string())
        .collect()
}

pub fn arb_task() -> impl Strategy<Value = Task> {
    prop_oneof![
        Just(Task::new(TaskType::Away)),
        Just(Task::new(TaskType::Wait)),
        Just(Task::new(TaskType::Takeoff)),
        Just(Task::new(TaskType::Land)),
        (0..=100u8).prop_map(|p| Task::load(p).unwrap()),
    ]
}

pub fn arb_task_list() -> impl Strategy<Value = TaskList> {
    proptest::collection::vec(arb_task(), 1..8).prop_map(|t| TaskList::new(t).unwrap())
}

/// Any catalog model with fuel and cargo anywhere inside its limits.
pub fn arb_aircraft() -> impl Strategy<Value = Aircraft> {
    (
        select(CATALOG.to_vec()),
        arb_task_list(),
        0.0..=1.0f64,
        0.0..=1.0f64,
    )
        .prop_map(|(chars, tasks, fuel, cargo)| {
            let fuel = (chars.fuel_capacity * fuel).floor();
            if chars.passenger_capacity > 0 {
                let passengers = (chars.passenger_capacity as f64 * cargo).floor() as u32;
                Aircraft::passenger("ARB1", chars, tasks, fuel, passengers).unwrap()
            } else {
                let freight = (chars.freight_capacity as f64 * cargo).floor();
                Aircraft::freight("ARB1", chars, tasks, fuel, freight).unwrap()
            }
        })
}
