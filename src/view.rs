use crate::aircraft::{Aircraft, Cargo};
use crate::status::{EmergencyState, OccupancyLevel};
use crate::tower::ControlTower;
use colored::Colorize;
use tabled::Tabled;
use tabled::settings::{Alignment, Style};

#[derive(Tabled)]
pub struct AircraftRow {
    #[tabled(rename = "Callsign")]
    callsign: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Model")]
    model: &'static str,
    #[tabled(rename = "Task")]
    task: String,
    #[tabled(rename = "Next")]
    next: String,
    #[tabled(rename = "Fuel")]
    fuel: String,
    #[tabled(rename = "Load")]
    load: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Gate")]
    gate: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl AircraftRow {
    pub fn new(aircraft: &Aircraft, tower: &ControlTower) -> AircraftRow {
        let load = match aircraft.cargo() {
            Cargo::Passengers(n) => format!("{} pax", n),
            Cargo::Freight(kg) => format!("{:.0} kg", kg),
        };
        AircraftRow {
            callsign: aircraft.callsign().to_string(),
            kind: aircraft.kind().to_string(),
            model: aircraft.characteristics().model,
            task: aircraft.task_list().current_task().to_string(),
            next: aircraft.task_list().next_task().to_string(),
            fuel: format!("{:.0} L ({}%)", aircraft.fuel_amount(), aircraft.fuel_percent_remaining()),
            load: format!("{} ({}%)", load, aircraft.calculate_occupancy_level()),
            weight: format!("{:.0} kg", aircraft.total_weight()),
            gate: tower
                .find_gate_of_aircraft(aircraft)
                .map(|g| g.number().to_string())
                .unwrap_or_else(|| "-".to_string()),
            status: if aircraft.has_emergency() {
                "EMERGENCY".red().bold().to_string()
            } else {
                "ok".green().to_string()
            },
        }
    }
}

#[derive(Tabled)]
pub struct GateRow {
    #[tabled(rename = "Terminal")]
    terminal: String,
    #[tabled(rename = "Occupancy")]
    occupancy: String,
    #[tabled(rename = "Gate")]
    gate: String,
}

pub fn aircraft_rows(tower: &ControlTower) -> Vec<AircraftRow> {
    tower
        .aircraft()
        .iter()
        .map(|a| AircraftRow::new(a, tower))
        .collect()
}

/// One row per gate; terminals without gates still get a row of their own.
pub fn gate_rows(tower: &ControlTower) -> Vec<GateRow> {
    tower
        .terminals()
        .iter()
        .flat_map(|t| {
            let terminal = if t.has_emergency() {
                t.to_string().red().to_string()
            } else {
                t.to_string()
            };
            let occupancy = format!("{}%", t.calculate_occupancy_level());
            let gates: Vec<String> = if t.gates().is_empty() {
                vec!["-".to_string()]
            } else {
                t.gates().iter().map(|g| g.to_string()).collect()
            };
            gates.into_iter().map(move |gate| GateRow {
                terminal: terminal.clone(),
                occupancy: occupancy.clone(),
                gate,
            })
        })
        .collect()
}

pub fn render<T: Tabled>(rows: &[T]) -> String {
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}
