use crate::error::TowerError;
use crate::status::{EmergencyState, OccupancyLevel, percent_of};
use crate::task::{TaskList, TaskType};
use std::fmt;
use std::sync::Arc;

pub type AircraftId = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AircraftKind {
    /// Fixed wing.
    Airplane,
    /// Rotary wing.
    Helicopter,
}

impl fmt::Display for AircraftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AircraftKind::Airplane => write!(f, "AIRPLANE"),
            AircraftKind::Helicopter => write!(f, "HELICOPTER"),
        }
    }
}

/// Physical constants of an aircraft model.
#[derive(Debug, PartialEq)]
pub struct AircraftCharacteristics {
    pub model: &'static str,
    pub kind: AircraftKind,
    /// kg, no fuel or load
    pub empty_weight: u32,
    /// litres
    pub fuel_capacity: f64,
    pub passenger_capacity: u32,
    /// kg
    pub freight_capacity: u32,
}

pub static AIRBUS_A320: AircraftCharacteristics = AircraftCharacteristics {
    model: "AIRBUS_A320",
    kind: AircraftKind::Airplane,
    empty_weight: 42600,
    fuel_capacity: 27200.0,
    passenger_capacity: 150,
    freight_capacity: 0,
};

pub static BOEING_747_8F: AircraftCharacteristics = AircraftCharacteristics {
    model: "BOEING_747_8F",
    kind: AircraftKind::Airplane,
    empty_weight: 197131,
    fuel_capacity: 226117.0,
    passenger_capacity: 0,
    freight_capacity: 137756,
};

pub static ROBINSON_R44: AircraftCharacteristics = AircraftCharacteristics {
    model: "ROBINSON_R44",
    kind: AircraftKind::Helicopter,
    empty_weight: 658,
    fuel_capacity: 190.0,
    passenger_capacity: 4,
    freight_capacity: 0,
};

pub static BOEING_787: AircraftCharacteristics = AircraftCharacteristics {
    model: "BOEING_787",
    kind: AircraftKind::Airplane,
    empty_weight: 119950,
    fuel_capacity: 126206.0,
    passenger_capacity: 242,
    freight_capacity: 0,
};

pub static FOKKER_100: AircraftCharacteristics = AircraftCharacteristics {
    model: "FOKKER_100",
    kind: AircraftKind::Airplane,
    empty_weight: 24375,
    fuel_capacity: 13365.0,
    passenger_capacity: 97,
    freight_capacity: 0,
};

pub static SIKORSKY_SKYCRANE: AircraftCharacteristics = AircraftCharacteristics {
    model: "SIKORSKY_SKYCRANE",
    kind: AircraftKind::Helicopter,
    empty_weight: 8724,
    fuel_capacity: 3328.0,
    passenger_capacity: 0,
    freight_capacity: 9100,
};

pub static CATALOG: [&AircraftCharacteristics; 6] = [
    &AIRBUS_A320,
    &BOEING_747_8F,
    &ROBINSON_R44,
    &BOEING_787,
    &FOKKER_100,
    &SIKORSKY_SKYCRANE,
];

impl AircraftCharacteristics {
    pub fn lookup(model: &str) -> Option<&'static AircraftCharacteristics> {
        CATALOG
            .iter()
            .copied()
            .find(|c| c.model.eq_ignore_ascii_case(model.trim()))
    }
}

impl fmt::Display for AircraftCharacteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model)
    }
}

/// What an aircraft carries: whole passengers, or freight in kg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cargo {
    Passengers(u32),
    Freight(f64),
}

#[derive(Debug, Clone)]
pub struct Aircraft {
    callsign: AircraftId,
    characteristics: &'static AircraftCharacteristics,
    tasks: TaskList,
    fuel_amount: f64,
    emergency: bool,
    cargo: Cargo,
}

impl Aircraft {
    /// kg per litre of aviation fuel
    pub const LITRE_OF_FUEL_WEIGHT: f64 = 0.8;
    /// kg per passenger, baggage included
    pub const AVG_PASSENGER_WEIGHT: f64 = 90.0;

    pub fn passenger(
        callsign: impl Into<AircraftId>,
        characteristics: &'static AircraftCharacteristics,
        tasks: TaskList,
        fuel_amount: f64,
        passengers: u32,
    ) -> Result<Aircraft, TowerError> {
        if passengers > characteristics.passenger_capacity {
            return Err(TowerError::InvalidPassengers {
                count: passengers,
                capacity: characteristics.passenger_capacity,
            });
        }
        Self::new(
            callsign.into(),
            characteristics,
            tasks,
            fuel_amount,
            Cargo::Passengers(passengers),
        )
    }

    pub fn freight(
        callsign: impl Into<AircraftId>,
        characteristics: &'static AircraftCharacteristics,
        tasks: TaskList,
        fuel_amount: f64,
        freight: f64,
    ) -> Result<Aircraft, TowerError> {
        if !(0.0..=characteristics.freight_capacity as f64).contains(&freight) {
            return Err(TowerError::InvalidFreight {
                amount: freight,
                capacity: characteristics.freight_capacity,
            });
        }
        Self::new(
            callsign.into(),
            characteristics,
            tasks,
            fuel_amount,
            Cargo::Freight(freight),
        )
    }

    fn new(
        callsign: AircraftId,
        characteristics: &'static AircraftCharacteristics,
        tasks: TaskList,
        fuel_amount: f64,
        cargo: Cargo,
    ) -> Result<Aircraft, TowerError> {
        if !(0.0..=characteristics.fuel_capacity).contains(&fuel_amount) {
            return Err(TowerError::InvalidFuel {
                amount: fuel_amount,
                capacity: characteristics.fuel_capacity,
            });
        }
        Ok(Aircraft {
            callsign,
            characteristics,
            tasks,
            fuel_amount,
            emergency: false,
            cargo,
        })
    }

    pub fn callsign(&self) -> &AircraftId {
        &self.callsign
    }

    pub fn characteristics(&self) -> &'static AircraftCharacteristics {
        self.characteristics
    }

    pub fn kind(&self) -> AircraftKind {
        self.characteristics.kind
    }

    pub fn task_list(&self) -> &TaskList {
        &self.tasks
    }

    pub fn task_list_mut(&mut self) -> &mut TaskList {
        &mut self.tasks
    }

    pub fn fuel_amount(&self) -> f64 {
        self.fuel_amount
    }

    pub fn cargo(&self) -> Cargo {
        self.cargo
    }

    pub fn fuel_percent_remaining(&self) -> u32 {
        percent_of(self.fuel_amount, self.characteristics.fuel_capacity)
    }

    pub fn total_weight(&self) -> f64 {
        let base = self.characteristics.empty_weight as f64
            + self.fuel_amount * Self::LITRE_OF_FUEL_WEIGHT;
        match self.cargo {
            Cargo::Passengers(count) => base + count as f64 * Self::AVG_PASSENGER_WEIGHT,
            Cargo::Freight(kg) => base + kg,
        }
    }

    /// Freight mass in kg the current task asks for, rounded to the kilogram.
    fn freight_to_load(&self) -> f64 {
        let percent = self.tasks.current_task().load_percent() as f64;
        (self.characteristics.freight_capacity as f64 * percent / 100.0).round()
    }

    /// Number of ticks needed to complete the current task's load at a gate.
    /// Never less than 1.
    pub fn loading_time(&self) -> u32 {
        match self.cargo {
            Cargo::Freight(_) => match self.freight_to_load() {
                kg if kg < 1000.0 => 1,
                kg if kg < 50000.0 => 2,
                _ => 3,
            },
            Cargo::Passengers(_) => {
                let percent = self.tasks.current_task().load_percent() as f64;
                let to_board = self.characteristics.passenger_capacity as f64 * percent / 100.0;
                // log10 is negative below 1 passenger and -inf at 0
                let ticks = to_board.log10().round();
                if ticks >= 1.0 { ticks as u32 } else { 1 }
            }
        }
    }

    /// Applies one tick of the current task. The task list itself is left
    /// where it is.
    pub fn tick(&mut self) {
        let task = *self.tasks.current_task();
        match task.kind() {
            TaskType::Away => {
                let burnt = (self.characteristics.fuel_capacity * 0.1).round();
                self.fuel_amount = (self.fuel_amount - burnt).max(0.0);
            }
            TaskType::Load => {
                let loading_time = self.loading_time();
                let refuelled = (self.characteristics.fuel_capacity / loading_time as f64).round();
                self.fuel_amount =
                    (self.fuel_amount + refuelled).min(self.characteristics.fuel_capacity);
                self.load_cargo(task.load_percent(), loading_time);
            }
            TaskType::Wait | TaskType::Takeoff | TaskType::Land => {}
        }
    }

    fn load_cargo(&mut self, load_percent: u8, loading_time: u32) {
        let target = self.freight_to_load();
        let chars = self.characteristics;
        match &mut self.cargo {
            Cargo::Passengers(count) => {
                let boarding = (chars.passenger_capacity as f64 * load_percent as f64
                    / (loading_time as f64 * 100.0))
                    .round() as u32;
                *count = (*count + boarding).min(chars.passenger_capacity);
            }
            Cargo::Freight(kg) => {
                *kg = (*kg + target / loading_time as f64).min(chars.freight_capacity as f64);
            }
        }
    }
}

impl EmergencyState for Aircraft {
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

impl OccupancyLevel for Aircraft {
    fn calculate_occupancy_level(&self) -> u32 {
        match self.cargo {
            Cargo::Passengers(count) => {
                percent_of(count as f64, self.characteristics.passenger_capacity as f64)
            }
            Cargo::Freight(kg) => percent_of(kg, self.characteristics.freight_capacity as f64),
        }
    }
}

impl fmt::Display for Aircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.characteristics.kind,
            self.callsign,
            self.characteristics,
            self.tasks.current_task()
        )?;
        if self.emergency {
            write!(f, " (EMERGENCY)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use crate::task::TaskType::{Away, Land, Takeoff, Wait};

    static TEST_FREIGHTER: AircraftCharacteristics = AircraftCharacteristics {
        model: "TEST_FREIGHTER",
        kind: AircraftKind::Airplane,
        empty_weight: 1000,
        fuel_capacity: 50000.0,
        passenger_capacity: 0,
        freight_capacity: 100000,
    };

    fn tasks(list: &str) -> TaskList {
        list.parse().unwrap()
    }

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(Some(&AIRBUS_A320), AircraftCharacteristics::lookup("AIRBUS_A320"));
        assert_eq!(Some(&ROBINSON_R44), AircraftCharacteristics::lookup("robinson_r44"));
        assert_eq!(None, AircraftCharacteristics::lookup("CONCORDE"));
        assert_eq!(AircraftKind::Helicopter, SIKORSKY_SKYCRANE.kind);
    }

    #[test]
    fn test_invalid_fuel_rejected() {
        let err = Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("AWAY"), 27201.0, 0).unwrap_err();
        assert_eq!(
            TowerError::InvalidFuel {
                amount: 27201.0,
                capacity: 27200.0
            },
            err
        );
        assert!(Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("AWAY"), -1.0, 0).is_err());
        assert!(Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("AWAY"), f64::NAN, 0).is_err());
    }

    #[test]
    fn test_invalid_cargo_rejected() {
        assert!(matches!(
            Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("AWAY"), 0.0, 151),
            Err(TowerError::InvalidPassengers { count: 151, capacity: 150 })
        ));
        assert!(matches!(
            Aircraft::freight("UTY1", &BOEING_747_8F, tasks("AWAY"), 0.0, -0.5),
            Err(TowerError::InvalidFreight { .. })
        ));
        assert!(matches!(
            Aircraft::freight("UTY1", &BOEING_747_8F, tasks("AWAY"), 0.0, 137757.0),
            Err(TowerError::InvalidFreight { .. })
        ));
    }

    #[test]
    fn test_away_burns_fuel_down_to_zero() {
        let mut ac = Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("AWAY"), 1000.0, 0).unwrap();
        ac.tick();
        assert_eq!(0.0, ac.fuel_amount());

        let mut ac = Aircraft::passenger("QFA2", &AIRBUS_A320, tasks("AWAY"), 27200.0, 0).unwrap();
        ac.tick();
        assert_eq!(27200.0 - 2720.0, ac.fuel_amount());
    }

    #[test]
    fn test_passive_tasks_leave_state_alone() {
        for kind in [Wait, Takeoff, Land] {
            let mut ac =
                Aircraft::passenger("QFA1", &AIRBUS_A320, TaskList::new(vec![Task::new(kind)]).unwrap(), 5000.0, 10)
                    .unwrap();
            ac.tick();
            assert_eq!(5000.0, ac.fuel_amount());
            assert_eq!(Cargo::Passengers(10), ac.cargo());
        }
    }

    #[test]
    fn test_tick_does_not_advance_tasks() {
        let mut ac = Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("AWAY,LAND"), 5000.0, 0).unwrap();
        ac.tick();
        ac.tick();
        assert_eq!(Away, ac.task_list().current_task().kind());
    }

    #[test]
    fn test_passenger_loading() {
        let mut ac = Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("LOAD@60"), 10000.0, 0).unwrap();
        // 90 passengers to board, round(log10(90)) = 2
        assert_eq!(2, ac.loading_time());

        ac.tick();
        assert_eq!(23600.0, ac.fuel_amount());
        assert_eq!(Cargo::Passengers(45), ac.cargo());

        ac.tick();
        assert_eq!(27200.0, ac.fuel_amount());
        assert_eq!(Cargo::Passengers(90), ac.cargo());
        assert_eq!(60, ac.calculate_occupancy_level());
    }

    #[test]
    fn test_passengers_capped_at_capacity() {
        let mut ac = Aircraft::passenger("VH-R44", &ROBINSON_R44, tasks("LOAD@100"), 0.0, 3).unwrap();
        assert_eq!(1, ac.loading_time());
        ac.tick();
        assert_eq!(Cargo::Passengers(4), ac.cargo());
        assert_eq!(190.0, ac.fuel_amount());
        assert_eq!(100, ac.calculate_occupancy_level());
    }

    #[test]
    fn test_passenger_loading_time_floor() {
        for (percent, expected) in [(0, 1), (10, 1), (50, 1), (100, 1)] {
            let ac = Aircraft::passenger(
                "VH-R44",
                &ROBINSON_R44,
                TaskList::new(vec![Task::load(percent).unwrap()]).unwrap(),
                0.0,
                0,
            )
            .unwrap();
            assert_eq!(expected, ac.loading_time(), "load percent {}", percent);
        }
        let ac = Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("WAIT"), 0.0, 0).unwrap();
        assert_eq!(1, ac.loading_time());
    }

    #[test]
    fn test_freight_loading_accrues_per_tick() {
        let mut ac = Aircraft::freight("UTY1", &TEST_FREIGHTER, tasks("LOAD@60"), 0.0, 0.0).unwrap();
        assert_eq!(3, ac.loading_time());
        for expected in [20000.0, 40000.0, 60000.0] {
            ac.tick();
            assert_eq!(Cargo::Freight(expected), ac.cargo());
        }
        assert_eq!(50000.0, ac.fuel_amount());
        assert_eq!(60, ac.calculate_occupancy_level());
    }

    #[test]
    fn test_freight_loading_time_categories() {
        let time_for = |percent: u8, chars: &'static AircraftCharacteristics| {
            Aircraft::freight(
                "UTY1",
                chars,
                TaskList::new(vec![Task::load(percent).unwrap()]).unwrap(),
                0.0,
                0.0,
            )
            .unwrap()
            .loading_time()
        };
        // 455 kg
        assert_eq!(1, time_for(5, &SIKORSKY_SKYCRANE));
        // 4550 kg
        assert_eq!(2, time_for(50, &SIKORSKY_SKYCRANE));
        // exactly 50000 kg
        assert_eq!(3, time_for(50, &TEST_FREIGHTER));
        // 49000 kg
        assert_eq!(2, time_for(49, &TEST_FREIGHTER));
    }

    #[test]
    fn test_freight_capped_at_capacity() {
        let mut ac = Aircraft::freight("UTY1", &SIKORSKY_SKYCRANE, tasks("LOAD@100"), 0.0, 9000.0).unwrap();
        ac.tick();
        assert_eq!(Cargo::Freight(9100.0), ac.cargo());
        assert_eq!(100, ac.calculate_occupancy_level());
    }

    #[test]
    fn test_total_weight() {
        let ac = Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("AWAY"), 10000.0, 100).unwrap();
        assert_eq!(42600.0 + 8000.0 + 9000.0, ac.total_weight());

        let ac = Aircraft::freight("UTY1", &SIKORSKY_SKYCRANE, tasks("AWAY"), 1000.0, 2500.0).unwrap();
        assert_eq!(8724.0 + 800.0 + 2500.0, ac.total_weight());
    }

    #[test]
    fn test_zero_capacity_occupancy() {
        let ac = Aircraft::passenger("UTY1", &BOEING_747_8F, tasks("AWAY"), 0.0, 0).unwrap();
        assert_eq!(0, ac.calculate_occupancy_level());
        let ac = Aircraft::freight("QFA1", &AIRBUS_A320, tasks("AWAY"), 0.0, 0.0).unwrap();
        assert_eq!(0, ac.calculate_occupancy_level());
    }

    #[test]
    fn test_fuel_percent_remaining() {
        let ac = Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("AWAY"), 13600.0, 0).unwrap();
        assert_eq!(50, ac.fuel_percent_remaining());
        let ac = Aircraft::passenger("QFA1", &FOKKER_100, tasks("AWAY"), 100.0, 0).unwrap();
        assert_eq!(1, ac.fuel_percent_remaining());
    }

    #[test]
    fn test_display_and_emergency() {
        let mut ac = Aircraft::passenger("QFA481", &AIRBUS_A320, tasks("LOAD@60,AWAY"), 0.0, 0).unwrap();
        assert_eq!("AIRPLANE QFA481 AIRBUS_A320 LOAD at 60%", ac.to_string());

        ac.declare_emergency();
        assert!(ac.has_emergency());
        assert_eq!("AIRPLANE QFA481 AIRBUS_A320 LOAD at 60% (EMERGENCY)", ac.to_string());

        ac.clear_emergency();
        ac.task_list_mut().move_to_next_task();
        assert!(!ac.has_emergency());
        assert_eq!("AIRPLANE QFA481 AIRBUS_A320 AWAY", ac.to_string());
    }

    #[test]
    fn test_emergency_does_not_change_dynamics() {
        let mut calm = Aircraft::passenger("QFA1", &AIRBUS_A320, tasks("LOAD@60"), 0.0, 0).unwrap();
        let mut alarmed = calm.clone();
        alarmed.declare_emergency();
        calm.tick();
        alarmed.tick();
        assert_eq!(calm.fuel_amount(), alarmed.fuel_amount());
        assert_eq!(calm.cargo(), alarmed.cargo());
    }
}
