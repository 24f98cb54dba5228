use crate::aircraft::{AIRBUS_A320, Cargo, ROBINSON_R44};
use crate::ground::TerminalKind;
use crate::status::OccupancyLevel;
use crate::tower::ControlTower;
use crate::tower::tests::utils::{add_terminal, arb_aircraft, arb_task_list, passenger};
use proptest::prelude::*;
use proptest::proptest;

proptest! {
    #[test]
    fn test_fuel_and_cargo_stay_in_bounds(
        mut aircraft in arb_aircraft(),
        steps in prop::collection::vec(any::<bool>(), 1..40)
    ) {
        let chars = aircraft.characteristics();
        for advance in steps {
            aircraft.tick();
            if advance {
                aircraft.task_list_mut().move_to_next_task();
            }

            let fuel = aircraft.fuel_amount();
            prop_assert!(
                (0.0..=chars.fuel_capacity).contains(&fuel),
                "\nFuel out of bounds:\n{} has {} L of {} L",
                aircraft, fuel, chars.fuel_capacity
            );
            match aircraft.cargo() {
                Cargo::Passengers(n) => prop_assert!(
                    n <= chars.passenger_capacity,
                    "\nToo many passengers:\n{} carries {} of {}",
                    aircraft, n, chars.passenger_capacity
                ),
                Cargo::Freight(kg) => prop_assert!(
                    (0.0..=chars.freight_capacity as f64).contains(&kg),
                    "\nFreight out of bounds:\n{} carries {} kg of {} kg",
                    aircraft, kg, chars.freight_capacity
                ),
            }
            let occupancy = aircraft.calculate_occupancy_level();
            prop_assert!(occupancy <= 100, "\nOccupancy {} above 100", occupancy);
            prop_assert!(aircraft.fuel_percent_remaining() <= 100);
            prop_assert!(aircraft.loading_time() >= 1);
        }
    }

    #[test]
    fn test_task_list_is_circular(mut tasks in arb_task_list()) {
        let start = *tasks.current_task();
        let len = tasks.tasks().len();
        let next = *tasks.next_task();
        if len == 1 {
            prop_assert_eq!(start, next);
        }
        for _ in 0..len {
            tasks.move_to_next_task();
        }
        prop_assert_eq!(start, *tasks.current_task());
        let suffix = format!("[1/{}]", len);
        prop_assert!(tasks.to_string().ends_with(&suffix), "\n{} not back at the first task", tasks);
    }

    #[test]
    fn test_parked_aircraft_fill_gates_in_order(
        waiting in prop::collection::vec(any::<bool>(), 1..16),
        gates_per_terminal in prop::collection::vec(0..=6usize, 1..4)
    ) {
        let mut tower = ControlTower::new();
        let mut next_gate = 1;
        for (i, count) in gates_per_terminal.iter().enumerate() {
            let gates: Vec<u32> = (next_gate..next_gate + *count as u32).collect();
            next_gate += *count as u32;
            add_terminal(&mut tower, TerminalKind::AirplaneTerminal, i as u32 + 1, &gates);
        }
        add_terminal(&mut tower, TerminalKind::HelicopterTerminal, 99, &[99]);
        let capacity = next_gate as usize - 1;

        let mut parked = 0;
        for (i, at_gate) in waiting.iter().enumerate() {
            let list = if *at_gate { "WAIT,AWAY" } else { "AWAY,WAIT" };
            let result = tower.add_aircraft(passenger(&format!("QFA{}", i), &AIRBUS_A320, list, 0.0));
            if *at_gate {
                prop_assert_eq!(parked < capacity, result.is_ok());
                if parked < capacity {
                    parked += 1;
                }
            } else {
                prop_assert!(result.is_ok());
            }
        }
        prop_assert_eq!(waiting.len(), tower.aircraft().len());

        // occupied gates form a prefix of the registration order
        let occupied: Vec<bool> = tower.terminals()
            .iter()
            .filter(|t| t.kind() == TerminalKind::AirplaneTerminal)
            .flat_map(|t| t.gates())
            .map(|g| g.is_occupied())
            .collect();
        prop_assert_eq!(parked, occupied.iter().filter(|o| **o).count());
        prop_assert!(occupied.iter().take(parked).all(|o| *o));

        // airplanes never spill into the helicopter terminal
        let helipad = tower.terminals().last().unwrap();
        prop_assert!(!helipad.gates()[0].is_occupied());
        prop_assert!(tower.find_unoccupied_gate(&passenger("VH-R44", &ROBINSON_R44, "WAIT", 0.0)).is_ok());
    }
}
