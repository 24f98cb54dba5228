mod control_tower;

pub use control_tower::ControlTower;
