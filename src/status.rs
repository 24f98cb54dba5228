/// Something whose operation can be disrupted by an emergency, such as a
/// mechanical failure or a security incident.
pub trait EmergencyState {
    fn declare_emergency(&mut self);
    fn clear_emergency(&mut self);
    fn has_emergency(&self) -> bool;
}

/// Something with a fixed capacity and a current fill level, expressed as a
/// whole percentage from 0 (empty) to 100 (full).
pub trait OccupancyLevel {
    fn calculate_occupancy_level(&self) -> u32;
}

/// Rounded percentage of `used` over `capacity`, or 0 when there is no capacity.
pub(crate) fn percent_of(used: f64, capacity: f64) -> u32 {
    if capacity <= 0.0 {
        return 0;
    }
    (used * 100.0 / capacity).round().clamp(0.0, 100.0) as u32
}
