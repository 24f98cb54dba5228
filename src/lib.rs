pub mod aircraft;
pub mod error;
pub mod ground;
pub mod scenario;
pub mod status;
pub mod task;
pub mod time;
pub mod tower;
pub mod view;
