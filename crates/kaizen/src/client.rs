pub mod assistant;
pub mod base;
pub mod platform;
pub mod progress;
pub mod quiz;
