pub mod assistant;
pub mod chat;
pub mod module;
pub mod progress;
pub mod quiz;
pub mod status;
