pub mod assistant;
pub mod backend;
pub mod invalidation;
pub mod openai;
pub mod progress;
pub mod quiz;
