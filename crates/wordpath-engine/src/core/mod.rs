pub mod engine;
pub mod grid;
pub mod progress;
pub mod rng;
pub mod selection;
