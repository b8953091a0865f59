pub mod generator;
pub mod hint;
