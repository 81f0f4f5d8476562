pub mod parse;
pub mod simulator;
