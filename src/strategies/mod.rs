pub mod scan;
pub mod two_phase;
