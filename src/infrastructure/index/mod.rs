pub mod artifacts;
pub mod flat_l2;
