pub mod lead;
pub mod region;
pub mod weight;
