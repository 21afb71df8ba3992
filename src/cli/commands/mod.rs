pub mod baseline;
pub mod config;
pub mod ranges;
