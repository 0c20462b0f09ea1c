//! Domain layer: core models and port traits, free of transport details.

pub mod models;
pub mod ports;
