//! Host-facing side of the engine: the actuator interface and its adapters.

pub mod actuator;
pub mod config;
pub mod world;
