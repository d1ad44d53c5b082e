//! Deterministic, pure logic shared by the excavation engine.
//!
//! Core modules must be free of actuator calls. They operate on in-memory
//! snapshots and return deterministic outputs suitable for tests.

pub mod catalog;
pub mod fuel;
pub mod inventory;
pub mod pose;
pub mod types;
