//! Strip-mining excavation engine for a grid-based mining agent.
//!
//! The agent digs a straight tunnel of fixed height, one row at a time,
//! keeps valuable material, discards filler when space runs short, and always
//! returns to the tunnel mouth. The crate is split the usual way:
//!
//! - **[`core`]**: Pure logic (material catalog, inventory policy, pose
//!   bookkeeping, fuel arithmetic). No host calls, testable in isolation.
//! - **[`io`]**: The [`io::actuator::Actuator`] seam to the host, the
//!   simulated world behind it, and TOML configuration.
//!
//! Procedures ([`excavate`], [`movement`], [`row`], [`perimeter`], [`strip`])
//! drive an actuator to implement the mining run.

pub mod core;
pub mod excavate;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod movement;
pub mod perimeter;
pub mod row;
pub mod strip;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
