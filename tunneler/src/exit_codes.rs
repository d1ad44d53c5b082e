//! Stable exit codes for tunneler CLI commands.

/// Command succeeded; `dig` mined the full depth.
pub const OK: i32 = 0;
/// Invalid config or world file, or any other error.
pub const INVALID: i32 = 1;
/// `dig` stopped early and the agent returned to the mouth.
pub const ABORTED: i32 = 2;
/// `dig` could not return the agent to the mouth.
pub const STRANDED: i32 = 3;
