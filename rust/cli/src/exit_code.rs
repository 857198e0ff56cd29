//! Exit codes returned by [`crate::run`].

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Configuration, input, I/O or engine error.
pub const ERROR: i32 = 2;
