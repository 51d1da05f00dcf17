//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (bad printer selection)
pub const DATAERR: i32 = 65;

/// Cannot open input (no printers configured)
pub const NOINPUT: i32 = 66;

/// Service unavailable (at least one printer could not be reached)
pub const UNAVAILABLE: i32 = 69;

/// Configuration error
pub const CONFIG: i32 = 78;
