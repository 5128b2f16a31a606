/// The owner's CMT decoded but carries no `Implementation` annotation
/// (an interface-only or partial CMT), so there is no typed tree to
/// search for the binding or to count references against.
pub const NO_IMPLEMENTATION_AST: i64 = -2;

/// The CMT file exists but failed to decode.
pub const CMT_READ_ERROR: i64 = -3;

/// No CMT path is known for this module at all.
pub const NO_CMT_FILE: i64 = -4;

/// Reserved for a module whose CMT decoded but names no source path.
/// Not currently reachable from [`crate::count_value_usage`]: source
/// path resolution happens during extraction, before this crate ever
/// sees a module; kept so callers pattern-matching on sentinel values
/// have a stable, complete set to match against.
pub const NO_SOURCE_PATH: i64 = -5;
