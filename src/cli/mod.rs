//! Command-line surface
//!
//! Parsing lives in the library so that flag handling can be tested without
//! spawning the binary.

pub mod flags;

pub use flags::{parse_flags, InvocationFlags};
