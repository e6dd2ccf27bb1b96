#![cfg_attr(test, allow(clippy::unit_arg))]

/// Chess domain types and rules.
pub mod chess;
/// Exhaustive game tree enumeration.
pub mod search;
/// Assorted utilities.
pub mod util;
