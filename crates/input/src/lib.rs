//! Command input module.
//!
//! Turns raw command strings into typed [`crate::types::Intent`]s. Holds the
//! static button table that maps each [`crate::types::Button`] to its place in
//! the controller wire frame, and the validator that decides whether a string
//! names a button or a placement. Nothing here performs I/O.

pub mod command;
pub mod map;

pub use puyo_gc_types as types;

pub use command::{parse, CommandParser, SEPARATOR};
pub use map::{button_names, lookup, position, valid_names, BUTTON_TABLE};
