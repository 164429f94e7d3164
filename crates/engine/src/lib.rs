//! Move translation.
//!
//! Turns a validated [`types::Placement`] into the ordered list of atomic
//! controller actions that walk the falling piece from the spawn column to its
//! target: horizontal taps first, then rotation taps, then a single held drop.
//! Pure and deterministic; frame encoding and timing live elsewhere.

pub mod place;

pub use puyo_gc_types as types;

pub use place::{normalize_rotation, translate, Controls, MovePlan, MAX_PLAN_ACTIONS};
