//! GameCube controller emulation for a falling-piece puzzle game (workspace facade crate).
//!
//! Intents ("press start", "place at column 0 with rotation 3") flow one way
//! through the workspace crates re-exported here:
//!
//! `input` (validate) → `engine` (translate placements) → `frame` (encode) → `adapter` (transmit)
//!
//! ```
//! use puyo_gc::input::CommandParser;
//! use puyo_gc::types::{BoardGeometry, Intent, Placement};
//!
//! let parser = CommandParser::new(BoardGeometry::default());
//! assert_eq!(parser.parse("0,3"), Ok(Intent::Placement(Placement::new(0, 3))));
//! ```

pub use puyo_gc_adapter as adapter;
pub use puyo_gc_engine as engine;
pub use puyo_gc_frame as frame;
pub use puyo_gc_input as input;
pub use puyo_gc_types as types;
