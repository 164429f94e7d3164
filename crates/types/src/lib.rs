//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by every layer of the controller
//! pipeline: buttons and their wire positions, placement intents, atomic
//! controller actions, board geometry and the error types produced while
//! validating and translating intents.
//!
//! # Board Geometry
//!
//! The target game uses a 6-column well:
//!
//! - **Columns**: 6 (indexed 0-5, counted from the left edge)
//! - **Spawn column**: 2 (new pieces always appear here)
//!
//! Both values are configuration, see [`BoardGeometry`].
//!
//! # Controller Timing
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TAP_MS` | 34 | Pressed-frame hold for a repositioning tap (~2 polls at 60Hz) |
//! | `HOLD_MS` | 80 | Pressed-frame hold for a deliberate press or the drop |
//! | `RELEASE_MS` | 34 | Neutral-frame hold after every action |
//! | `COMMAND_GAP_MS` | 50 | Pause between consecutive commands |
//!
//! # Examples
//!
//! ```
//! use puyo_gc_types::{Button, HoldKind, ControllerAction, BOARD_COLUMNS};
//!
//! // Parse from string (case-insensitive)
//! let start = Button::from_str("Start").unwrap();
//! assert_eq!(start, Button::Start);
//! assert_eq!(start.as_str(), "start");
//!
//! let tap = ControllerAction::tap(Button::Left);
//! assert_eq!(tap.hold, HoldKind::Tap);
//!
//! assert_eq!(BOARD_COLUMNS, 6);
//! ```

mod error;

pub use error::{ParseError, TranslateError};

use serde::{Deserialize, Serialize};

/// Board width in columns (6 columns)
pub const BOARD_COLUMNS: u8 = 6;

/// Column where a new piece appears
pub const SPAWN_COLUMN: u8 = 2;

/// Rotation bounds accepted from callers (quarter turns)
pub const MIN_ROTATION: i8 = -3;
pub const MAX_ROTATION: i8 = 3;

/// Pressed-frame hold for a repositioning tap (34ms)
pub const TAP_MS: u64 = 34;

/// Pressed-frame hold for a deliberate button press (80ms)
pub const HOLD_MS: u64 = 80;

/// Neutral-frame hold after every action (34ms)
pub const RELEASE_MS: u64 = 34;

/// Pause between consecutive commands of one invocation (50ms)
pub const COMMAND_GAP_MS: u64 = 50;

/// Size of one controller-state frame on the wire
pub const FRAME_LEN: usize = 8;

/// Resting value of every analog stick axis
pub const STICK_CENTER: u8 = 128;


/// Named controller inputs the emulator can drive
///
/// Face buttons, shoulders and start are digital bits. `Up`, `Down`, `Left`
/// and `Right` are the main analog stick tilted all the way in that
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    Z,
    L,
    R,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Every button, in wire-table order.
    pub const ALL: [Button; 12] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::Z,
        Button::L,
        Button::R,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Parse button from string (case-insensitive, surrounding whitespace ignored)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "a" => Some(Button::A),
            "b" => Some(Button::B),
            "x" => Some(Button::X),
            "y" => Some(Button::Y),
            "z" => Some(Button::Z),
            "l" => Some(Button::L),
            "r" => Some(Button::R),
            "start" => Some(Button::Start),
            "up" => Some(Button::Up),
            "down" => Some(Button::Down),
            "left" => Some(Button::Left),
            "right" => Some(Button::Right),
            _ => None,
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Button::A => "a",
            Button::B => "b",
            Button::X => "x",
            Button::Y => "y",
            Button::Z => "z",
            Button::L => "l",
            Button::R => "r",
            Button::Start => "start",
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
        }
    }
}

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Button {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Button::from_str(&s).ok_or_else(|| serde::de::Error::custom("unknown button"))
    }
}

impl Serialize for Button {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Analog axes the emulator deflects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    StickX,
    StickY,
}

impl Axis {
    /// Byte index of this axis inside a controller frame
    pub fn byte_index(&self) -> usize {
        match self {
            Axis::StickX => 2,
            Axis::StickY => 3,
        }
    }
}

/// Where a button lives inside the wire frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPosition {
    /// A single bit: `frame[byte] |= mask`
    Digital { byte: usize, mask: u8 },
    /// A stick deflection relative to [`STICK_CENTER`]
    Analog { axis: Axis, offset: i8 },
}

/// Target column and rotation for the falling piece
///
/// `rotation` counts quarter turns; positive is clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub column: i8,
    pub rotation: i8,
}

impl Placement {
    pub fn new(column: i8, rotation: i8) -> Self {
        Self { column, rotation }
    }
}

/// A validated high-level command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Button(Button),
    Placement(Placement),
}

impl Intent {
    pub fn button(&self) -> Option<Button> {
        match self {
            Intent::Button(b) => Some(*b),
            Intent::Placement(_) => None,
        }
    }

    pub fn placement(&self) -> Option<Placement> {
        match self {
            Intent::Button(_) => None,
            Intent::Placement(p) => Some(*p),
        }
    }
}

/// How long the pressed frame of an action is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoldKind {
    /// Short repositioning tap
    Tap,
    /// Deliberate press (button commands, drop)
    Hold,
}

/// One atomic unit of controller input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerAction {
    pub button: Button,
    pub hold: HoldKind,
}

impl ControllerAction {
    pub fn tap(button: Button) -> Self {
        Self {
            button,
            hold: HoldKind::Tap,
        }
    }

    pub fn hold(button: Button) -> Self {
        Self {
            button,
            hold: HoldKind::Hold,
        }
    }
}

/// Board shape as seen by the translator and validator
///
/// Valid columns are `0..columns`. Supplied by whoever knows the board
/// (vision, configuration); defaults describe the 6-column well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardGeometry {
    pub columns: u8,
    pub spawn_column: u8,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            columns: BOARD_COLUMNS,
            spawn_column: SPAWN_COLUMN,
        }
    }
}

impl BoardGeometry {
    pub fn new(columns: u8, spawn_column: u8) -> Self {
        Self {
            columns,
            spawn_column,
        }
    }

    /// Smallest valid column (always the left edge)
    pub fn min_column(&self) -> i8 {
        0
    }

    /// Largest valid column, inclusive
    pub fn max_column(&self) -> i8 {
        self.columns.saturating_sub(1).min(i8::MAX as u8) as i8
    }

    pub fn contains(&self, column: i8) -> bool {
        self.columns > 0 && column >= self.min_column() && column <= self.max_column()
    }

    /// A geometry is usable when it has columns and the spawn lies inside it.
    pub fn is_consistent(&self) -> bool {
        self.columns > 0 && self.columns <= i8::MAX as u8 && self.spawn_column < self.columns
    }
}
