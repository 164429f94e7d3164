//! Button table: names to wire positions.
//!
//! Layout follows the GameCube controller report. Byte 0 carries
//! `start y x b a` in bits 4..0, byte 1 carries `l r z` in bits 6..4, bytes
//! 2 and 3 are the main stick X/Y. Positions must stay stable for a given
//! firmware build.

use crate::types::{Axis, Button, ButtonPosition, ParseError};

/// Full deflection towards the low end of an axis (0).
const STICK_MIN: i8 = -128;
/// Full deflection towards the high end of an axis (255).
const STICK_MAX: i8 = 127;

/// Wire position of every button, indexed by `Button as usize`.
pub const BUTTON_TABLE: [(Button, ButtonPosition); 12] = [
    (Button::A, ButtonPosition::Digital { byte: 0, mask: 0x01 }),
    (Button::B, ButtonPosition::Digital { byte: 0, mask: 0x02 }),
    (Button::X, ButtonPosition::Digital { byte: 0, mask: 0x04 }),
    (Button::Y, ButtonPosition::Digital { byte: 0, mask: 0x08 }),
    (Button::Z, ButtonPosition::Digital { byte: 1, mask: 0x10 }),
    (Button::L, ButtonPosition::Digital { byte: 1, mask: 0x40 }),
    (Button::R, ButtonPosition::Digital { byte: 1, mask: 0x20 }),
    (Button::Start, ButtonPosition::Digital { byte: 0, mask: 0x10 }),
    (
        Button::Up,
        ButtonPosition::Analog {
            axis: Axis::StickY,
            offset: STICK_MAX,
        },
    ),
    (
        Button::Down,
        ButtonPosition::Analog {
            axis: Axis::StickY,
            offset: STICK_MIN,
        },
    ),
    (
        Button::Left,
        ButtonPosition::Analog {
            axis: Axis::StickX,
            offset: STICK_MIN,
        },
    ),
    (
        Button::Right,
        ButtonPosition::Analog {
            axis: Axis::StickX,
            offset: STICK_MAX,
        },
    ),
];

/// Wire position of `button`.
pub fn position(button: Button) -> ButtonPosition {
    BUTTON_TABLE[button as usize].1
}

/// Canonical names of every button, in table order.
pub fn button_names() -> impl Iterator<Item = &'static str> {
    BUTTON_TABLE.iter().map(|(b, _)| b.as_str())
}

/// Comma separated list of valid names (error messages, CLI help).
pub fn valid_names() -> String {
    button_names().collect::<Vec<_>>().join(", ")
}

/// Look up a button by name, case-insensitively.
pub fn lookup(name: &str) -> Result<Button, ParseError> {
    let canonical = name.trim().to_lowercase();
    BUTTON_TABLE
        .iter()
        .map(|(b, _)| *b)
        .find(|b| b.as_str() == canonical)
        .ok_or_else(|| ParseError::UnknownButton {
            name: canonical,
            valid: valid_names(),
        })
}
