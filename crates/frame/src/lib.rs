//! Controller frame encoding.
//!
//! A [`ControllerFrame`] is the complete instantaneous state of the emulated
//! controller, in the 8-byte GameCube report layout:
//!
//! | Byte | Contents |
//! |------|----------|
//! | 0 | `start y x b a` (bits 4..0) |
//! | 1 | `1 l r z` (bit 7 always set, bits 6..4) |
//! | 2, 3 | main stick X, Y (128 = centered) |
//! | 4, 5 | C-stick X, Y (always centered) |
//! | 6, 7 | L, R analog triggers (always 0) |
//!
//! Every frame is built from [`ControllerFrame::NEUTRAL`], so no state ever
//! carries over from a previous action. Each action becomes a [`FramePair`]:
//! the pressed frame followed by the neutral frame, which the receiver sees as
//! a clean press edge and release edge.

use arrayvec::ArrayVec;

use puyo_gc_input::map::{position, BUTTON_TABLE};

pub use puyo_gc_types as types;

use crate::types::{Button, ButtonPosition, ControllerAction, FRAME_LEN, STICK_CENTER};

/// One controller-state report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerFrame([u8; FRAME_LEN]);

impl Default for ControllerFrame {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl ControllerFrame {
    /// Nothing pressed, sticks centered, triggers released.
    pub const NEUTRAL: ControllerFrame = ControllerFrame([
        0x00,
        0x80,
        STICK_CENTER,
        STICK_CENTER,
        STICK_CENTER,
        STICK_CENTER,
        0x00,
        0x00,
    ]);

    pub fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Whether `button`'s bit or axis deflection is present.
    pub fn is_pressed(&self, button: Button) -> bool {
        match position(button) {
            ButtonPosition::Digital { byte, mask } => self.0[byte] & mask != 0,
            ButtonPosition::Analog { axis, offset } => {
                self.0[axis.byte_index()] == deflect(offset)
            }
        }
    }

    /// Decode the buttons held in this frame, in table order.
    pub fn pressed_buttons(&self) -> ArrayVec<Button, 12> {
        BUTTON_TABLE
            .iter()
            .map(|(b, _)| *b)
            .filter(|b| self.is_pressed(*b))
            .collect()
    }

    /// Inputs asserted relative to neutral: flipped bits in the button bytes
    /// plus deflected axis bytes.
    pub fn inputs_asserted(&self) -> u32 {
        self.0
            .iter()
            .zip(Self::NEUTRAL.0.iter())
            .enumerate()
            .map(|(i, (cur, rest))| {
                if i < 2 {
                    (cur ^ rest).count_ones()
                } else {
                    u32::from(cur != rest)
                }
            })
            .sum()
    }
}

impl std::fmt::Display for ControllerFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Pressed frame followed by the neutral frame that releases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramePair {
    pub pressed: ControllerFrame,
    pub neutral: ControllerFrame,
}

fn deflect(offset: i8) -> u8 {
    (STICK_CENTER as i16 + offset as i16).clamp(0, 255) as u8
}

/// Neutral frame with exactly `button` asserted.
pub fn encode_button(button: Button) -> ControllerFrame {
    let mut frame = ControllerFrame::NEUTRAL;
    match position(button) {
        ButtonPosition::Digital { byte, mask } => frame.0[byte] |= mask,
        ButtonPosition::Analog { axis, offset } => frame.0[axis.byte_index()] = deflect(offset),
    }
    frame
}

/// Frames for one action. Hold duration is the transport's concern.
pub fn encode_action(action: &ControllerAction) -> FramePair {
    FramePair {
        pressed: encode_button(action.button),
        neutral: ControllerFrame::NEUTRAL,
    }
}
