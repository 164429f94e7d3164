//! End-to-end command scenarios: parse, translate, encode and transmit into
//! an in-memory link.

use std::time::Duration;

use puyo_gc::adapter::{Delay, LinkConfig, Timing, Transport, TransportError};
use puyo_gc::engine::{translate, Controls};
use puyo_gc::frame::ControllerFrame;
use puyo_gc::input::parse;
use puyo_gc::types::{BoardGeometry, Button, HoldKind, Intent, ParseError, Placement, FRAME_LEN};

#[derive(Default)]
struct Recorded(Vec<Duration>);

impl Delay for Recorded {
    fn delay(&mut self, duration: Duration) {
        self.0.push(duration);
    }
}

fn transport(geometry: BoardGeometry) -> Transport<Vec<u8>, Recorded> {
    let config = LinkConfig::default().with_geometry(geometry);
    Transport::with_delay(Vec::new(), Recorded::default(), &config)
}

fn frames(bytes: &[u8]) -> Vec<ControllerFrame> {
    assert_eq!(bytes.len() % FRAME_LEN, 0, "partial frame on the wire");
    bytes
        .chunks_exact(FRAME_LEN)
        .map(|c| {
            let mut b = [0u8; FRAME_LEN];
            b.copy_from_slice(c);
            ControllerFrame::from_bytes(b)
        })
        .collect()
}

#[test]
fn leftmost_three_turns_from_spawn_three() {
    let geometry = BoardGeometry::new(6, 3);
    let intent = parse("0,3", &geometry).unwrap();
    assert_eq!(intent, Intent::Placement(Placement::new(0, 3)));

    let plan = translate(intent.placement().unwrap(), &geometry, &Controls::default()).unwrap();
    assert_eq!(plan.taps_of(Button::Left), 3);
    assert_eq!(plan.taps_of(Button::B), 1);
    assert_eq!(plan.taps_of(Button::A), 0);
    assert_eq!(plan.last().map(|a| (a.button, a.hold)), Some((Button::Down, HoldKind::Hold)));

    let mut t = transport(geometry);
    t.execute(&intent).unwrap();
    let written = frames(t.link());
    let pressed: Vec<Button> = written
        .iter()
        .step_by(2)
        .map(|f| f.pressed_buttons()[0])
        .collect();
    assert_eq!(
        pressed,
        vec![Button::Left, Button::Left, Button::Left, Button::B, Button::Down]
    );
    assert!(written.iter().skip(1).step_by(2).all(|f| f.is_neutral()));
}

#[test]
fn start_press_is_one_held_pair() {
    let geometry = BoardGeometry::default();
    let intent = parse("Start", &geometry).unwrap();
    assert_eq!(intent, Intent::Button(Button::Start));

    let mut t = transport(geometry);
    t.execute(&intent).unwrap();

    let written = frames(t.link());
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].pressed_buttons().as_slice(), &[Button::Start]);
    assert!(written[1].is_neutral());

    let timing = Timing::default();
    assert_eq!(t.delay().0, vec![timing.hold, timing.release]);
}

#[test]
fn repeated_press_emits_identical_pairs() {
    let mut t = transport(BoardGeometry::default());
    t.press(Button::A).unwrap();
    t.press(Button::A).unwrap();

    let written = frames(t.link());
    assert_eq!(written.len(), 4);
    assert_eq!(written[0..2], written[2..4]);
    assert_eq!(t.delay().0[0..2], t.delay().0[2..4]);
}

#[test]
fn malformed_commands_never_reach_the_link() {
    let geometry = BoardGeometry::new(6, 2);
    assert_eq!(parse("1,2,3", &geometry), Err(ParseError::TooManySeparators));

    let err = parse("9,0", &geometry).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Column"), "{msg}");
    assert!(msg.contains("between 0 and 5"), "{msg}");

    let mut t = transport(geometry);
    for raw in ["1,2,3", "9,0", "select", "0,x"] {
        if let Ok(intent) = parse(raw, &geometry) {
            t.execute(&intent).unwrap();
        }
    }
    assert!(t.link().is_empty());
}

#[test]
fn every_frame_starts_from_neutral() {
    let mut t = transport(BoardGeometry::default());
    t.place(5, 2).unwrap();
    t.press(Button::Z).unwrap();

    for frame in frames(t.link()) {
        assert!(frame.inputs_asserted() <= 1, "stale state in {frame}");
    }
}

#[test]
fn unchecked_placement_is_an_invariant_error() {
    let mut t = transport(BoardGeometry::new(6, 2));
    let err = t.place(-1, 0).unwrap_err();
    assert!(matches!(err, TransportError::Translate(_)));
    assert!(err.to_string().contains("invariant broken"));
    assert_eq!(t.frames_sent(), 0);
}

#[test]
fn seven_column_geometry_accepts_the_extra_column() {
    let geometry = BoardGeometry::new(7, 2);
    let intent = parse("6,0", &geometry).unwrap();
    let mut t = transport(geometry);
    t.execute(&intent).unwrap();
    // four right taps and the drop
    assert_eq!(t.frames_sent(), 10);
}
