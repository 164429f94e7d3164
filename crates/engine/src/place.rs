use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{BoardGeometry, Button, ControllerAction, HoldKind, Placement, TranslateError};

/// Upper bound on actions in one plan: a full-width walk, a half turn and
/// the drop.
pub const MAX_PLAN_ACTIONS: usize = 130;

/// Which controller input performs each game move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub move_left: Button,
    pub move_right: Button,
    pub rotate_cw: Button,
    pub rotate_ccw: Button,
    pub drop: Button,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            move_left: Button::Left,
            move_right: Button::Right,
            rotate_cw: Button::A,
            rotate_ccw: Button::B,
            drop: Button::Down,
        }
    }
}

/// Ordered actions for one placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan(ArrayVec<ControllerAction, MAX_PLAN_ACTIONS>);

impl MovePlan {
    pub fn actions(&self) -> &[ControllerAction] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControllerAction> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of taps on `button`.
    pub fn taps_of(&self, button: Button) -> usize {
        self.0
            .iter()
            .filter(|a| a.button == button && a.hold == HoldKind::Tap)
            .count()
    }

    /// The final action (the drop, for any plan built by [`translate`]).
    pub fn last(&self) -> Option<&ControllerAction> {
        self.0.last()
    }
}

impl<'a> IntoIterator for &'a MovePlan {
    type Item = &'a ControllerAction;
    type IntoIter = std::slice::Iter<'a, ControllerAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Shortest signed quarter-turn count equivalent to `rotation`.
///
/// `3` becomes `-1`. A half turn stays `2` (clockwise).
pub fn normalize_rotation(rotation: i8) -> i8 {
    match rotation.rem_euclid(4) {
        3 => -1,
        r => r,
    }
}

/// Build the action sequence for `placement`.
///
/// Horizontal taps come first: the piece can be shifted while falling, but
/// rotation is only reliable once it is aligned. The drop is held, not tapped.
pub fn translate(
    placement: Placement,
    geometry: &BoardGeometry,
    controls: &Controls,
) -> Result<MovePlan, TranslateError> {
    if !geometry.is_consistent() {
        return Err(TranslateError::InvariantBroken(format!(
            "inconsistent board geometry: {} columns, spawn column {}",
            geometry.columns, geometry.spawn_column
        )));
    }
    if !geometry.contains(placement.column) {
        return Err(TranslateError::InvariantBroken(format!(
            "column {} outside 0..={} reached the translator",
            placement.column,
            geometry.max_column()
        )));
    }

    let mut plan = ArrayVec::<ControllerAction, MAX_PLAN_ACTIONS>::new();
    let mut push = |action: ControllerAction| {
        plan.try_push(action).map_err(|_| {
            TranslateError::InvariantBroken(format!(
                "plan exceeds {MAX_PLAN_ACTIONS} actions"
            ))
        })
    };

    let dx = placement.column as i16 - geometry.spawn_column as i16;
    let horizontal = if dx < 0 {
        controls.move_left
    } else {
        controls.move_right
    };
    for _ in 0..dx.unsigned_abs() {
        push(ControllerAction::tap(horizontal))?;
    }

    let turns = normalize_rotation(placement.rotation);
    let rotate = match turns {
        -2..=-1 => controls.rotate_ccw,
        0..=2 => controls.rotate_cw,
        other => {
            return Err(TranslateError::InvariantBroken(format!(
                "rotation {} normalized to {other}, outside -2..=2",
                placement.rotation
            )))
        }
    };
    for _ in 0..turns.unsigned_abs() {
        push(ControllerAction::tap(rotate))?;
    }

    push(ControllerAction::hold(controls.drop))?;

    Ok(MovePlan(plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(column: i8, rotation: i8, spawn: u8) -> MovePlan {
        translate(
            Placement::new(column, rotation),
            &BoardGeometry::new(6, spawn),
            &Controls::default(),
        )
        .expect("valid placement")
    }

    #[test]
    fn rotation_normalizes_to_fewest_presses() {
        assert_eq!(normalize_rotation(0), 0);
        assert_eq!(normalize_rotation(1), 1);
        assert_eq!(normalize_rotation(2), 2);
        assert_eq!(normalize_rotation(3), -1);
        assert_eq!(normalize_rotation(-1), -1);
        assert_eq!(normalize_rotation(-2), 2);
        assert_eq!(normalize_rotation(-3), 1);
        assert_eq!(normalize_rotation(4), 0);
    }

    #[test]
    fn leftmost_with_three_turns() {
        let p = plan(0, 3, 3);
        assert_eq!(p.taps_of(Button::Left), 3);
        assert_eq!(p.taps_of(Button::Right), 0);
        assert_eq!(p.taps_of(Button::B), 1);
        assert_eq!(p.taps_of(Button::A), 0);
        assert_eq!(p.len(), 5);
        assert_eq!(p.last(), Some(&ControllerAction::hold(Button::Down)));
    }

    #[test]
    fn order_is_horizontal_then_rotation_then_drop() {
        let p = plan(5, 1, 2);
        let expected = [
            ControllerAction::tap(Button::Right),
            ControllerAction::tap(Button::Right),
            ControllerAction::tap(Button::Right),
            ControllerAction::tap(Button::A),
            ControllerAction::hold(Button::Down),
        ];
        assert_eq!(p.actions(), &expected);
    }

    #[test]
    fn spawn_column_and_zero_rotation_is_just_the_drop() {
        let p = plan(2, 0, 2);
        assert_eq!(p.actions(), &[ControllerAction::hold(Button::Down)]);
    }

    #[test]
    fn every_valid_input_obeys_tap_counts() {
        let geometry = BoardGeometry::new(6, 2);
        for column in 0..6i8 {
            for rotation in -3..=3i8 {
                let p = translate(
                    Placement::new(column, rotation),
                    &geometry,
                    &Controls::default(),
                )
                .unwrap();
                let dx = column - 2;
                let left = p.taps_of(Button::Left);
                let right = p.taps_of(Button::Right);
                assert_eq!(left + right, dx.unsigned_abs() as usize);
                if dx < 0 {
                    assert_eq!(right, 0);
                } else {
                    assert_eq!(left, 0);
                }

                let m = rotation.rem_euclid(4) as usize;
                let turns = p.taps_of(Button::A) + p.taps_of(Button::B);
                assert_eq!(turns, m.min(4 - m));
                assert!(turns <= 2);

                let drops = p.iter().filter(|a| a.hold == HoldKind::Hold).count();
                assert_eq!(drops, 1);
                assert_eq!(p.last().map(|a| a.button), Some(Button::Down));
            }
        }
    }

    #[test]
    fn column_outside_geometry_is_an_invariant_violation() {
        let err = translate(
            Placement::new(6, 0),
            &BoardGeometry::new(6, 2),
            &Controls::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TranslateError::InvariantBroken(_)));
    }

    #[test]
    fn inconsistent_geometry_is_rejected() {
        let err = translate(
            Placement::new(0, 0),
            &BoardGeometry::new(6, 6),
            &Controls::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("spawn column 6"));
    }

    #[test]
    fn custom_controls_are_used() {
        let controls = Controls {
            rotate_cw: Button::X,
            rotate_ccw: Button::Y,
            drop: Button::Up,
            ..Controls::default()
        };
        let p = translate(Placement::new(2, -1), &BoardGeometry::new(6, 2), &controls).unwrap();
        assert_eq!(
            p.actions(),
            &[ControllerAction::tap(Button::Y), ControllerAction::hold(Button::Up)]
        );
    }
}
