//! Command validation.
//!
//! A command is either a button name (`"Start"`, `"down"`) or a placement
//! string: column and rotation joined by a single comma (`"0,3"`). The
//! separator count decides which, and the result is always a typed
//! [`Intent`], so nothing downstream ever looks at punctuation again.

use crate::map::lookup;
use crate::types::{BoardGeometry, Intent, ParseError, Placement, MAX_ROTATION, MIN_ROTATION};

/// Separates column from rotation in a placement string.
pub const SEPARATOR: char = ',';

/// Validator bound to one board geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandParser {
    geometry: BoardGeometry,
}

impl CommandParser {
    pub fn new(geometry: BoardGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn parse(&self, raw: &str) -> Result<Intent, ParseError> {
        parse(raw, &self.geometry)
    }
}

/// Parse one raw command against `geometry`.
pub fn parse(raw: &str, geometry: &BoardGeometry) -> Result<Intent, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }

    match raw.matches(SEPARATOR).count() {
        0 => lookup(raw).map(Intent::Button),
        1 => {
            let (col, rot) = raw.split_once(SEPARATOR).unwrap_or((raw, ""));
            let (min, max) = (geometry.min_column() as i64, geometry.max_column() as i64);
            let column = bounded("Column", min, max, col)?;
            // A board with no columns has nothing in range, not even column 0.
            if !geometry.contains(column as i8) {
                return Err(ParseError::OutOfRange {
                    field: "Column",
                    min,
                    max,
                    value: column,
                });
            }
            let rotation = bounded("Rotation", MIN_ROTATION as i64, MAX_ROTATION as i64, rot)?;
            // Both values were range-checked against i8 bounds above.
            Ok(Intent::Placement(Placement::new(column as i8, rotation as i8)))
        }
        _ => Err(ParseError::TooManySeparators),
    }
}

fn bounded(field: &'static str, min: i64, max: i64, value: &str) -> Result<i64, ParseError> {
    let value = value.trim();
    let n: i64 = value.parse().map_err(|_| ParseError::NotAnInteger {
        field,
        min,
        max,
        value: value.to_string(),
    })?;
    if n < min || n > max {
        return Err(ParseError::OutOfRange {
            field,
            min,
            max,
            value: n,
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Button;

    fn six_wide() -> BoardGeometry {
        BoardGeometry::new(6, 2)
    }

    #[test]
    fn placement_string_parses() {
        assert_eq!(
            parse("0,3", &six_wide()),
            Ok(Intent::Placement(Placement::new(0, 3)))
        );
        assert_eq!(
            parse("5,-1", &six_wide()),
            Ok(Intent::Placement(Placement::new(5, -1)))
        );
        assert_eq!(
            parse(" 2 , 0 ", &six_wide()),
            Ok(Intent::Placement(Placement::new(2, 0)))
        );
    }

    #[test]
    fn button_name_parses_case_insensitively() {
        assert_eq!(parse("Start", &six_wide()), Ok(Intent::Button(Button::Start)));
        assert_eq!(parse("down", &six_wide()), Ok(Intent::Button(Button::Down)));
    }

    #[test]
    fn too_many_separators() {
        let err = parse("1,2,3", &six_wide()).unwrap_err();
        assert_eq!(err, ParseError::TooManySeparators);
        assert_eq!(err.to_string(), "too many separators");
    }

    #[test]
    fn column_above_bound_names_field_and_bound() {
        let err = parse("9,0", &six_wide()).unwrap_err();
        assert_eq!(
            err,
            ParseError::OutOfRange {
                field: "Column",
                min: 0,
                max: 5,
                value: 9
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("Column"));
        assert!(msg.contains('5'));
        assert!(msg.contains('9'));
    }

    #[test]
    fn column_bound_is_inclusive_and_configurable() {
        assert!(parse("5,0", &six_wide()).is_ok());
        assert!(parse("6,0", &six_wide()).is_err());
        // seven-wide validation accepts the extra column
        assert!(parse("6,0", &BoardGeometry::new(7, 2)).is_ok());
        assert!(parse("-1,0", &six_wide()).is_err());
    }

    #[test]
    fn rotation_bounds() {
        assert!(parse("0,-3", &six_wide()).is_ok());
        assert!(parse("0,3", &six_wide()).is_ok());
        let err = parse("0,4", &six_wide()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::OutOfRange {
                field: "Rotation",
                value: 4,
                ..
            }
        ));
        assert!(parse("0,-4", &six_wide()).is_err());
    }

    #[test]
    fn non_integer_sides_are_rejected() {
        let err = parse("left,1", &six_wide()).unwrap_err();
        assert!(matches!(err, ParseError::NotAnInteger { field: "Column", .. }));
        assert!(err.to_string().contains("\"left\""));

        let err = parse("1,", &six_wide()).unwrap_err();
        assert!(matches!(err, ParseError::NotAnInteger { field: "Rotation", .. }));

        // out of i64 range is still a parse failure, never a wrap
        assert!(parse("99999999999999999999,0", &six_wide()).is_err());
    }

    #[test]
    fn unknown_button_and_empty() {
        assert!(matches!(
            parse("turbo", &six_wide()),
            Err(ParseError::UnknownButton { .. })
        ));
        assert_eq!(parse("   ", &six_wide()), Err(ParseError::Empty));
    }

    #[test]
    fn parser_uses_its_geometry() {
        let parser = CommandParser::new(BoardGeometry::new(4, 1));
        assert!(parser.parse("3,0").is_ok());
        assert!(parser.parse("4,0").is_err());
        assert_eq!(parser.geometry().columns, 4);
    }

    #[test]
    fn empty_board_accepts_no_column() {
        let empty = BoardGeometry::new(0, 0);
        assert_eq!(
            parse("0,0", &empty),
            Err(ParseError::OutOfRange {
                field: "Column",
                min: 0,
                max: 0,
                value: 0
            })
        );
        // buttons do not depend on the board
        assert_eq!(parse("start", &empty), Ok(Intent::Button(Button::Start)));
    }
}
