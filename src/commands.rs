use crate::error::CommandError;
use crate::parameters::GeometryParameters;
use crate::units::{parse_quantity, UnitCategory, DEG, MM};
use std::fmt;
use std::str::FromStr;

pub const SET_ANGLE: &str = "/detector/setMovableAngle";
/// Short form accepted for [`SET_ANGLE`]
pub const SET_ANGLE_ALIAS: &str = "/detector/setAngle";
pub const SET_DISTANCE: &str = "/detector/setDistance";

/// A parameter-control command, already converted to internal units.
///
/// Commands only change the geometry parameters (and so mark the geometry
/// dirty); the rebuild happens before the next run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectorCommand {
    SetMovableAngle(f64),
    SetDistance(f64),
}

impl DetectorCommand {
    /// Parse a line such as `/detector/setMovableAngle 30 deg`.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let category = match name {
            SET_ANGLE | SET_ANGLE_ALIAS => UnitCategory::Angle,
            SET_DISTANCE => UnitCategory::Length,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        let (Some(value), Some(unit)) = (words.next(), words.next()) else {
            return Err(CommandError::MissingArgument(name.to_string()));
        };
        let quantity = parse_quantity(value, unit, category)?;
        Ok(match category {
            UnitCategory::Angle => DetectorCommand::SetMovableAngle(quantity),
            UnitCategory::Length => DetectorCommand::SetDistance(quantity),
        })
    }

    pub fn apply(&self, params: &mut GeometryParameters) {
        match *self {
            DetectorCommand::SetMovableAngle(angle) => params.set_angle(angle),
            DetectorCommand::SetDistance(distance) => params.set_distance(distance),
        }
    }
}

impl FromStr for DetectorCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DetectorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorCommand::SetMovableAngle(angle) => write!(f, "{} {} deg", SET_ANGLE, angle / DEG),
            DetectorCommand::SetDistance(distance) => write!(f, "{} {} mm", SET_DISTANCE, distance / MM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::CM;

    #[test]
    fn test_parse_angle_in_degrees() {
        let cmd = DetectorCommand::parse("/detector/setMovableAngle 30 deg").unwrap();
        match cmd {
            DetectorCommand::SetMovableAngle(angle) => assert!((angle - 30.0 * DEG).abs() < 1e-15),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            "/detector/setAngle 0.5 rad".parse::<DetectorCommand>(),
            Ok(DetectorCommand::SetMovableAngle(0.5))
        );
    }

    #[test]
    fn test_parse_distance() {
        assert_eq!(
            DetectorCommand::parse("  /detector/setDistance 25 cm ").unwrap(),
            DetectorCommand::SetDistance(250.0)
        );
    }

    #[test]
    fn test_wrong_unit_category_rejected() {
        assert_eq!(
            DetectorCommand::parse("/detector/setDistance 30 deg"),
            Err(CommandError::WrongUnitCategory {
                unit: "deg".to_string(),
                expected: "Length",
            })
        );
    }

    #[test]
    fn test_malformed_commands() {
        assert_eq!(DetectorCommand::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            DetectorCommand::parse("/detector/setHeight 3 cm"),
            Err(CommandError::UnknownCommand("/detector/setHeight".to_string()))
        );
        assert_eq!(
            DetectorCommand::parse("/detector/setDistance 3"),
            Err(CommandError::MissingArgument("/detector/setDistance".to_string()))
        );
        assert_eq!(
            DetectorCommand::parse("/detector/setDistance three cm"),
            Err(CommandError::InvalidNumber("three".to_string()))
        );
        assert_eq!(
            DetectorCommand::parse("/detector/setDistance 3 furlong"),
            Err(CommandError::UnknownUnit("furlong".to_string()))
        );
    }

    #[test]
    fn test_apply_marks_dirty_without_rebuilding() {
        let mut params = GeometryParameters::default();
        params.mark_clean();
        DetectorCommand::SetDistance(30.0 * CM).apply(&mut params);
        assert!(params.is_dirty());
        assert_eq!(params.distance(), 300.0);
    }
}
