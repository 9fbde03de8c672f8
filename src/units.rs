// Internal unit system.
//
// Every quantity stored by the crate is expressed in these base units:
// length in millimetres, time in nanoseconds, energy in MeV and angles in
// radians. Multiplying a literal by a unit constant converts it into the
// internal representation (`20.0 * CM == 200.0`), dividing converts back out.

use crate::error::CommandError;

pub const MM: f64 = 1.0;
pub const UM: f64 = 1.0e-3 * MM;
pub const CM: f64 = 10.0 * MM;
pub const M: f64 = 1000.0 * MM;

pub const NS: f64 = 1.0;
pub const S: f64 = 1.0e9 * NS;

pub const MEV: f64 = 1.0;
pub const KEV: f64 = 1.0e-3 * MEV;
pub const EV: f64 = 1.0e-6 * MEV;

pub const RAD: f64 = 1.0;
pub const MRAD: f64 = 1.0e-3 * RAD;
pub const DEG: f64 = std::f64::consts::PI / 180.0;

/// Densities are kept in g/cm3.
pub const G_PER_CM3: f64 = 1.0;
pub const PER_CENT: f64 = 0.01;

/// Physical dimension a command argument must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    Length,
    Angle,
}

impl UnitCategory {
    pub fn label(&self) -> &'static str {
        match self {
            UnitCategory::Length => "Length",
            UnitCategory::Angle => "Angle",
        }
    }
}

/// Look up a unit symbol, returning its category and its value in internal units.
pub fn lookup_unit(symbol: &str) -> Option<(UnitCategory, f64)> {
    let unit = match symbol {
        "um" => (UnitCategory::Length, UM),
        "mm" => (UnitCategory::Length, MM),
        "cm" => (UnitCategory::Length, CM),
        "m" => (UnitCategory::Length, M),
        "rad" => (UnitCategory::Angle, RAD),
        "mrad" => (UnitCategory::Angle, MRAD),
        "deg" => (UnitCategory::Angle, DEG),
        _ => return None,
    };
    Some(unit)
}

/// Parse a value/unit pair such as `("30", "deg")` into internal units,
/// checking that the unit belongs to `expected`.
pub fn parse_quantity(
    value: &str,
    unit: &str,
    expected: UnitCategory,
) -> Result<f64, CommandError> {
    let number: f64 = value
        .parse()
        .map_err(|_| CommandError::InvalidNumber(value.to_string()))?;
    let (category, scale) =
        lookup_unit(unit).ok_or_else(|| CommandError::UnknownUnit(unit.to_string()))?;
    if category != expected {
        return Err(CommandError::WrongUnitCategory {
            unit: unit.to_string(),
            expected: expected.label(),
        });
    }
    Ok(number * scale)
}
