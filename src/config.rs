// Session configuration, read from JSON.
use crate::error::ConfigurationError;
use crate::parameters::{DEFAULT_ANGLE, DEFAULT_DISTANCE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for one [`crate::session::DetectorSession`].
///
/// The session owns its configuration; there is no process-wide instance.
/// Every field is optional in the JSON and falls back to the value shown in
/// [`Config::default`]. Lengths are in mm and angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source to scintillator-centre distance
    pub distance: f64,
    /// Angle of the movable unit about the polar axis
    pub angle: f64,
    /// Run seed; worker streams are derived from it
    pub seed: u64,
    pub overlap_check: bool,
    /// Surface points sampled per placed volume by the overlap check
    pub overlap_resolution: usize,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Samples per volume for the overlap check, or `None` when disabled.
    pub fn overlap_samples(&self) -> Option<usize> {
        self.overlap_check.then_some(self.overlap_resolution)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            distance: DEFAULT_DISTANCE,
            angle: DEFAULT_ANGLE,
            seed: 1,
            overlap_check: true,
            overlap_resolution: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = Config::from_json_str(r#"{ "distance": 250.0, "seed": 9 }"#).unwrap();
        assert_eq!(config.distance, 250.0);
        assert_eq!(config.seed, 9);
        assert_eq!(config.angle, DEFAULT_ANGLE);
        assert!(config.overlap_check);
        assert_eq!(config.overlap_samples(), Some(1000));
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Config::from_json_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_disabled_overlap_check() {
        let config = Config::from_json_str(r#"{ "overlap_check": false }"#).unwrap();
        assert_eq!(config.overlap_samples(), None);
    }

    #[test]
    fn test_invalid_json_is_configuration_error() {
        let err = Config::from_json_str("{ distance: }").unwrap_err();
        assert!(matches!(err, ConfigurationError::Json(_)));
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("ls_detector_config_{}.json", std::process::id()));
        let config = Config {
            angle: 0.25,
            overlap_resolution: 64,
            ..Config::default()
        };
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(config.to_json_string().unwrap().as_bytes()).unwrap();
        drop(file);
        assert_eq!(Config::from_file(&path).unwrap(), config);
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigurationError::Io(_))
        ));
    }
}
