use thiserror::Error;

/// Construction-time failures. The session bootstrap treats every variant as
/// unrecoverable: it reports the message and stops before any transport run.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("missing base elements: {}", .0.join(", "))]
    MissingElements(Vec<String>),

    #[error("missing materials: {}", .0.join(", "))]
    MissingMaterials(Vec<String>),

    #[error("optical properties requested before the material catalog was validated")]
    OpticsBeforeValidation,

    #[error("material '{0}' is not bound in the catalog")]
    UnboundMaterial(String),

    #[error("invalid property table '{name}': {reason}")]
    InvalidPropertyTable { name: String, reason: String },

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejections from the parameter-control command surface. These never touch
/// the geometry; the caller may correct the command and retry.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("command '{0}' expects a value and a unit")]
    MissingArgument(String),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("unit '{unit}' is not a {expected} unit")]
    WrongUnitCategory { unit: String, expected: &'static str },
}
