use thiserror::Error;

/// Why a string is not an address literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("missing 0x prefix")]
    MissingPrefix,

    #[error("expected 40 hex digits: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),
}

/// Deploy configuration error types
///
/// Every variant that concerns a single value carries the camelCase key of
/// the offending field.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Field {field} is not a valid address ({value:?}): {source}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        #[source]
        source: AddressError,
    },

    #[error("Field {field} is not a version token: {value:?}")]
    InvalidVersion { field: &'static str, value: String },

    #[error("Field {field} is not a valid symbol: {value:?}")]
    InvalidSymbol { field: &'static str, value: String },
}

impl ConfigError {
    /// Key of the field the error is about, if it concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::MissingField(field) | ConfigError::EmptyField(field) => Some(*field),
            ConfigError::InvalidAddress { field, .. }
            | ConfigError::InvalidVersion { field, .. }
            | ConfigError::InvalidSymbol { field, .. } => Some(*field),
            ConfigError::Toml(_) | ConfigError::TomlSerialize(_) | ConfigError::Json(_) => None,
        }
    }
}
