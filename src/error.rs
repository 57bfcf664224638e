use chrono::{DateTime, Utc};
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An insert collided with the store's UNIQUE
    /// (`company_name`, `scrape_timestamp`) key. Signals a duplicate or
    /// re-run ingestion; retrying with the same payload cannot succeed.
    #[error("duplicate snapshot for '{company_name}' at {scrape_timestamp}")]
    Duplicate {
        company_name: String,
        scrape_timestamp: DateTime<Utc>,
    },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the error is a duplicate-key rejection.
    ///
    /// Callers use this to distinguish a re-run ingestion (skip and move on)
    /// from a transient storage failure (surface and let the caller's retry
    /// policy decide).
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Convenience `Result` alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn duplicate_error_names_the_conflicting_key() {
        let err = Error::Duplicate {
            company_name: "CREDICORP LTD.".into(),
            scrape_timestamp: Utc.with_ymd_and_hms(2026, 8, 20, 14, 0, 0).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("CREDICORP LTD."));
        assert!(msg.contains("2026-08-20"));
        assert!(err.is_duplicate());
    }

    #[test]
    fn config_error_folds_into_crate_error() {
        let err: Error = ConfigError::MissingField { field: "database" }.into();
        assert_eq!(err.to_string(), "missing required field: database");
        assert!(!err.is_duplicate());
    }
}
