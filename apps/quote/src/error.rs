//! Error types for the quote CLI.

use std::path::PathBuf;

use niramaya_core::CoreError;

use crate::config::ConfigError;

/// Quote CLI errors.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Could not read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cart file is not valid JSON: {0}")]
    ParseCart(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for Results with QuoteError.
pub type QuoteResult<T> = Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through() {
        let err: QuoteError = CoreError::CatalogItemNotFound("XYZ001".to_string()).into();
        assert_eq!(err.to_string(), "Catalog item not found: XYZ001");
    }

    #[test]
    fn test_read_input_names_path() {
        let err = QuoteError::ReadInput {
            path: PathBuf::from("cart.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Could not read cart.json: missing");
    }
}
