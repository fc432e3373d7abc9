use thiserror::Error;

/// Errors that can occur while scraping, storing or serving recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Request was missing a required field or carried an unusable value
    #[error("{0}")]
    Validation(String),

    /// No stored recipe matches the requested title
    #[error("{0}")]
    NotFound(String),

    /// The remote page could not be fetched or no recipe could be read from it
    #[error("{0}")]
    Upstream(String),

    /// Reading or writing the recipe directory failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Anything else that went wrong while handling a request
    #[error("{0}")]
    Internal(String),
}

impl RecipeError {
    pub fn validation(message: impl Into<String>) -> Self {
        RecipeError::Validation(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        RecipeError::Upstream(message.into())
    }
}

impl From<std::io::Error> for RecipeError {
    fn from(err: std::io::Error) -> Self {
        RecipeError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for RecipeError {
    fn from(err: reqwest::Error) -> Self {
        RecipeError::Upstream(err.to_string())
    }
}
