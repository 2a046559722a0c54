//! Error types for job configuration

use thiserror::Error;

use crate::document::DocumentError;

/// Errors that can occur while building a job configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// The underlying document could not be parsed, navigated or written
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The base template is not a freestyle project
    #[error("Unexpected root element: expected <{expected}>, got <{found}>")]
    UnexpectedRoot {
        /// Root element a freestyle job must have.
        expected: String,
        /// Root element of the template.
        found: String,
    },

    /// A job definition file could not be read
    #[error("Invalid job definition: {0}")]
    Definition(String),
}

impl From<serde_yaml::Error> for JobError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Definition(err.to_string())
    }
}
