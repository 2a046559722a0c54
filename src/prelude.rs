//! Prelude module for common imports

// Re-export macros
pub use crate::tree;

// Document tree
pub use crate::document::{Document, DocumentError, Element, Field, Node, Scalar, Tree};

// Job builder
pub use crate::job::{
    ArtifactArchiver, BuildStep, CHOICE_PARAMETER, FreestyleJob, JobDefinition, JobError,
    JobParameter, STRING_PARAMETER,
};

// Jenkins access
pub use crate::infrastructure::{Config, JenkinsClient, JenkinsError, JobRepository};
