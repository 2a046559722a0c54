//! # Freestyle - Jenkins freestyle job configuration in Rust
//!
//! Freestyle builds the `config.xml` of Jenkins freestyle projects. A job is
//! started from a base template, extended with parameters, build steps and
//! post-build actions, and serialized back to XML ready to be uploaded.
//!
//! ## Quick Start
//!
//! ```
//! use freestyle::prelude::*;
//!
//! let mut job = FreestyleJob::new("new dummy job")?;
//! job.add_job_parameter("Param1", "first parameter", "val1", false, STRING_PARAMETER)?;
//! job.add_job_choices_parameter("platform", "", &["linux", "windows"], CHOICE_PARAMETER)?;
//! job.add_builder_shell_script("echo hi", None)?;
//! job.add_artifact_archiver(&ArtifactArchiver::new("*.log"))?;
//!
//! let xml = job.unparse()?;
//! assert!(xml.contains("<command>echo hi</command>"));
//! # Ok::<(), JobError>(())
//! ```
//!
//! ## Features
//!
//! - **Document tree**: ordered XML tree with xmltodict-style attribute and
//!   text keys, edited in place through borrowed [`Element`] views
//! - **Job builder**: typed helpers for parameters, shell and batch steps
//!   and the artifact archiver
//! - **Job definitions**: declarative YAML files applied onto a job
//! - **Jenkins client**: fetch, create and reconfigure jobs over REST
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod macros;

pub mod document;
pub mod infrastructure;
pub mod job;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use document::{Document, DocumentError, Element, Field, Node, Scalar, Tree};
pub use infrastructure::{Config, JenkinsClient, JenkinsError, JobRepository};
pub use job::{ArtifactArchiver, FreestyleJob, JobDefinition, JobError};

/// Version of the freestyle crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
