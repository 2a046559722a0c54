//! Infrastructure layer
//!
//! Configuration, logging and the Jenkins REST client.

mod config;
pub mod jenkins;
mod logging;

pub use config::{Config, ConfigError};
pub use jenkins::{JenkinsClient, JenkinsError, JobInfo, JobRepository};
pub use logging::init_logging;
