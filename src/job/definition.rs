//! Declarative job definition files
//!
//! A definition lists the parameters, build steps and archiver of a job in
//! YAML and is applied onto a [`FreestyleJob`]:
//!
//! ```yaml
//! description: new dummy job
//! parameters:
//!   - kind: string
//!     name: Param1
//!     default: val1
//!   - kind: choice
//!     name: platform
//!     choices: [linux, windows]
//! builders:
//!   - kind: shell
//!     script: echo hi
//! archiver:
//!   artifacts: "*.log"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use super::errors::JobError;
use super::freestyle::{CHOICE_PARAMETER, FreestyleJob, STRING_PARAMETER};
use super::publishers::ArtifactArchiver;
use super::template::EMPTY_CONFIG_XML;

/// A job parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum JobParameter {
    /// Free-form string parameter
    String {
        /// Parameter name, exposed to build steps as an environment variable
        name: String,
        /// Help text
        #[serde(default)]
        description: String,
        /// Default value
        #[serde(default)]
        default: String,
        /// Trim surrounding whitespace from the value
        #[serde(default)]
        trim: bool,
    },
    /// Drop-down choice parameter
    Choice {
        /// Parameter name
        name: String,
        /// Help text
        #[serde(default)]
        description: String,
        /// Offered values, the first being the default
        choices: Vec<String>,
    },
}

/// A build step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BuildStep {
    /// POSIX shell script
    Shell {
        /// Script body
        script: String,
        /// Value of `configuredLocalRules`
        #[serde(default)]
        configured_local_rules: Option<String>,
    },
    /// Windows batch script
    Batch {
        /// Script body
        script: String,
        /// Value of `configuredLocalRules`
        #[serde(default)]
        configured_local_rules: Option<String>,
    },
}

/// Complete description of a freestyle job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobDefinition {
    /// Job description
    pub description: String,
    /// Parameters in display order
    #[serde(default)]
    pub parameters: Vec<JobParameter>,
    /// Build steps in execution order
    #[serde(default)]
    pub builders: Vec<BuildStep>,
    /// Artifact archiver publisher
    #[serde(default)]
    pub archiver: Option<ArtifactArchiver>,
}

impl JobDefinition {
    /// Parses a YAML definition.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Definition`] for invalid YAML or unknown fields.
    pub fn from_yaml(yaml: &str) -> Result<Self, JobError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML definition file.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Definition`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, JobError> {
        let yaml = fs::read_to_string(path)
            .map_err(|e| JobError::Definition(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&yaml)
    }

    /// Adds every parameter, build step and the archiver to `job`.
    ///
    /// # Errors
    ///
    /// Propagates [`JobError::Document`] from the job builder.
    pub fn apply(&self, job: &mut FreestyleJob) -> Result<(), JobError> {
        for parameter in &self.parameters {
            match parameter {
                JobParameter::String {
                    name,
                    description,
                    default,
                    trim,
                } => job.add_job_parameter(
                    name,
                    description,
                    default.as_str(),
                    *trim,
                    STRING_PARAMETER,
                )?,
                JobParameter::Choice {
                    name,
                    description,
                    choices,
                } => job.add_job_choices_parameter(name, description, choices.as_slice(), CHOICE_PARAMETER)?,
            }
        }

        for step in &self.builders {
            match step {
                BuildStep::Shell {
                    script,
                    configured_local_rules,
                } => job.add_builder_shell_script(script, configured_local_rules.as_deref())?,
                BuildStep::Batch {
                    script,
                    configured_local_rules,
                } => job.add_builder_batch_script(script, configured_local_rules.as_deref())?,
            }
        }

        if let Some(archiver) = &self.archiver {
            job.add_artifact_archiver(archiver)?;
        }

        Ok(())
    }

    /// Builds the job on top of `template` (the empty project when `None`)
    /// and returns its XML.
    ///
    /// # Errors
    ///
    /// Fails if the template is invalid or the job cannot be built.
    pub fn render(&self, template: Option<&str>) -> Result<String, JobError> {
        let mut job =
            FreestyleJob::with_template(&self.description, template.unwrap_or(EMPTY_CONFIG_XML))?;
        self.apply(&mut job)?;
        info!(
            parameters = self.parameters.len(),
            builders = self.builders.len(),
            archiver = self.archiver.is_some(),
            "Rendered job configuration"
        );
        job.unparse()
    }
}
