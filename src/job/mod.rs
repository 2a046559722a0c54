//! Jenkins freestyle job configuration
//!
//! [`FreestyleJob`] edits a `config.xml` document: job parameters go under
//! `properties/hudson.model.ParametersDefinitionProperty/parameterDefinitions`,
//! build steps under `builders` and post-build actions under `publishers`.

pub mod case;
pub mod definition;
pub mod errors;
pub mod freestyle;
pub mod publishers;
pub mod template;


pub use case::{camel_case_keys, to_camel_case};
pub use definition::{BuildStep, JobDefinition, JobParameter};
pub use errors::JobError;
pub use freestyle::{BATCH_TASK, CHOICE_PARAMETER, FreestyleJob, SHELL_TASK, STRING_PARAMETER};
pub use publishers::{ARTIFACT_ARCHIVER, ArtifactArchiver};
pub use template::{EMPTY_CONFIG_XML, PROJECT_ROOT};
