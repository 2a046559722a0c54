//! Freestyle job configuration builder

use tracing::debug;

use super::case::camel_case_keys;
use super::errors::JobError;
use super::publishers::{ARTIFACT_ARCHIVER, ArtifactArchiver};
use super::template::{EMPTY_CONFIG_XML, PROJECT_ROOT};
use crate::document::{Document, Element, Node, Tree};
use crate::tree;

/// Short type name of a plain string parameter
pub const STRING_PARAMETER: &str = "StringParameterDefinition";

/// Short type name of a drop-down choice parameter
pub const CHOICE_PARAMETER: &str = "ChoiceParameterDefinition";

/// Short task name of a POSIX shell build step
pub const SHELL_TASK: &str = "Shell";

/// Short task name of a Windows batch build step
pub const BATCH_TASK: &str = "BatchFile";

const PARAMETERS_PROPERTY: &str = "hudson.model.ParametersDefinitionProperty";
const CHOICES_LIST_CLASS: &str = "java.util.Arrays$ArrayList";
const CHOICES_ARRAY_CLASS: &str = "string-array";

/// Jenkins freestyle job configuration, edited in memory
#[derive(Debug, Clone, PartialEq)]
pub struct FreestyleJob {
    document: Document,
}

impl FreestyleJob {
    /// Starts from the empty-project template.
    ///
    /// # Errors
    ///
    /// See [`FreestyleJob::with_template`].
    pub fn new(description: &str) -> Result<Self, JobError> {
        Self::with_template(description, EMPTY_CONFIG_XML)
    }

    /// Starts from `base_xml`, e.g. the current configuration of an existing
    /// job, and sets its description.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Document`] if `base_xml` is not well-formed and
    /// [`JobError::UnexpectedRoot`] if its root is not `<project>`.
    pub fn with_template(description: &str, base_xml: &str) -> Result<Self, JobError> {
        let document = Document::parse(base_xml)?;
        if document.root_name() != PROJECT_ROOT {
            return Err(JobError::UnexpectedRoot {
                expected: PROJECT_ROOT.to_string(),
                found: document.root_name().to_string(),
            });
        }

        let mut job = Self { document };
        job.project()?.set("description", description);
        debug!(description, "Created freestyle job configuration");
        Ok(job)
    }

    /// The underlying document
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The job description
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.document
            .root()
            .as_tree()
            .and_then(|project| project.get("description"))
            .and_then(Node::as_str)
    }

    /// View over the `<project>` element
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Document`] if the root holds only text.
    pub fn project(&mut self) -> Result<Element<'_>, JobError> {
        Ok(self.document.root_element()?)
    }

    fn add_generic_parameter(&mut self, parameter_type: &str, parameter: Tree) -> Result<(), JobError> {
        let type_key = format!("hudson.model.{parameter_type}");
        let mut definitions = self
            .project()?
            .into_entry_element("properties")?
            .into_entry_element(PARAMETERS_PROPERTY)?
            .into_entry_element("parameterDefinitions")?;
        definitions.append(&type_key, camel_case_keys(parameter));
        debug!(parameter_type = %type_key, "Added job parameter");
        Ok(())
    }

    /// Adds a job parameter with a default value.
    ///
    /// `parameter_type` is the short Jenkins type name such as
    /// [`STRING_PARAMETER`]; parameters of one type are listed together in
    /// the order they were added.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Document`] if an element on the way to the
    /// parameter definitions holds a scalar.
    pub fn add_job_parameter(
        &mut self,
        name: &str,
        description: &str,
        default_value: impl Into<Node>,
        trim: bool,
        parameter_type: &str,
    ) -> Result<(), JobError> {
        let parameter = tree! {
            "name" => name,
            "description" => description,
            "default_value" => default_value,
            "trim" => trim,
        };
        self.add_generic_parameter(parameter_type, parameter)
    }

    /// Adds an untrimmed string parameter
    ///
    /// # Errors
    ///
    /// See [`FreestyleJob::add_job_parameter`].
    pub fn add_string_parameter(
        &mut self,
        name: &str,
        description: &str,
        default_value: &str,
    ) -> Result<(), JobError> {
        self.add_job_parameter(name, description, default_value, false, STRING_PARAMETER)
    }

    /// Adds a parameter offering a fixed list of choices, the first being
    /// the default.
    ///
    /// # Errors
    ///
    /// See [`FreestyleJob::add_job_parameter`].
    pub fn add_job_choices_parameter<S: AsRef<str>>(
        &mut self,
        name: &str,
        description: &str,
        choices: &[S],
        parameter_type: &str,
    ) -> Result<(), JobError> {
        let values: Vec<&str> = choices.iter().map(AsRef::as_ref).collect();
        let parameter = tree! {
            "name" => name,
            "description" => description,
            "choices" => tree! {
                "@class" => CHOICES_LIST_CLASS,
                "a" => tree! {
                    "@class" => CHOICES_ARRAY_CLASS,
                    "string" => values,
                },
            },
        };
        self.add_generic_parameter(parameter_type, parameter)
    }

    fn add_builder(
        &mut self,
        script: &str,
        task_type: &str,
        configured_local_rules: Option<&str>,
    ) -> Result<(), JobError> {
        let task_key = format!("hudson.tasks.{task_type}");
        let entry = camel_case_keys(tree! {
            "command" => script,
            "configured_local_rules" => configured_local_rules,
        });
        self.project()?
            .into_entry_element("builders")?
            .append(&task_key, entry);
        debug!(task_type = %task_key, "Added build step");
        Ok(())
    }

    /// Appends a shell build step
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Document`] if `<builders>` holds a scalar.
    pub fn add_builder_shell_script(
        &mut self,
        script: &str,
        configured_local_rules: Option<&str>,
    ) -> Result<(), JobError> {
        self.add_builder(script, SHELL_TASK, configured_local_rules)
    }

    /// Appends a Windows batch build step
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Document`] if `<builders>` holds a scalar.
    pub fn add_builder_batch_script(
        &mut self,
        script: &str,
        configured_local_rules: Option<&str>,
    ) -> Result<(), JobError> {
        self.add_builder(script, BATCH_TASK, configured_local_rules)
    }

    /// Sets the artifact archiver publisher, replacing a previous one
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Document`] if `<publishers>` holds a scalar.
    pub fn add_artifact_archiver(&mut self, archiver: &ArtifactArchiver) -> Result<(), JobError> {
        self.project()?
            .into_entry_element("publishers")?
            .set(ARTIFACT_ARCHIVER, archiver.to_tree());
        debug!(artifacts = %archiver.artifacts, "Set artifact archiver");
        Ok(())
    }

    /// Writes the configuration as indented XML
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Document`] if the tree cannot be written.
    pub fn unparse(&self) -> Result<String, JobError> {
        Ok(self.document.unparse()?)
    }
}
