//! `freestyle render` - Build a job config.xml from a YAML definition

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use freestyle::job::JobDefinition;

/// Renders the definition at `definition`, on top of the config.xml at
/// `template` when given.
pub fn render_definition(definition: &Path, template: Option<&Path>) -> Result<String> {
    let job = JobDefinition::from_file(definition)
        .with_context(|| format!("Failed to load {}", definition.display()))?;

    let template = template
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read template: {}", path.display()))
        })
        .transpose()?;

    job.render(template.as_deref())
        .with_context(|| format!("Failed to render {}", definition.display()))
}
