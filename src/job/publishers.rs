//! Post-build actions

use serde::{Deserialize, Serialize};

use super::case::camel_case_keys;
use crate::document::Tree;
use crate::tree;

/// Jenkins element name of the artifact archiver publisher
pub const ARTIFACT_ARCHIVER: &str = "hudson.tasks.ArtifactArchiver";

/// Settings of the `hudson.tasks.ArtifactArchiver` publisher.
///
/// The ArtifactArchiver plugin must be installed on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct ArtifactArchiver {
    /// Ant-style glob of files to archive, e.g. `*.log`
    pub artifacts: String,
    /// Do not fail the build when nothing matches
    #[serde(default)]
    pub allow_empty_archive: bool,
    /// Archive only when the build succeeded
    #[serde(default)]
    pub only_if_successful: bool,
    /// Record fingerprints of the archived files
    #[serde(default)]
    pub fingerprint: bool,
    /// Apply Ant's default excludes
    #[serde(default = "enabled")]
    pub default_excludes: bool,
    /// Match the glob case-sensitively
    #[serde(default = "enabled")]
    pub case_sensitive: bool,
    /// Follow symbolic links while collecting
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn enabled() -> bool {
    true
}

impl ArtifactArchiver {
    /// Archiver for `artifacts` with Jenkins' default flags
    pub fn new(artifacts: impl Into<String>) -> Self {
        Self {
            artifacts: artifacts.into(),
            allow_empty_archive: false,
            only_if_successful: false,
            fingerprint: false,
            default_excludes: true,
            case_sensitive: true,
            follow_symlinks: false,
        }
    }

    /// Sets `allow_empty_archive`
    #[must_use]
    pub fn allow_empty_archive(mut self, value: bool) -> Self {
        self.allow_empty_archive = value;
        self
    }

    /// Sets `only_if_successful`
    #[must_use]
    pub fn only_if_successful(mut self, value: bool) -> Self {
        self.only_if_successful = value;
        self
    }

    /// Sets `fingerprint`
    #[must_use]
    pub fn fingerprint(mut self, value: bool) -> Self {
        self.fingerprint = value;
        self
    }

    /// Sets `default_excludes`
    #[must_use]
    pub fn default_excludes(mut self, value: bool) -> Self {
        self.default_excludes = value;
        self
    }

    /// Sets `case_sensitive`
    #[must_use]
    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    /// Sets `follow_symlinks`
    #[must_use]
    pub fn follow_symlinks(mut self, value: bool) -> Self {
        self.follow_symlinks = value;
        self
    }

    /// Publisher entry with camelCase element names
    #[must_use]
    pub fn to_tree(&self) -> Tree {
        camel_case_keys(tree! {
            "artifacts" => self.artifacts.as_str(),
            "allow_empty_archive" => self.allow_empty_archive,
            "only_if_successful" => self.only_if_successful,
            "fingerprint" => self.fingerprint,
            "default_excludes" => self.default_excludes,
            "case_sensitive" => self.case_sensitive,
            "follow_symlinks" => self.follow_symlinks,
        })
    }
}
