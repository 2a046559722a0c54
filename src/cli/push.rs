//! `freestyle push` - Render a definition and upload it to Jenkins

use anyhow::{Context, Result};
use std::fmt;
use tracing::{info, warn};

use freestyle::infrastructure::JobRepository;
use freestyle::job::JobDefinition;

/// What `push` did to the job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// A new job was created
    Created,
    /// The configuration of an existing job was replaced
    Reconfigured,
}

impl fmt::Display for PushOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Reconfigured => write!(f, "Reconfigured"),
        }
    }
}

/// Options of `push`
#[derive(Debug, Clone)]
pub struct PushOptions<'a> {
    /// Target job name
    pub job: &'a str,
    /// Build on the job's current config.xml
    pub template_from_server: bool,
    /// Create the job when it does not exist
    pub create: bool,
}

/// Renders `definition` and creates or reconfigures the job
pub async fn push_job<R: JobRepository + ?Sized>(
    repository: &R,
    definition: &JobDefinition,
    options: &PushOptions<'_>,
) -> Result<PushOutcome> {
    let job = options.job;
    let exists = repository
        .job_exists(job)
        .await
        .with_context(|| format!("Failed to look up job '{job}'"))?;

    if !exists && !options.create {
        anyhow::bail!("Job '{job}' does not exist (use --create to create it)");
    }

    let template = if options.template_from_server && exists {
        Some(
            repository
                .get_job_config(job)
                .await
                .with_context(|| format!("Failed to fetch job '{job}'"))?,
        )
    } else {
        if options.template_from_server {
            warn!(job, "Job does not exist yet; building on an empty project");
        }
        None
    };

    let xml = definition
        .render(template.as_deref())
        .context("Failed to render job definition")?;

    if exists {
        repository
            .reconfig_job(job, &xml)
            .await
            .with_context(|| format!("Failed to reconfigure job '{job}'"))?;
        info!(job, "Job reconfigured");
        Ok(PushOutcome::Reconfigured)
    } else {
        repository
            .create_job(job, &xml)
            .await
            .with_context(|| format!("Failed to create job '{job}'"))?;
        info!(job, "Job created");
        Ok(PushOutcome::Created)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use freestyle::infrastructure::JenkinsError;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// In-memory job store
    #[derive(Default)]
    pub(crate) struct FakeRepository {
        jobs: Mutex<HashMap<String, String>>,
        created: Mutex<Vec<String>>,
    }

    impl FakeRepository {
        pub(crate) fn with_job(name: &str, config_xml: &str) -> Self {
            let repository = Self::default();
            repository
                .jobs
                .lock()
                .insert(name.to_string(), config_xml.to_string());
            repository
        }

        fn config(&self, name: &str) -> Option<String> {
            self.jobs.lock().get(name).cloned()
        }
    }

    fn not_found(name: &str) -> JenkinsError {
        JenkinsError::Status {
            status: 404,
            url: format!("/job/{name}/config.xml"),
            body: String::new(),
        }
    }

    #[async_trait]
    impl JobRepository for FakeRepository {
        async fn job_exists(&self, name: &str) -> Result<bool, JenkinsError> {
            Ok(self.jobs.lock().contains_key(name))
        }

        async fn get_job_config(&self, name: &str) -> Result<String, JenkinsError> {
            self.config(name).ok_or_else(|| not_found(name))
        }

        async fn create_job(&self, name: &str, config_xml: &str) -> Result<(), JenkinsError> {
            self.created.lock().push(name.to_string());
            self.jobs
                .lock()
                .insert(name.to_string(), config_xml.to_string());
            Ok(())
        }

        async fn reconfig_job(&self, name: &str, config_xml: &str) -> Result<(), JenkinsError> {
            let mut jobs = self.jobs.lock();
            let Some(config) = jobs.get_mut(name) else {
                return Err(not_found(name));
            };
            *config = config_xml.to_string();
            Ok(())
        }
    }

    fn definition() -> JobDefinition {
        JobDefinition::from_yaml(
            "description: nightly build
builders:
  - kind: shell
    script: make test
",
        )
        .unwrap()
    }

    fn options(job: &str, template_from_server: bool, create: bool) -> PushOptions<'_> {
        PushOptions {
            job,
            template_from_server,
            create,
        }
    }

    #[tokio::test]
    async fn test_push_missing_job_without_create() {
        let repository = FakeRepository::default();
        let err = push_job(&repository, &definition(), &options("app", false, false))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(repository.created.lock().is_empty());
    }

    #[tokio::test]
    async fn test_push_creates_job() {
        let repository = FakeRepository::default();
        let outcome = push_job(&repository, &definition(), &options("app", true, true))
            .await
            .unwrap();

        assert_eq!(outcome, PushOutcome::Created);
        assert_eq!(*repository.created.lock(), vec!["app".to_string()]);
        let xml = repository.config("app").unwrap();
        assert!(xml.contains("<command>make test</command>"));
    }

    #[tokio::test]
    async fn test_push_reconfigures_existing_job() {
        let repository = FakeRepository::with_job(
            "app",
            "<project><assignedNode>linux</assignedNode></project>",
        );
        let outcome = push_job(&repository, &definition(), &options("app", false, false))
            .await
            .unwrap();

        assert_eq!(outcome, PushOutcome::Reconfigured);
        let xml = repository.config("app").unwrap();
        assert!(xml.contains("<description>nightly build</description>"));
        assert!(!xml.contains("assignedNode"));
    }

    #[tokio::test]
    async fn test_push_builds_on_server_config() {
        let repository = FakeRepository::with_job(
            "app",
            "<project><assignedNode>linux</assignedNode></project>",
        );
        push_job(&repository, &definition(), &options("app", true, false))
            .await
            .unwrap();

        let xml = repository.config("app").unwrap();
        assert!(xml.contains("<assignedNode>linux</assignedNode>"));
        assert!(xml.contains("<command>make test</command>"));
    }

    #[test]
    fn test_push_outcome_display() {
        assert_eq!(PushOutcome::Created.to_string(), "Created");
        assert_eq!(PushOutcome::Reconfigured.to_string(), "Reconfigured");
    }
}
