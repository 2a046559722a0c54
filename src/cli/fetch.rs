//! `freestyle fetch` and `freestyle info` - Read jobs from Jenkins

use anyhow::{Context, Result};

use freestyle::infrastructure::{JenkinsClient, JobRepository};

/// Returns the current config.xml of `job`
pub async fn fetch_job<R: JobRepository + ?Sized>(repository: &R, job: &str) -> Result<String> {
    repository
        .get_job_config(job)
        .await
        .with_context(|| format!("Failed to fetch job '{job}'"))
}

/// Returns the summary of `job` as pretty-printed JSON
pub async fn describe_job(client: &JenkinsClient, job: &str) -> Result<String> {
    let info = client
        .job_info(job)
        .await
        .with_context(|| format!("Failed to query job '{job}'"))?;
    let Some(info) = info else {
        anyhow::bail!("Job '{job}' does not exist");
    };
    serde_json::to_string_pretty(&info).context("Failed to serialize job info")
}
