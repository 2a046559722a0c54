//! Jenkins REST API client
//!
//! Reads and writes job `config.xml` documents. Jobs inside folders are
//! addressed as `folder/job`, which maps to `/job/folder/job/job/`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::config::Config;

const XML_CONTENT_TYPE: &str = "application/xml";

/// Errors talking to a Jenkins server
#[derive(Error, Debug)]
pub enum JenkinsError {
    /// The configured base URL cannot address jobs
    #[error("Invalid Jenkins URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request could not be sent or its response not read
    #[error("Request to Jenkins failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Jenkins answered with a non-success status
    #[error("Jenkins returned HTTP {status} for {url}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
        /// Response body.
        body: String,
    },
}

/// Summary of a job, from `/job/<name>/api/json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    /// Job name
    pub name: String,
    /// Absolute URL of the job
    pub url: String,
    /// Whether the job can be built
    #[serde(default)]
    pub buildable: Option<bool>,
    /// Job description
    #[serde(default)]
    pub description: Option<String>,
}

/// Storage of job configurations
#[async_trait]
#[allow(clippy::missing_errors_doc)]
pub trait JobRepository: Send + Sync {
    /// Returns true if the job exists
    async fn job_exists(&self, name: &str) -> Result<bool, JenkinsError>;

    /// Fetches the current `config.xml` of a job
    async fn get_job_config(&self, name: &str) -> Result<String, JenkinsError>;

    /// Creates a new job from `config_xml`
    async fn create_job(&self, name: &str, config_xml: &str) -> Result<(), JenkinsError>;

    /// Replaces the configuration of an existing job
    async fn reconfig_job(&self, name: &str, config_xml: &str) -> Result<(), JenkinsError>;
}

/// Client for the Jenkins REST API
pub struct JenkinsClient {
    http_client: Client,
    base_url: Url,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl JenkinsClient {
    /// Creates a client for `config.jenkins_url`.
    ///
    /// Basic authentication is used when both a user name and an API token
    /// are configured.
    ///
    /// # Errors
    ///
    /// Returns [`JenkinsError::InvalidUrl`] if the URL cannot be parsed or
    /// cannot have a path, and [`JenkinsError::Request`] if the HTTP client
    /// cannot be built.
    pub fn new(config: &Config) -> Result<Self, JenkinsError> {
        let base_url = parse_base_url(&config.jenkins_url)?;
        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = Client::builder().timeout(timeout).build()?;

        let credentials = match (&config.username, &config.api_token) {
            (Some(user), Some(token)) => Some((user.clone(), token.clone())),
            (Some(_), None) | (None, Some(_)) => {
                warn!("Both username and API token are needed for authentication; sending anonymous requests");
                None
            }
            (None, None) => None,
        };

        Ok(Self {
            http_client,
            base_url,
            credentials,
            timeout,
        })
    }

    /// Base URL all requests are relative to
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of `/job/<a>/job/<b>/<suffix...>` for job `a/b`
    ///
    /// # Errors
    ///
    /// Returns [`JenkinsError::InvalidUrl`] for an empty job name.
    pub fn job_url(&self, name: &str, suffix: &[&str]) -> Result<Url, JenkinsError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| self.invalid_base())?;
            segments.pop_if_empty();
            for part in job_path(name)? {
                segments.push("job").push(part);
            }
            segments.extend(suffix);
        }
        Ok(url)
    }

    /// URL of `createItem` in the folder that will contain job `name`
    ///
    /// # Errors
    ///
    /// Returns [`JenkinsError::InvalidUrl`] for an empty job name.
    pub fn create_item_url(&self, name: &str) -> Result<Url, JenkinsError> {
        let parts = job_path(name)?;
        let (leaf, folders) = parts.split_last().ok_or_else(|| empty_name(name))?;

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| self.invalid_base())?;
            segments.pop_if_empty();
            for folder in folders {
                segments.push("job").push(folder);
            }
            segments.push("createItem");
        }
        url.query_pairs_mut().append_pair("name", leaf);
        Ok(url)
    }

    /// Fetches the summary of job `name`, or `None` if it does not exist
    ///
    /// # Errors
    ///
    /// Returns [`JenkinsError`] for transport failures and statuses other
    /// than success or 404.
    pub async fn job_info(&self, name: &str) -> Result<Option<JobInfo>, JenkinsError> {
        let url = self.job_url(name, &["api", "json"])?;
        debug!(%url, "Fetching job info");

        let response = self.authorized(self.http_client.get(url.clone())).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response, &url).await?;
        Ok(Some(response.json().await?))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((user, token)) => request.basic_auth(user, Some(token)),
            None => request,
        }
    }

    async fn post_xml(&self, url: Url, config_xml: &str) -> Result<(), JenkinsError> {
        let response = self
            .authorized(self.http_client.post(url.clone()))
            .header(reqwest::header::CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(config_xml.to_string())
            .send()
            .await?;
        check_status(response, &url).await?;
        Ok(())
    }

    fn invalid_base(&self) -> JenkinsError {
        JenkinsError::InvalidUrl {
            url: self.base_url.to_string(),
            reason: "URL cannot have a path".to_string(),
        }
    }
}

#[async_trait]
impl JobRepository for JenkinsClient {
    async fn job_exists(&self, name: &str) -> Result<bool, JenkinsError> {
        Ok(self.job_info(name).await?.is_some())
    }

    async fn get_job_config(&self, name: &str) -> Result<String, JenkinsError> {
        let url = self.job_url(name, &["config.xml"])?;
        info!(job = name, "Fetching job configuration");

        let response = self.authorized(self.http_client.get(url.clone())).send().await?;
        let response = check_status(response, &url).await?;
        Ok(response.text().await?)
    }

    async fn create_job(&self, name: &str, config_xml: &str) -> Result<(), JenkinsError> {
        let url = self.create_item_url(name)?;
        info!(job = name, "Creating job");
        self.post_xml(url, config_xml).await
    }

    async fn reconfig_job(&self, name: &str, config_xml: &str) -> Result<(), JenkinsError> {
        let url = self.job_url(name, &["config.xml"])?;
        info!(job = name, "Reconfiguring job");
        self.post_xml(url, config_xml).await
    }
}

impl fmt::Debug for JenkinsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JenkinsClient")
            .field("base_url", &self.base_url.as_str())
            .field("user", &self.credentials.as_ref().map(|(user, _)| user))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, JenkinsError> {
    let url = Url::parse(raw).map_err(|e| JenkinsError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(JenkinsError::InvalidUrl {
            url: raw.to_string(),
            reason: "URL cannot have a path".to_string(),
        });
    }
    Ok(url)
}

fn job_path(name: &str) -> Result<Vec<&str>, JenkinsError> {
    let parts: Vec<&str> = name.split('/').filter(|part| !part.is_empty()).collect();
    if parts.is_empty() {
        return Err(empty_name(name));
    }
    Ok(parts)
}

fn empty_name(name: &str) -> JenkinsError {
    JenkinsError::InvalidUrl {
        url: name.to_string(),
        reason: "job name is empty".to_string(),
    }
}

async fn check_status(
    response: reqwest::Response,
    url: &Url,
) -> Result<reqwest::Response, JenkinsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), %url, "Jenkins request failed");
    Err(JenkinsError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(url: &str) -> JenkinsClient {
        let config = Config {
            jenkins_url: url.to_string(),
            ..Config::default()
        };
        JenkinsClient::new(&config).unwrap()
    }

    #[test]
    fn test_job_config_url() {
        let client = client("http://localhost:8080/jenkins");
        let url = client.job_url("dummy job", &["config.xml"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/jenkins/job/dummy%20job/config.xml"
        );
    }

    #[test]
    fn test_job_url_with_trailing_slash_base() {
        let client = client("http://localhost:8080/jenkins/");
        let url = client.job_url("app", &["api", "json"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/jenkins/job/app/api/json");
    }

    #[test]
    fn test_job_url_in_folder() {
        let client = client("https://ci.example.com");
        let url = client.job_url("team/app", &["config.xml"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ci.example.com/job/team/job/app/config.xml"
        );
    }

    #[test]
    fn test_create_item_url() {
        let client = client("https://ci.example.com");
        assert_eq!(
            client.create_item_url("new job").unwrap().as_str(),
            "https://ci.example.com/createItem?name=new+job"
        );
        assert_eq!(
            client.create_item_url("team/app").unwrap().as_str(),
            "https://ci.example.com/job/team/createItem?name=app"
        );
    }

    #[test]
    fn test_empty_job_name() {
        let client = client("https://ci.example.com");
        assert!(matches!(
            client.job_url("/", &[]),
            Err(JenkinsError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = Config {
            jenkins_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            JenkinsClient::new(&config),
            Err(JenkinsError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_credentials_require_user_and_token() {
        let config = Config {
            username: Some("bot".to_string()),
            ..Config::default()
        };
        let client = JenkinsClient::new(&config).unwrap();
        assert!(client.credentials.is_none());

        let config = Config {
            username: Some("bot".to_string()),
            api_token: Some("secret".to_string()),
            ..Config::default()
        };
        let client = JenkinsClient::new(&config).unwrap();
        assert!(!format!("{client:?}").contains("secret"));
    }

    #[test]
    fn test_job_info_deserialize() {
        let json = r#"{"_class":"hudson.model.FreeStyleProject","name":"dummy job","url":"http://localhost:8080/job/dummy%20job/","buildable":true}"#;
        let info: JobInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.name, "dummy job");
        assert_eq!(info.buildable, Some(true));
        assert_eq!(info.description, None);
    }
}
