//! Jira / Tempo timesheet submission for wid.
//!
//! Pushes a day's export payload to the Tempo timesheets plugin:
//! - looks up each issue's remaining estimate in Jira
//! - builds a Tempo worklog from the estimate and the exported entry
//! - validates the worklog, then submits it
//!
//! Entries are submitted independently. A failure for one entry is reported in
//! its outcome and never stops or rolls back the others.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinSet;
use wid_core::{ExportEntry, ExportPayload};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const ISSUE_FIELDS: &str = "project,summary,timeestimate,issuetype";
const ISSUE_PATH: &str = "rest/api/2/issue";
const WORKLOGS_PATH: &str = "rest/tempo-timesheets/3/worklogs";
const ANALYTICS_ORIGIN_ACTION: &str = "clicked";

/// Tempo client errors.
#[derive(Debug, Error)]
pub enum TempoError {
    /// The client configuration was unusable.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned an error response.
    #[error("API error: {message}")]
    Api { message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Jira / Tempo REST client.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    username: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for the Jira instance at `base_url`, recording
    /// worklogs as `username`.
    pub fn new(base_url: impl Into<String>, username: impl Into<String>) -> Result<Self, TempoError> {
        Self::with_builder(base_url, username, reqwest::Client::builder())
    }

    fn with_builder(
        base_url: impl Into<String>,
        username: impl Into<String>,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, TempoError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let username = username.into().trim().to_string();

        if base_url.is_empty() {
            return Err(TempoError::InvalidConfig {
                reason: "base URL cannot be empty",
            });
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TempoError::InvalidConfig {
                reason: "base URL must start with http:// or https://",
            });
        }
        if username.is_empty() {
            return Err(TempoError::InvalidConfig {
                reason: "username cannot be empty",
            });
        }

        let http = builder
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(TempoError::ClientBuild)?;

        Ok(Self {
            http,
            base_url,
            username,
        })
    }

    fn issue_url(&self, key: &str) -> String {
        format!("{}/{ISSUE_PATH}/{key}", self.base_url)
    }

    fn worklogs_url(&self) -> String {
        format!("{}/{WORKLOGS_PATH}/", self.base_url)
    }

    fn validate_url(&self) -> String {
        format!("{}/{WORKLOGS_PATH}/validate", self.base_url)
    }

    /// Fetches the issue with its time estimate.
    pub async fn get_issue(&self, key: &str) -> Result<Issue, TempoError> {
        let response = self
            .http
            .get(self.issue_url(key))
            .query(&[("fields", ISSUE_FIELDS)])
            .send()
            .await?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TempoError::Api {
                message: format!("status {status}: {body}"),
            });
        }
        if !is_json {
            return Err(TempoError::InvalidResponse(format!(
                "issue {key} did not return JSON"
            )));
        }

        serde_json::from_str(&body).map_err(|err| TempoError::InvalidResponse(err.to_string()))
    }

    /// Asks Tempo whether the worklog would be accepted.
    pub async fn validate(&self, worklog: &Worklog) -> Result<(), TempoError> {
        self.post_worklog(&self.validate_url(), worklog).await
    }

    /// Records the worklog.
    pub async fn submit(&self, worklog: &Worklog) -> Result<(), TempoError> {
        self.post_worklog(&self.worklogs_url(), worklog).await
    }

    async fn post_worklog(&self, url: &str, worklog: &Worklog) -> Result<(), TempoError> {
        let response = self.http.post(url).json(worklog).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(TempoError::Api {
                message: format!("status {status}: {body}"),
            });
        }
        Ok(())
    }

    /// Looks up, validates and submits a single entry.
    pub async fn submit_entry(
        &self,
        entry: &ExportEntry,
        date_started: &str,
    ) -> Result<Worklog, TempoError> {
        let issue = self.get_issue(&entry.key).await?;
        let worklog = build_worklog(entry, &issue, date_started, &self.username);
        self.validate(&worklog).await?;
        self.submit(&worklog).await?;
        Ok(worklog)
    }
}

/// Jira issue, reduced to what a worklog needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub id: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueFields {
    /// Remaining estimate in seconds; unset on unestimated issues.
    #[serde(default)]
    pub timeestimate: Option<i64>,
}

/// Tempo worklog as accepted by the timesheets REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Worklog {
    pub id: Option<String>,
    pub issue: WorklogIssue,
    pub time_spent_seconds: i64,
    pub date_started: String,
    pub comment: String,
    pub meta: WorklogMeta,
    pub author: WorklogAuthor,
    pub work_attribute_values: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklogIssue {
    pub key: String,
    pub remaining_estimate_seconds: i64,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorklogMeta {
    #[serde(rename = "analytics-origin-action")]
    pub analytics_origin_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorklogAuthor {
    pub name: String,
}

/// Builds the worklog for `entry`; the remaining estimate never goes below zero.
pub fn build_worklog(entry: &ExportEntry, issue: &Issue, date_started: &str, author: &str) -> Worklog {
    let estimate = issue.fields.timeestimate.unwrap_or(0);
    Worklog {
        id: None,
        issue: WorklogIssue {
            key: entry.key.to_uppercase(),
            remaining_estimate_seconds: (estimate - entry.timespent).max(0),
            id: issue.id.clone(),
        },
        time_spent_seconds: entry.timespent,
        date_started: date_started.to_string(),
        comment: entry.comment.clone(),
        meta: WorklogMeta {
            analytics_origin_action: ANALYTICS_ORIGIN_ACTION.to_string(),
        },
        author: WorklogAuthor {
            name: author.to_string(),
        },
        work_attribute_values: Vec::new(),
    }
}

/// Result of submitting one entry.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub key: String,
    pub timespent: i64,
    pub result: Result<(), TempoError>,
}

/// Submits every entry of the payload except those matched by `skip`.
///
/// Entries run concurrently; outcomes arrive in completion order.
pub async fn submit_payload<F>(
    client: &Client,
    payload: &ExportPayload,
    skip: F,
) -> Vec<SubmissionOutcome>
where
    F: Fn(&ExportEntry) -> bool,
{
    let mut tasks = JoinSet::new();

    for entry in &payload.entries {
        if skip(entry) {
            tracing::info!(key = %entry.key, "skipping entry");
            continue;
        }

        let client = client.clone();
        let entry = entry.clone();
        let date_started = payload.date.clone();
        tasks.spawn(async move {
            let result = client.submit_entry(&entry, &date_started).await.map(|_| ());
            match &result {
                Ok(()) => tracing::info!(key = %entry.key, seconds = entry.timespent, "submitted worklog"),
                Err(e) => tracing::warn!(key = %entry.key, error = %e, "failed to submit worklog"),
            }
            SubmissionOutcome {
                key: entry.key,
                timespent: entry.timespent,
                result,
            }
        });
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => tracing::warn!(error = %e, "submission task did not complete"),
        }
    }
    outcomes
}
