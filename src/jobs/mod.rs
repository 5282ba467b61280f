//! Remote batch-job platform boundary.
//!
//! The workflow treats the platform as an opaque capability: look a job up,
//! submit it and block until a terminal state, and fetch per-task output.
//! Wire types mirror the platform's Jobs API documents so serde does the
//! decoding; everything the workflow does not read is left out.

mod http;

pub use http::DatabricksClient;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors surfaced by the jobs boundary.
#[derive(Debug, Error)]
pub enum JobsError {
    /// The job definition could not be resolved.
    #[error("job {job_id} not found")]
    JobNotFound { job_id: String },
    /// Transport-level failure talking to the platform.
    #[error("jobs api request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    /// The platform answered with something the workflow cannot use.
    #[error("unexpected response from {endpoint}: {message}")]
    Api {
        endpoint: &'static str,
        message: String,
    },
    /// The blocking wait outlived the platform-side run budget.
    #[error("run {run_id} did not reach a terminal state within {budget_secs}s")]
    WaitTimeout { run_id: u64, budget_secs: u64 },
}

impl From<ureq::Error> for JobsError {
    fn from(err: ureq::Error) -> Self {
        JobsError::Transport(Box::new(err))
    }
}

/// Synchronous facade over the remote batch-job platform.
///
/// `run_now_and_wait` blocks until the run is terminal; any polling needed to
/// get there is the implementation's concern, callers see one blocking call.
pub trait JobsApi {
    /// Resolve a job definition; an `Err` means the lookup failed.
    fn get_job(&self, job_id: &str) -> Result<(), JobsError>;

    /// Submit a run with the given parameters and block until it terminates.
    fn run_now_and_wait(
        &self,
        job_id: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<Run, JobsError>;

    /// Fetch the output of one task run.
    fn get_run_output(&self, run_id: u64) -> Result<RunOutput, JobsError>;
}

/// One execution instance of a job definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub run_id: u64,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Execution status block shared by runs and tasks.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunStatus {
    #[serde(default)]
    pub state: RunState,
}

/// Lifecycle state reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Blocked,
    #[default]
    Pending,
    Queued,
    Running,
    Terminating,
    Terminated,
    /// Any state this client does not know about.
    #[serde(other)]
    Unknown,
}

impl RunState {
    /// Whether the run has stopped executing for good.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Terminated)
    }
}

/// One constituent task of a run.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub task_key: String,
    pub run_id: u64,
    #[serde(default)]
    pub status: RunStatus,
}

/// Output document of a single task run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunOutput {
    #[serde(default)]
    pub logs: Option<String>,
    #[serde(default)]
    pub notebook_output: Option<NotebookOutput>,
}

/// Notebook result wrapper; `result` may be absent, a string, or structured.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotebookOutput {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}
