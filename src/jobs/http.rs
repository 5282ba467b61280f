//! HTTP implementation of the jobs boundary against a Databricks workspace.
//!
//! All calls are blocking. `run_now_and_wait` hides a poll loop behind the
//! trait's single blocking call; the wait budget mirrors the platform SDK's
//! 20-minute default so a hung run surfaces as an error instead of blocking
//! the workflow forever.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::thread;
use std::time::{Duration, Instant};
use ureq::Agent;

use crate::config::Config;
use crate::jobs::{JobsApi, JobsError, Run, RunOutput};

/// Per-request timeout; individual API calls are short even when the run is not.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// How long a submitted run may take to reach a terminal state.
const WAIT_BUDGET: Duration = Duration::from_secs(20 * 60);

/// Delay between run-state polls.
const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Blocking Jobs API client for one workspace.
pub struct DatabricksClient {
    agent: Agent,
    host: String,
    authorization: String,
}

#[derive(Deserialize)]
struct RunNowResponse {
    run_id: u64,
}

impl DatabricksClient {
    pub fn new(config: &Config) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self {
            agent,
            host: config.host.trim_end_matches('/').to_string(),
            authorization: format!("Bearer {}", config.token),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/2.2/jobs/{path}", self.host)
    }

    fn get_run(&self, run_id: u64) -> Result<Run, JobsError> {
        let mut response = self
            .agent
            .get(self.endpoint("runs/get"))
            .header("Authorization", self.authorization.as_str())
            .query("run_id", run_id.to_string())
            .call()?;
        Ok(response.body_mut().read_json()?)
    }

    /// Poll the run until it terminates or the wait budget is exhausted.
    fn wait_for_terminal(&self, run_id: u64) -> Result<Run, JobsError> {
        let deadline = Instant::now() + WAIT_BUDGET;
        loop {
            let run = self.get_run(run_id)?;
            if run.status.state.is_terminal() {
                return Ok(run);
            }
            tracing::debug!(run_id, state = ?run.status.state, "run not terminal yet");
            if Instant::now() >= deadline {
                return Err(JobsError::WaitTimeout {
                    run_id,
                    budget_secs: WAIT_BUDGET.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl JobsApi for DatabricksClient {
    fn get_job(&self, job_id: &str) -> Result<(), JobsError> {
        self.agent
            .get(self.endpoint("get"))
            .header("Authorization", self.authorization.as_str())
            .query("job_id", job_id)
            .call()?;
        Ok(())
    }

    fn run_now_and_wait(
        &self,
        job_id: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<Run, JobsError> {
        let body = serde_json::json!({
            "job_id": job_id,
            "job_parameters": parameters,
        });
        let submitted: RunNowResponse = self
            .agent
            .post(self.endpoint("run-now"))
            .header("Authorization", self.authorization.as_str())
            .send_json(body)?
            .body_mut()
            .read_json()?;
        tracing::debug!(run_id = submitted.run_id, job_id, "run submitted, waiting");
        self.wait_for_terminal(submitted.run_id)
    }

    fn get_run_output(&self, run_id: u64) -> Result<RunOutput, JobsError> {
        let mut response = self
            .agent
            .get(self.endpoint("runs/get-output"))
            .header("Authorization", self.authorization.as_str())
            .query("run_id", run_id.to_string())
            .call()?;
        Ok(response.body_mut().read_json()?)
    }
}
