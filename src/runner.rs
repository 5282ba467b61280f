//! Thin facade over the jobs boundary for one submit-and-wait cycle.
//!
//! `run` re-verifies the job before submitting and coarsens any lookup
//! failure to "not found". That is deliberately lossy: a transient lookup
//! error aborts the pipeline the same way a missing job does, and callers
//! see a single fatal error either way.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::jobs::{JobsApi, JobsError, Run};

/// Remote job client used by the submit stage.
pub struct JobRunner<'a> {
    api: &'a dyn JobsApi,
}

impl<'a> JobRunner<'a> {
    pub fn new(api: &'a dyn JobsApi) -> Self {
        Self { api }
    }

    /// Whether the job definition can currently be resolved.
    ///
    /// Never errors; a failed lookup reads as absence.
    pub fn exists(&self, job_id: &str) -> bool {
        self.api.get_job(job_id).is_ok()
    }

    /// Submit the job and block until its run terminates.
    ///
    /// Returns the terminal run together with the wall-clock duration of the
    /// whole submit-and-wait cycle. No retry on failure; errors propagate as
    /// a single fatal error.
    pub fn run(
        &self,
        job_id: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<(Run, Duration), JobsError> {
        if job_id.is_empty() {
            return Err(JobsError::JobNotFound {
                job_id: job_id.to_string(),
            });
        }
        if let Err(err) = self.api.get_job(job_id) {
            tracing::error!(job_id, error = %err, "job lookup failed");
            return Err(JobsError::JobNotFound {
                job_id: job_id.to_string(),
            });
        }

        let before = Instant::now();
        let run = self.api.run_now_and_wait(job_id, parameters)?;
        Ok((run, before.elapsed()))
    }
}
