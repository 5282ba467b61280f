//! Shared scripted jobs boundary for integration tests.

use jobflow::config::Config;
use jobflow::jobs::{
    JobsApi, JobsError, NotebookOutput, Run, RunOutput, RunState, RunStatus, Task,
};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Scripted platform double: serves a fixed run and per-task outputs, and
/// records the parameters of the submitted run for assertions.
pub struct ScriptedPlatform {
    pub lookup_fails: bool,
    pub run: Run,
    pub outputs: BTreeMap<u64, RunOutput>,
    pub submitted: RefCell<Option<BTreeMap<String, String>>>,
}

impl ScriptedPlatform {
    pub fn with_tasks(tasks: Vec<(Task, RunOutput)>) -> Self {
        let mut outputs = BTreeMap::new();
        let mut run_tasks = Vec::new();
        for (task, output) in tasks {
            outputs.insert(task.run_id, output);
            run_tasks.push(task);
        }
        Self {
            lookup_fails: false,
            run: Run {
                run_id: 1000,
                status: RunStatus {
                    state: RunState::Terminated,
                },
                tasks: run_tasks,
            },
            outputs,
            submitted: RefCell::new(None),
        }
    }
}

impl JobsApi for ScriptedPlatform {
    fn get_job(&self, job_id: &str) -> Result<(), JobsError> {
        if self.lookup_fails {
            Err(JobsError::Api {
                endpoint: "get",
                message: format!("lookup failed for {job_id}"),
            })
        } else {
            Ok(())
        }
    }

    fn run_now_and_wait(
        &self,
        _job_id: &str,
        parameters: &BTreeMap<String, String>,
    ) -> Result<Run, JobsError> {
        *self.submitted.borrow_mut() = Some(parameters.clone());
        Ok(self.run.clone())
    }

    fn get_run_output(&self, run_id: u64) -> Result<RunOutput, JobsError> {
        Ok(self.outputs.get(&run_id).cloned().unwrap_or_default())
    }
}

pub fn test_config() -> Config {
    Config {
        host: "https://workspace.example.com".to_string(),
        token: "test-token".to_string(),
        job_id: "123".to_string(),
    }
}

pub fn task(key: &str, run_id: u64) -> Task {
    Task {
        task_key: key.to_string(),
        run_id,
        status: RunStatus {
            state: RunState::Terminated,
        },
    }
}

pub fn notebook_output(result: Value) -> RunOutput {
    RunOutput {
        logs: Some("task log line".to_string()),
        notebook_output: Some(NotebookOutput {
            result: Some(result),
        }),
    }
}
