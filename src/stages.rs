//! The two pipeline stages: submit the remote job, then enhance the result.

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::chart::{find_shift_counts, shift_chart_asset};
use crate::config::Config;
use crate::extract::collect_task_results;
use crate::flow::Flow;
use crate::jobs::JobsApi;
use crate::output::DecisionOutput;
use crate::runner::JobRunner;
use crate::stats::Statistics;

pub const STAGE_SUBMIT: &str = "submit";
pub const STAGE_ENHANCE: &str = "enhance";

/// Wire the two-stage pipeline over the given jobs boundary.
///
/// `input` is the raw decision input text (from stdin); the submit stage
/// decides whether it can travel to the remote job.
pub fn build_flow<'a>(
    api: &'a dyn JobsApi,
    config: &'a Config,
    options: BTreeMap<String, String>,
    input: Option<String>,
) -> Flow<'a, DecisionOutput> {
    Flow::new()
        .stage(STAGE_SUBMIT, &[], move |_| {
            submit(api, config, &options, input.as_deref())
        })
        .stage(STAGE_ENHANCE, &[STAGE_SUBMIT], |done| {
            Ok(enhance(done.output(STAGE_SUBMIT)?.clone()))
        })
}

/// Stage 1: submit the remote job, wait, and aggregate its results.
fn submit(
    api: &dyn JobsApi,
    config: &Config,
    options: &BTreeMap<String, String>,
    input: Option<&str>,
) -> Result<DecisionOutput> {
    let mut options = options.clone();

    // Pass the decision input along only when it is valid JSON; a malformed
    // document is logged and left behind rather than failing the stage.
    if let Some(raw) = input {
        match serde_json::from_str::<Value>(raw) {
            Ok(data) => {
                let encoded = serde_json::to_string(&data).context("encode input data")?;
                tracing::info!(bytes = encoded.len(), "passing input data to the remote job");
                options.insert("data".to_string(), encoded);
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "input data is not valid JSON, running the job without it"
                );
            }
        }
    }

    tracing::info!(job_id = %config.job_id, "remote job id");
    tracing::info!(count = options.len(), "parsed options");
    for (key, value) in &options {
        tracing::info!("  {key} = {value}");
    }

    tracing::info!("starting remote job");
    let runner = JobRunner::new(api);
    let (run, duration) = runner
        .run(&config.job_id, &options)
        .context("run remote job")?;
    tracing::info!(
        run_id = run.run_id,
        job_id = %config.job_id,
        state = ?run.status.state,
        duration_secs = duration.as_secs_f64(),
        "remote job completed"
    );

    let mut statistics = Statistics::for_run(&config.job_id, &run, duration);
    let results = collect_task_results(api, &run);
    statistics.attach_results(results.clone());

    options.insert("db_job_id".to_string(), config.job_id.clone());
    Ok(DecisionOutput {
        options,
        solution: results,
        statistics,
        assets: Vec::new(),
    })
}

/// Stage 2: attach a shift-distribution chart when the results carry one.
fn enhance(mut output: DecisionOutput) -> DecisionOutput {
    tracing::info!("adding custom plot");
    let Some(shifts) = find_shift_counts(&output.solution) else {
        tracing::info!("no scheduling data found in results, skipping enhancement");
        return output;
    };
    let asset = shift_chart_asset(shifts);
    output.assets.push(asset);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{Run, RunOutput, RunState, RunStatus};
    use serde_json::json;
    use std::time::Duration;

    struct NoopApi;

    impl JobsApi for NoopApi {
        fn get_job(&self, _job_id: &str) -> Result<(), crate::jobs::JobsError> {
            Ok(())
        }

        fn run_now_and_wait(
            &self,
            _job_id: &str,
            _parameters: &BTreeMap<String, String>,
        ) -> Result<Run, crate::jobs::JobsError> {
            Ok(Run {
                run_id: 1,
                status: RunStatus {
                    state: RunState::Terminated,
                },
                tasks: Vec::new(),
            })
        }

        fn get_run_output(&self, _run_id: u64) -> Result<RunOutput, crate::jobs::JobsError> {
            Ok(RunOutput::default())
        }
    }

    fn output_with_solution(solution: BTreeMap<String, Value>) -> DecisionOutput {
        let run = Run {
            run_id: 1,
            status: RunStatus {
                state: RunState::Terminated,
            },
            tasks: Vec::new(),
        };
        DecisionOutput {
            options: BTreeMap::new(),
            solution,
            statistics: Statistics::for_run("j", &run, Duration::from_secs(0)),
            assets: Vec::new(),
        }
    }

    #[test]
    fn enhance_attaches_chart_when_structure_found() {
        let mut solution = BTreeMap::new();
        solution.insert(
            "solve".to_string(),
            json!({"shiftsPerWorker": {"alice": 3, "bob": 2}}),
        );
        let enhanced = enhance(output_with_solution(solution.clone()));
        assert_eq!(enhanced.assets.len(), 1);
        assert_eq!(enhanced.assets[0].name, "assignments");
        // The results map itself stays untouched.
        assert_eq!(enhanced.solution, solution);
    }

    #[test]
    fn enhance_passes_through_unrecognized_results() {
        let mut solution = BTreeMap::new();
        solution.insert("t1".to_string(), json!({"foo": 1}));
        let enhanced = enhance(output_with_solution(solution));
        assert!(enhanced.assets.is_empty());
    }

    #[test]
    fn submit_ignores_malformed_input_data() {
        let config = Config {
            host: "https://x".to_string(),
            token: "t".to_string(),
            job_id: "123".to_string(),
        };
        let output = submit(
            &NoopApi,
            &config,
            &BTreeMap::new(),
            Some("definitely not json {"),
        )
        .unwrap();
        assert!(!output.options.contains_key("data"));
        assert_eq!(
            output.options.get("db_job_id").map(String::as_str),
            Some("123")
        );
    }

    #[test]
    fn submit_forwards_valid_input_data() {
        let config = Config {
            host: "https://x".to_string(),
            token: "t".to_string(),
            job_id: "123".to_string(),
        };
        let output = submit(&NoopApi, &config, &BTreeMap::new(), Some("{\"n\": 1}")).unwrap();
        assert_eq!(output.options.get("data").map(String::as_str), Some("{\"n\":1}"));
    }
}
