//! Run statistics aggregation for the output document.
//!
//! Run-level metadata is known the moment the blocking wait returns; the
//! per-task result block is only known after extraction, so the two blocks
//! are populated in two steps rather than atomically.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::jobs::{Run, RunState};

/// Statistics block attached to the decision output.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub run: RunStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultStatistics>,
}

/// Run-level annotations, available right after the blocking wait.
#[derive(Debug, Clone, Serialize)]
pub struct RunStatistics {
    pub custom: RunCustom,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunCustom {
    pub run_id: u64,
    pub job_id: String,
    pub state: RunState,
    /// Wall-clock seconds for the whole submit-and-wait cycle.
    pub duration: f64,
}

/// Per-task results, attached once extraction has completed.
#[derive(Debug, Clone, Serialize)]
pub struct ResultStatistics {
    pub custom: BTreeMap<String, Value>,
}

impl Statistics {
    /// Build the run block from a terminal run; the result block stays empty.
    pub fn for_run(job_id: &str, run: &Run, duration: Duration) -> Self {
        Self {
            run: RunStatistics {
                custom: RunCustom {
                    run_id: run.run_id,
                    job_id: job_id.to_string(),
                    state: run.status.state,
                    duration: duration.as_secs_f64(),
                },
            },
            result: None,
        }
    }

    /// Attach the normalized per-task outputs as the result block.
    pub fn attach_results(&mut self, results: BTreeMap<String, Value>) {
        self.result = Some(ResultStatistics { custom: results });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::RunStatus;
    use serde_json::json;

    fn run() -> Run {
        Run {
            run_id: 42,
            status: RunStatus {
                state: RunState::Terminated,
            },
            tasks: Vec::new(),
        }
    }

    #[test]
    fn run_block_is_present_before_results() {
        let stats = Statistics::for_run("123", &run(), Duration::from_millis(2500));
        assert_eq!(stats.run.custom.run_id, 42);
        assert_eq!(stats.run.custom.job_id, "123");
        assert!((stats.run.custom.duration - 2.5).abs() < 1e-9);
        assert!(stats.result.is_none());

        // Absent result block is omitted from the serialized document.
        let doc = serde_json::to_value(stats).unwrap();
        assert!(doc.get("result").is_none());
        assert_eq!(doc["run"]["custom"]["state"], json!("TERMINATED"));
    }

    #[test]
    fn results_attach_as_second_step() {
        let mut stats = Statistics::for_run("123", &run(), Duration::from_secs(1));
        let mut results = BTreeMap::new();
        results.insert("t1".to_string(), json!({"value": 7}));
        stats.attach_results(results);

        let doc = serde_json::to_value(stats).unwrap();
        assert_eq!(doc["result"]["custom"]["t1"]["value"], json!(7));
    }
}
