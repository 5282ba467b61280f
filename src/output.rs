//! Decision output document produced by the pipeline.
//!
//! The document echoes the submitted options, carries the normalized task
//! results as the solution, the aggregated statistics, and optionally a list
//! of visualization assets added by the enhance stage. Serialization to an
//! on-disk format is the caller's concern; the binary prints it as JSON.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::stats::Statistics;

/// Stage-1 artifact, enriched (maybe) with assets by stage 2.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionOutput {
    /// Options passed to the remote job, plus the `db_job_id` annotation.
    pub options: BTreeMap<String, String>,
    /// Normalized per-task results keyed by task key.
    pub solution: BTreeMap<String, Value>,
    pub statistics: Statistics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<Asset>,
}

/// Visualization artifact attached to the output.
#[derive(Debug, Clone, Serialize)]
pub struct Asset {
    pub name: String,
    pub description: String,
    /// Embedded chart specification.
    pub content: Value,
    pub visual: Visual,
}

/// Rendering metadata for an asset.
#[derive(Debug, Clone, Serialize)]
pub struct Visual {
    /// Schema tag understood by the presentation layer, e.g. `plotly`.
    pub visual_schema: String,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{Run, RunState, RunStatus};
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn empty_asset_list_is_omitted() {
        let run = Run {
            run_id: 1,
            status: RunStatus {
                state: RunState::Terminated,
            },
            tasks: Vec::new(),
        };
        let output = DecisionOutput {
            options: BTreeMap::new(),
            solution: BTreeMap::new(),
            statistics: Statistics::for_run("j", &run, Duration::from_secs(0)),
            assets: Vec::new(),
        };
        let doc = serde_json::to_value(output).unwrap();
        assert!(doc.get("assets").is_none());
        assert_eq!(doc["solution"], json!({}));
    }
}
