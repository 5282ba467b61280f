//! Normalization of heterogeneous per-task outputs.
//!
//! Tasks may emit a structured document, a JSON-encoded string, a plain
//! string, or nothing at all. Extraction never fails: each shape degrades to
//! a well-defined value, and a bad payload on one task never prevents
//! extraction for its siblings.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::jobs::{JobsApi, Run};

/// Decoded output payload of a single task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskPayload {
    /// The task produced a structured document.
    Structured(Map<String, Value>),
    /// The task produced text that is not a JSON object.
    Text(String),
    /// No usable output.
    Empty,
}

impl TaskPayload {
    /// Decode a raw notebook result into a payload.
    ///
    /// Objects pass through; strings are parsed as JSON objects and fall back
    /// to the raw text when that fails; anything else (absent, numbers,
    /// arrays, ...) is treated as no output.
    pub fn decode(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::Object(map)) => TaskPayload::Structured(map.clone()),
            Some(Value::String(text)) => {
                match serde_json::from_str::<Map<String, Value>>(text) {
                    Ok(map) => TaskPayload::Structured(map),
                    Err(err) => {
                        tracing::info!(
                            error = %err,
                            "task output is not a JSON document, keeping raw string"
                        );
                        TaskPayload::Text(text.clone())
                    }
                }
            }
            Some(other) => {
                tracing::info!(kind = json_kind(other), "ignoring unexpected task output type");
                TaskPayload::Empty
            }
            None => TaskPayload::Empty,
        }
    }

    /// Collapse the payload into the value stored in the results map.
    pub fn into_value(self) -> Value {
        match self {
            TaskPayload::Structured(map) => Value::Object(map),
            TaskPayload::Text(text) => Value::String(text),
            TaskPayload::Empty => Value::Object(Map::new()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Fetch and normalize the output of every task in a terminal run.
///
/// Every task key in the run appears exactly once in the result; tasks whose
/// output cannot be fetched or decoded map to an empty document.
pub fn collect_task_results(api: &dyn JobsApi, run: &Run) -> BTreeMap<String, Value> {
    let mut results = BTreeMap::new();
    if run.tasks.is_empty() {
        tracing::info!(run_id = run.run_id, "no tasks found in the run");
        return results;
    }

    for task in &run.tasks {
        let payload = match api.get_run_output(task.run_id) {
            Ok(output) => {
                tracing::info!(
                    task_key = %task.task_key,
                    run_id = task.run_id,
                    state = ?task.status.state,
                    "collected task output"
                );
                if let Some(logs) = &output.logs {
                    tracing::debug!(task_key = %task.task_key, logs = %logs, "task logs");
                }
                match output.notebook_output.as_ref().and_then(|n| n.result.as_ref()) {
                    Some(result) => TaskPayload::decode(Some(result)),
                    None => {
                        tracing::info!(
                            task_key = %task.task_key,
                            run_id = task.run_id,
                            "no notebook output found for task"
                        );
                        TaskPayload::Empty
                    }
                }
            }
            // Fault isolation: a failed fetch degrades this task only.
            Err(err) => {
                tracing::warn!(
                    task_key = %task.task_key,
                    run_id = task.run_id,
                    error = %err,
                    "failed to fetch task output"
                );
                TaskPayload::Empty
            }
        };
        results.insert(task.task_key.clone(), payload.into_value());
    }
    results
}
