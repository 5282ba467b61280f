//! Best-effort chart derivation from the normalized results.
//!
//! Remote jobs are user-editable, so the workforce-scheduling structure the
//! chart needs may sit under any task key or be absent entirely. The search
//! is a linear scan for the first recognizable entry; a miss is an expected
//! case, not an error.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::output::{Asset, Visual};

/// Key identifying a workforce-scheduling result within a task output.
pub const SHIFTS_PER_WORKER: &str = "shiftsPerWorker";

/// Find the first task output carrying a per-worker shift-count structure.
pub fn find_shift_counts(solution: &BTreeMap<String, Value>) -> Option<&Map<String, Value>> {
    solution.values().find_map(|task_output| {
        task_output
            .as_object()
            .and_then(|obj| obj.get(SHIFTS_PER_WORKER))
            .and_then(Value::as_object)
    })
}

/// Build the bar-chart asset for a shift-count structure.
pub fn shift_chart_asset(shifts_per_worker: &Map<String, Value>) -> Asset {
    let workers: Vec<&str> = shifts_per_worker.keys().map(String::as_str).collect();
    let counts: Vec<&Value> = shifts_per_worker.values().collect();
    let plot = json!({
        "data": [{"x": workers, "y": counts, "type": "bar", "name": "Shifts"}],
        "layout": {
            "title": {"text": "Shift Assignment Distribution"},
            "xaxis": {"title": {"text": "Name"}},
            "yaxis": {"title": {"text": "Number of Shifts"}},
        },
    });
    Asset {
        name: "assignments".to_string(),
        description: "Bar chart of shifts assigned to each worker".to_string(),
        content: plot,
        visual: Visual {
            visual_schema: "plotly".to_string(),
            label: "Shift Assignments".to_string(),
        },
    }
}
