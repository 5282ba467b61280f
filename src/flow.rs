//! Minimal DAG executor for pipeline stages.
//!
//! Stages are pure functions over the outputs of their declared
//! predecessors. The runner executes each stage exactly once, in an order
//! where every predecessor has already produced output, and rejects
//! duplicate ids, unknown dependencies, and cycles with explicit errors.

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;

type StageFn<'a, T> = Box<dyn Fn(&FlowOutputs<T>) -> Result<T> + 'a>;

struct Stage<'a, T> {
    id: String,
    needs: Vec<String>,
    run: StageFn<'a, T>,
}

/// A declared set of stages wired by predecessor ids.
pub struct Flow<'a, T> {
    stages: Vec<Stage<'a, T>>,
}

/// Outputs produced by a completed (or in-progress) flow, keyed by stage id.
#[derive(Debug)]
pub struct FlowOutputs<T> {
    outputs: BTreeMap<String, T>,
}

impl<T> FlowOutputs<T> {
    /// Borrow the output of a predecessor stage.
    pub fn output(&self, id: &str) -> Result<&T> {
        self.outputs
            .get(id)
            .ok_or_else(|| anyhow!("no output recorded for stage `{id}`"))
    }

    /// Take ownership of one stage's output, usually the terminal stage.
    pub fn into_output(mut self, id: &str) -> Result<T> {
        self.outputs
            .remove(id)
            .ok_or_else(|| anyhow!("no output recorded for stage `{id}`"))
    }
}

impl<'a, T> Flow<'a, T> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Register a stage with its predecessor ids.
    pub fn stage(
        mut self,
        id: &str,
        needs: &[&str],
        run: impl Fn(&FlowOutputs<T>) -> Result<T> + 'a,
    ) -> Self {
        self.stages.push(Stage {
            id: id.to_string(),
            needs: needs.iter().map(|need| need.to_string()).collect(),
            run: Box::new(run),
        });
        self
    }

    /// Execute all stages in dependency order.
    pub fn run(&self) -> Result<FlowOutputs<T>> {
        self.validate()?;

        let mut completed = FlowOutputs {
            outputs: BTreeMap::new(),
        };
        let mut pending: Vec<&Stage<'a, T>> = self.stages.iter().collect();
        while !pending.is_empty() {
            let mut still_pending = Vec::new();
            let mut progressed = false;
            for stage in pending {
                let ready = stage
                    .needs
                    .iter()
                    .all(|need| completed.outputs.contains_key(need));
                if !ready {
                    still_pending.push(stage);
                    continue;
                }
                tracing::debug!(stage = %stage.id, "running stage");
                let output = (stage.run)(&completed)?;
                completed.outputs.insert(stage.id.clone(), output);
                progressed = true;
            }
            if !progressed && !still_pending.is_empty() {
                let blocked: Vec<&str> =
                    still_pending.iter().map(|s| s.id.as_str()).collect();
                return Err(anyhow!(
                    "dependency cycle among stages: {}",
                    blocked.join(", ")
                ));
            }
            pending = still_pending;
        }
        Ok(completed)
    }

    fn validate(&self) -> Result<()> {
        let mut ids = BTreeMap::new();
        for stage in &self.stages {
            if ids.insert(stage.id.as_str(), ()).is_some() {
                return Err(anyhow!("duplicate stage id `{}`", stage.id));
            }
        }
        for stage in &self.stages {
            for need in &stage.needs {
                if !ids.contains_key(need.as_str()) {
                    return Err(anyhow!(
                        "stage `{}` depends on unknown stage `{need}`",
                        stage.id
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<T> Default for Flow<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
