//! Workflow configuration resolved once at process start.
//!
//! All remote-platform coordinates come from the environment; a missing
//! variable is a fatal startup error so a misconfigured deployment fails
//! before any job is submitted. The resulting struct is passed by reference
//! into the client instead of living in ambient globals.

use anyhow::{anyhow, Result};
use std::env;

/// Remote platform coordinates for one workflow invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the platform workspace, e.g. `https://host.example.com`.
    pub host: String,
    /// Bearer token used for every API call.
    pub token: String,
    /// Identifier of the job definition to submit.
    pub job_id: String,
}

impl Config {
    /// Build the configuration from required environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: require_env("DATABRICKS_HOST")?,
            token: require_env("DATABRICKS_TOKEN")?,
            job_id: require_env("DATABRICKS_JOB_ID")?,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow!("{name} environment variable is not set"))
}
