//! Decision workflow that delegates solving to a remote batch-job platform.
//!
//! The pipeline is a two-stage DAG: `submit` flattens CLI tokens into job
//! parameters, submits the remote job, blocks until it terminates, and
//! normalizes the per-task outputs into a decision output document;
//! `enhance` best-effort derives a bar-chart asset from those results.

pub mod chart;
pub mod cli;
pub mod config;
pub mod extract;
pub mod flow;
pub mod input;
pub mod jobs;
pub mod options;
pub mod output;
pub mod runner;
pub mod stages;
pub mod stats;
