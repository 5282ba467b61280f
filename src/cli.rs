//! CLI argument capture for the workflow binary.
//!
//! The CLI is intentionally thin: every token after the binary name is a job
//! parameter for the remote platform, so no flags are reserved by the
//! workflow itself and everything is forwarded to the option normalizer.

use clap::Parser;

/// Root CLI entrypoint for the remote-job workflow.
#[derive(Parser, Debug)]
#[command(
    name = "jobflow",
    version,
    about = "Submit a decision-model run to a remote batch-job platform",
    after_help = "All arguments are forwarded to the remote job as parameters:\n  --key=value  parameter `key` with `value`\n  --flag       presence flag, sent as `flag=true`\n\nAn optional JSON input document is read from stdin when piped.\n\nExamples:\n  jobflow --solver=greedy --time-limit=30\n  cat input.json | jobflow --profile"
)]
pub struct RootArgs {
    /// Parameters forwarded to the remote job (`--key=value` or `--flag`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "PARAM")]
    pub params: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphen_tokens_are_captured_as_params() {
        let args =
            RootArgs::parse_from(["jobflow", "--a=1", "-b", "--a=2"]);
        assert_eq!(args.params, vec!["--a=1", "-b", "--a=2"]);
    }

    #[test]
    fn no_params_is_valid() {
        let args = RootArgs::parse_from(["jobflow"]);
        assert!(args.params.is_empty());
    }
}
