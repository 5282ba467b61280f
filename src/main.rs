use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobflow::cli::RootArgs;
use jobflow::config::Config;
use jobflow::input::read_stdin_input;
use jobflow::jobs::DatabricksClient;
use jobflow::options::parse_options;
use jobflow::stages::{build_flow, STAGE_ENHANCE};

fn main() {
    // Logs go to stderr so stdout stays reserved for the output document.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!("workflow failed: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = RootArgs::parse();
    let config = Config::from_env()?;
    let options = parse_options(&args.params);
    let input = read_stdin_input()?;

    let client = DatabricksClient::new(&config);
    let flow = build_flow(&client, &config, options, input);
    let outputs = flow.run()?;
    let result = outputs.into_output(STAGE_ENHANCE)?;

    let text = serde_json::to_string_pretty(&result)?;
    println!("{text}");
    Ok(())
}
