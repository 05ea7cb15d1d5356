// ABOUTME: Main entry point for the Jira CLI application
// ABOUTME: Sets up logging, parses arguments and hands the chosen action to its module

use anyhow::Result;
use jira_cli::{cli, command, commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let modules = commands::all();
    let matches = cli::build_parser(&modules).get_matches();

    let default_filter = if cli::verbose(&matches) { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    command::dispatch(&modules, &matches).await
}
