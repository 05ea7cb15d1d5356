// ABOUTME: `jira run <preset>` runs a stored preset query
// ABOUTME: Unknown presets are reported inline without contacting the server

use anyhow::Result;
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use super::query;
use crate::command::{CommandModule, Invocation, required_arg};
use crate::constants::messages;

pub struct RunCommand;

#[async_trait(?Send)]
impl CommandModule for RunCommand {
    fn name(&self) -> &'static str {
        "run"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("run")
                .about("Run a preset query")
                .arg(Arg::new("preset").required(true).help("The name of the preset"))
                .arg(query::limit_arg()),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        let name = required_arg(matches, "preset")?;
        let session = invocation.open_session()?;

        let Some(jql) = session.config().preset(name).map(str::to_string) else {
            invocation.output().warning(messages::UNKNOWN_PRESET);
            return Ok(());
        };
        log::debug!("Preset {} expands to {}", name, jql);

        query::render_search(invocation, &session, &jql, query::limit(matches)).await
    }
}
