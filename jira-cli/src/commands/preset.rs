// ABOUTME: `jira preset` stores named JQL queries in the config file
// ABOUTME: Presets are run later with `jira run <preset>`

use anyhow::{Result, bail};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use crate::command::{CommandModule, Invocation, required_arg};
use crate::constants::messages;

pub struct PresetCommand;

#[async_trait(?Send)]
impl CommandModule for PresetCommand {
    fn name(&self) -> &'static str {
        "preset"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("preset")
                .about("Manage preset queries")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("create")
                        .about("Create a new preset")
                        .arg(Arg::new("name").required(true).help("The name of the preset"))
                        .arg(Arg::new("query").required(true).help("The JQL query")),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a preset")
                        .arg(Arg::new("name").required(true).help("The name of the preset")),
                )
                .subcommand(Command::new("list").about("List the presets")),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("create", sub)) => create(
                invocation,
                required_arg(sub, "name")?,
                required_arg(sub, "query")?,
            ),
            Some(("remove", sub)) => remove(invocation, required_arg(sub, "name")?),
            Some(("list", _)) => list(invocation),
            other => bail!("Unknown preset command: {:?}", other.map(|(name, _)| name)),
        }
    }
}

fn create(invocation: &Invocation, name: &str, query: &str) -> Result<()> {
    let mut session = invocation.open_session()?;
    let output = invocation.output();

    if !session.config_mut().add_preset(name, query) {
        output.warning(messages::PRESET_EXISTS);
        return Ok(());
    }
    session.persist()?;

    output.success(messages::CONFIG_UPDATED);
    Ok(())
}

fn remove(invocation: &Invocation, name: &str) -> Result<()> {
    let mut session = invocation.open_session()?;
    let output = invocation.output();

    if !session.config_mut().remove_preset(name) {
        output.warning(messages::UNKNOWN_PRESET);
        return Ok(());
    }
    session.persist()?;

    output.success(messages::CONFIG_UPDATED);
    Ok(())
}

fn list(invocation: &Invocation) -> Result<()> {
    let session = invocation.open_session()?;

    println!(
        "{}",
        invocation
            .formatter()
            .presets_table(session.config().presets())
    );
    Ok(())
}
