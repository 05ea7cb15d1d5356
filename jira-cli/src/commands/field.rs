// ABOUTME: `jira field` lists remote fields and manages the custom fields shown in tables
// ABOUTME: Only string and number fields can be added to the configuration

use anyhow::{Result, bail};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use crate::command::{CommandModule, Invocation, required_arg};
use crate::constants::messages;
use crate::fields::{self, Resolution};

pub struct FieldCommand;

#[async_trait(?Send)]
impl CommandModule for FieldCommand {
    fn name(&self) -> &'static str {
        "field"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("field")
                .about("Do things related to issue fields")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("listall").about("Show the list of fields"))
                .subcommand(
                    Command::new("add")
                        .about("Add a custom field to be shown")
                        .arg(Arg::new("field").required(true).help("The field name")),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a custom field")
                        .arg(Arg::new("field").required(true).help("The field name")),
                )
                .subcommand(Command::new("list").about("List the configured custom fields")),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("listall", _)) => list_all(invocation).await,
            Some(("add", sub)) => add(invocation, required_arg(sub, "field")?).await,
            Some(("remove", sub)) => remove(invocation, required_arg(sub, "field")?),
            Some(("list", _)) => list(invocation),
            other => bail!("Unknown field command: {:?}", other.map(|(name, _)| name)),
        }
    }
}

async fn list_all(invocation: &Invocation) -> Result<()> {
    let session = invocation.open_session()?;
    let remote = fields::list_fields(&session).await?;

    println!("{}", invocation.formatter().fields_table(&remote));
    Ok(())
}

async fn add(invocation: &Invocation, name: &str) -> Result<()> {
    let mut session = invocation.open_session()?;
    let output = invocation.output();
    let remote = fields::list_fields(&session).await?;

    match fields::classify(&remote, name) {
        Resolution::NotFound => {
            output.warning(messages::UNKNOWN_FIELD);
            return Ok(());
        }
        Resolution::Unsupported { schema_type } => {
            log::debug!("Field {} has schema type {:?}", name, schema_type);
            output.warning(messages::UNSUPPORTED_FIELD);
            return Ok(());
        }
        Resolution::Resolved(resolved) => {
            log::debug!("Field {} resolved to {}", name, resolved.key);
        }
    }

    if !session.config_mut().add_field(name) {
        output.info(&format!("\"{name}\" is already shown"));
        return Ok(());
    }
    session.persist()?;

    output.success(messages::CONFIG_UPDATED);
    Ok(())
}

fn remove(invocation: &Invocation, name: &str) -> Result<()> {
    let mut session = invocation.open_session()?;
    let output = invocation.output();

    if !session.config_mut().remove_field(name) {
        output.warning(messages::UNKNOWN_FIELD);
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
            .configured_fields_table(session.config().fields())
    );
    Ok(())
}
