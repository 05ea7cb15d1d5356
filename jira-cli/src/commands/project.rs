// ABOUTME: `jira project` lists the visible projects and shows one in detail
// ABOUTME: Project details include the lead and the available issue types

use anyhow::{Result, bail};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use crate::command::{CommandModule, Invocation, required_arg};
use crate::constants::spinners;

pub struct ProjectCommand;

#[async_trait(?Send)]
impl CommandModule for ProjectCommand {
    fn name(&self) -> &'static str {
        "project"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("project")
                .about("Browse projects")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("list").about("List the projects"))
                .subcommand(
                    Command::new("show")
                        .about("Show a project")
                        .arg(Arg::new("project").required(true).help("Project key (e.g., ENG)")),
                ),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("list", _)) => list(invocation).await,
            Some(("show", sub)) => show(invocation, required_arg(sub, "project")?).await,
            other => bail!("Unknown project command: {:?}", other.map(|(name, _)| name)),
        }
    }
}

async fn list(invocation: &Invocation) -> Result<()> {
    let session = invocation.open_session()?;
    let projects = session
        .spin(spinners::PROJECTS, session.api().list_projects())
        .await?;

    println!("{}", invocation.formatter().projects_table(&projects));
    Ok(())
}

async fn show(invocation: &Invocation, key: &str) -> Result<()> {
    let session = invocation.open_session()?;
    let project = session
        .spin(spinners::PROJECTS, session.api().get_project(key))
        .await?;

    println!("{}", invocation.formatter().project_details(&project));
    Ok(())
}
