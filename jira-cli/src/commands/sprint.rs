// ABOUTME: `jira sprint` lists the open sprints of a project and the issues of one sprint
// ABOUTME: Sprints come from the agile API through the project's scrum boards

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use jira_sdk::{Board, JiraError, Sprint};

use super::query::requested_fields;
use crate::command::{CommandModule, Invocation, required_arg};
use crate::constants::{issue_fields, messages, spinners, sprints};
use crate::fields;
use crate::session::Session;

pub struct SprintCommand;

#[async_trait(?Send)]
impl CommandModule for SprintCommand {
    fn name(&self) -> &'static str {
        "sprint"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("sprint")
                .about("Browse sprints")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("list")
                        .about("List the active and future sprints of a project")
                        .arg(Arg::new("project").required(true).help("Project key (e.g., ENG)")),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show the issues of a sprint")
                        .arg(Arg::new("sprint").required(true).help("Sprint id")),
                ),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("list", sub)) => list(invocation, required_arg(sub, "project")?).await,
            Some(("show", sub)) => show(invocation, required_arg(sub, "sprint")?).await,
            other => bail!("Unknown sprint command: {:?}", other.map(|(name, _)| name)),
        }
    }
}

async fn open_sprints(session: &Session, project: &str) -> Result<Vec<(Board, Sprint)>, JiraError> {
    let boards = session.api().list_boards(project).await?;

    let mut found = Vec::new();
    for board in boards
        .into_iter()
        .filter(|board| board.board_type.as_deref() == Some(sprints::SCRUM_BOARD))
    {
        for sprint in session
            .api()
            .list_sprints(board.id, sprints::LISTED_STATES)
            .await?
        {
            found.push((board.clone(), sprint));
        }
    }
    Ok(found)
}

async fn list(invocation: &Invocation, project: &str) -> Result<()> {
    let session = invocation.open_session()?;
    let found = session
        .spin(spinners::SPRINTS, open_sprints(&session, project))
        .await?;

    if found.is_empty() {
        println!("No active or future sprints in {project}.");
        return Ok(());
    }
    println!("{}", invocation.formatter().sprints_table(&found));
    Ok(())
}

async fn show(invocation: &Invocation, sprint: &str) -> Result<()> {
    let sprint_id: u64 = sprint
        .parse()
        .with_context(|| format!("Sprint id must be a number, got \"{sprint}\""))?;

    let session = invocation.open_session()?;
    let columns = fields::configured_columns(&session).await?;
    let requested = requested_fields(issue_fields::LIST, &columns);

    let result = session
        .spin(
            spinners::SPRINTS,
            session.api().sprint_issues(sprint_id, &requested),
        )
        .await?;

    if result.issues.is_empty() {
        println!("{}", messages::NO_ISSUES);
        return Ok(());
    }
    println!(
        "{}",
        invocation.formatter().issues_table(&result.issues, &columns)
    );
    Ok(())
}
