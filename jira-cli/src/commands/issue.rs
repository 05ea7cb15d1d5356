// ABOUTME: `jira issue` shows a single issue, prints its web URL or comments on it
// ABOUTME: Issue details include the configured custom fields

use anyhow::{Result, bail};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use super::query::requested_fields;
use crate::command::{CommandModule, Invocation, required_arg};
use crate::constants::{issue_fields, spinners};
use crate::fields;

pub struct IssueCommand;

fn issue_arg() -> Arg {
    Arg::new("issue")
        .required(true)
        .help("Issue key (e.g., ENG-123)")
}

#[async_trait(?Send)]
impl CommandModule for IssueCommand {
    fn name(&self) -> &'static str {
        "issue"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("issue")
                .about("Show and comment on issues")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("show")
                        .about("Show the details of an issue")
                        .arg(issue_arg()),
                )
                .subcommand(
                    Command::new("url")
                        .about("Print the web URL of an issue")
                        .arg(issue_arg()),
                )
                .subcommand(
                    Command::new("comment")
                        .about("Add a comment to an issue")
                        .arg(issue_arg())
                        .arg(Arg::new("text").required(true).help("The comment text")),
                ),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("show", sub)) => show(invocation, required_arg(sub, "issue")?).await,
            Some(("url", sub)) => url(invocation, required_arg(sub, "issue")?),
            Some(("comment", sub)) => {
                comment(
                    invocation,
                    required_arg(sub, "issue")?,
                    required_arg(sub, "text")?,
                )
                .await
            }
            other => bail!("Unknown issue command: {:?}", other.map(|(name, _)| name)),
        }
    }
}

async fn show(invocation: &Invocation, key: &str) -> Result<()> {
    let session = invocation.open_session()?;
    let columns = fields::configured_columns(&session).await?;
    let requested = requested_fields(issue_fields::DETAIL, &columns);

    let issue = session
        .spin(spinners::ISSUE, session.api().get_issue(key, &requested))
        .await?;

    println!("{}", invocation.formatter().issue_details(&issue, &columns));
    Ok(())
}

fn url(invocation: &Invocation, key: &str) -> Result<()> {
    let session = invocation.open_session()?;
    println!("{}", session.api().browse_url(key));
    Ok(())
}

async fn comment(invocation: &Invocation, key: &str, text: &str) -> Result<()> {
    let session = invocation.open_session()?;

    let created = session
        .spin(spinners::UPDATE, session.api().add_comment(key, text))
        .await?;

    invocation
        .output()
        .success(&format!("Comment {} added to {}", created.id, key));
    Ok(())
}
