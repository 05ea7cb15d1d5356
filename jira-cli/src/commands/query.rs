// ABOUTME: `jira query <jql>` runs a JQL search and prints the matching issues
// ABOUTME: Also hosts the search rendering shared with `jira run`

use anyhow::Result;
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use crate::command::{CommandModule, Invocation, required_arg};
use crate::constants::{issue_fields, limits, messages, spinners};
use crate::fields::{self, ResolvedField};
use crate::session::Session;

pub struct QueryCommand;

pub(crate) fn limit_arg() -> Arg {
    Arg::new("limit")
        .long("limit")
        .short('l')
        .help(format!(
            "Maximum number of issues to fetch [default: {}]",
            limits::DEFAULT_MAX_RESULTS
        ))
        .value_parser(clap::value_parser!(u32).range(1..))
}

pub(crate) fn limit(matches: &ArgMatches) -> u32 {
    matches
        .get_one::<u32>("limit")
        .copied()
        .unwrap_or(limits::DEFAULT_MAX_RESULTS)
}

/// Issue fields to request: the base set plus the configured custom field keys
pub(crate) fn requested_fields(base: &[&str], columns: &[(String, ResolvedField)]) -> Vec<String> {
    let mut requested: Vec<String> = base.iter().map(|field| field.to_string()).collect();
    requested.extend(columns.iter().map(|(_, field)| field.key.clone()));
    requested
}

/// Search with `jql` and print the issue table
pub(crate) async fn render_search(
    invocation: &Invocation,
    session: &Session,
    jql: &str,
    max_results: u32,
) -> Result<()> {
    let columns = fields::configured_columns(session).await?;
    let requested = requested_fields(issue_fields::LIST, &columns);

    let result = session
        .spin(
            spinners::QUERY,
            session.api().search(jql, max_results, &requested),
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
    if result.total > result.issues.len() as u64 {
        invocation.output().info(&format!(
            "Showing {} of {} issues",
            result.issues.len(),
            result.total
        ));
    }
    Ok(())
}

#[async_trait(?Send)]
impl CommandModule for QueryCommand {
    fn name(&self) -> &'static str {
        "query"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("query")
                .about("Run a JQL query")
                .arg(Arg::new("jql").required(true).help("The JQL query"))
                .arg(limit_arg()),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        let jql = required_arg(matches, "jql")?;
        let session = invocation.open_session()?;

        render_search(invocation, &session, jql, limit(matches)).await
    }
}
