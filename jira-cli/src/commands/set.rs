// ABOUTME: `jira set` changes the status, assignee or a custom field of an issue
// ABOUTME: Custom fields go through the field resolver so only string and number fields are written

use anyhow::{Result, bail};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use jira_sdk::{Transition, User};
use serde_json::{Map, Value};

use crate::command::{CommandModule, Invocation, required_arg};
use crate::constants::spinners;
use crate::fields;

const CURRENT_USER: &str = "me";

pub struct SetCommand;

fn issue_arg() -> Arg {
    Arg::new("issue")
        .required(true)
        .help("Issue key (e.g., ENG-123)")
}

#[async_trait(?Send)]
impl CommandModule for SetCommand {
    fn name(&self) -> &'static str {
        "set"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("set")
                .about("Update an issue")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("status")
                        .about("Move an issue to another status")
                        .arg(issue_arg())
                        .arg(Arg::new("status").required(true).help("Transition or status name")),
                )
                .subcommand(
                    Command::new("assignee")
                        .about("Assign an issue")
                        .arg(issue_arg())
                        .arg(
                            Arg::new("user")
                                .required(true)
                                .help("User name or email, or \"me\""),
                        ),
                )
                .subcommand(
                    Command::new("field")
                        .about("Set a custom field of an issue")
                        .arg(issue_arg())
                        .arg(Arg::new("field").required(true).help("The field name"))
                        .arg(Arg::new("value").required(true).help("The new value")),
                ),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("status", sub)) => {
                status(
                    invocation,
                    required_arg(sub, "issue")?,
                    required_arg(sub, "status")?,
                )
                .await
            }
            Some(("assignee", sub)) => {
                assignee(
                    invocation,
                    required_arg(sub, "issue")?,
                    required_arg(sub, "user")?,
                )
                .await
            }
            Some(("field", sub)) => {
                field(
                    invocation,
                    required_arg(sub, "issue")?,
                    required_arg(sub, "field")?,
                    required_arg(sub, "value")?,
                )
                .await
            }
            other => bail!("Unknown set command: {:?}", other.map(|(name, _)| name)),
        }
    }
}

/// Match by transition name first, then by target status name, ignoring case
fn find_transition<'a>(transitions: &'a [Transition], wanted: &str) -> Option<&'a Transition> {
    transitions
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(wanted))
        .or_else(|| {
            transitions
                .iter()
                .find(|t| t.to.name.eq_ignore_ascii_case(wanted))
        })
}

#[derive(Debug, PartialEq)]
enum UserMatch<'a> {
    One(&'a User),
    None,
    Ambiguous(Vec<&'a str>),
}

fn pick_user<'a>(users: &'a [User], wanted: &str) -> UserMatch<'a> {
    let exact: Vec<&User> = users
        .iter()
        .filter(|user| {
            user.display_name.eq_ignore_ascii_case(wanted)
                || user.name.as_deref() == Some(wanted)
                || user
                    .email_address
                    .as_deref()
                    .is_some_and(|email| email.eq_ignore_ascii_case(wanted))
        })
        .collect();

    match (exact.as_slice(), users) {
        ([user], _) => UserMatch::One(*user),
        ([], [user]) => UserMatch::One(user),
        ([], []) => UserMatch::None,
        ([], all) => UserMatch::Ambiguous(all.iter().map(|u| u.display_name.as_str()).collect()),
        (several, _) => {
            UserMatch::Ambiguous(several.iter().map(|&u| u.display_name.as_str()).collect())
        }
    }
}

async fn status(invocation: &Invocation, key: &str, wanted: &str) -> Result<()> {
    let session = invocation.open_session()?;
    let output = invocation.output();

    let transitions = session
        .spin(spinners::ISSUE, session.api().list_transitions(key))
        .await?;

    let Some(transition) = find_transition(&transitions, wanted) else {
        let available: Vec<&str> = transitions.iter().map(|t| t.name.as_str()).collect();
        output.warning(&format!(
            "No transition \"{}\" for {}. Available: {}",
            wanted,
            key,
            available.join(", ")
        ));
        return Ok(());
    };

    session
        .spin(
            spinners::UPDATE,
            session.api().transition_issue(key, &transition.id),
        )
        .await?;

    output.success(&format!("{} moved to {}", key, transition.to.name));
    Ok(())
}

async fn assignee(invocation: &Invocation, key: &str, wanted: &str) -> Result<()> {
    let session = invocation.open_session()?;
    let output = invocation.output();

    let user = if wanted == CURRENT_USER {
        session
            .spin(spinners::USER, session.api().myself())
            .await?
    } else {
        let users = session
            .spin(spinners::USER, session.api().find_users(wanted))
            .await?;
        match pick_user(&users, wanted) {
            UserMatch::One(user) => user.clone(),
            UserMatch::None => {
                output.warning(&format!("No user matches \"{wanted}\""));
                return Ok(());
            }
            UserMatch::Ambiguous(names) => {
                output.warning(&format!(
                    "Several users match \"{}\": {}",
                    wanted,
                    names.join(", ")
                ));
                return Ok(());
            }
        }
    };

    session
        .spin(spinners::UPDATE, session.api().assign_issue(key, &user))
        .await?;

    output.success(&format!("{} assigned to {}", key, user.display_name));
    Ok(())
}

async fn field(invocation: &Invocation, key: &str, name: &str, raw: &str) -> Result<()> {
    let session = invocation.open_session()?;
    let output = invocation.output();

    let Some(resolved) = fields::resolve(&session, &output, name).await? else {
        return Ok(());
    };
    let Some(value) = resolved.kind.parse_input(raw) else {
        output.warning(&format!("\"{raw}\" is not a number"));
        return Ok(());
    };

    let mut update = Map::new();
    update.insert(resolved.key.clone(), value);
    session
        .spin(
            spinners::UPDATE,
            session
                .api()
                .update_issue_fields(key, Value::Object(update)),
        )
        .await?;

    output.success(&format!("{key} updated"));
    Ok(())
}
