// ABOUTME: `jira create` creates an issue from options, prompting for whatever is missing
// ABOUTME: Remembers the project used so the next create can default to it

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use jira_sdk::{IssueType, Project};
use serde_json::{Map, Value, json};

use crate::command::{CommandModule, Invocation};
use crate::constants::spinners;
use crate::fields::{self, ResolvedField};
use crate::interactive::Prompter;
use crate::session::Session;

pub struct CreateCommand;

#[async_trait(?Send)]
impl CommandModule for CreateCommand {
    fn name(&self) -> &'static str {
        "create"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("create")
                .about("Create a new issue")
                .arg(
                    Arg::new("project")
                        .long("project")
                        .short('p')
                        .help("Project key (defaults to the latest project used)"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .help("Issue type name (e.g., Story)"),
                )
                .arg(Arg::new("summary").long("summary").short('s').help("Issue summary"))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .help("Issue description"),
                ),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        let option = |id: &str| matches.get_one::<String>(id).cloned();
        let mut session = invocation.open_session()?;
        let prompter = Prompter::new();

        let project_key = match option("project") {
            Some(project) => project,
            None => match session.config().latest_project() {
                Some(latest) if !prompter.should_prompt() => latest.to_string(),
                latest => prompter.text("Project", latest)?,
            },
        };
        let project = session
            .spin(spinners::PROJECTS, session.api().get_project(&project_key))
            .await?;

        let issue_type = match option("type") {
            Some(issue_type) => issue_type,
            None => choose_issue_type(&prompter, &project)?,
        };
        let summary = match option("summary") {
            Some(summary) => summary,
            None => prompter.text("Summary", None)?,
        };
        let description = match option("description") {
            Some(description) => Some(description),
            None if prompter.should_prompt() => prompter.optional_text("Description")?,
            None => None,
        };

        let mut payload = issue_fields(&project, &issue_type, &summary, description.as_deref());
        if prompter.should_prompt() {
            let custom = prompt_custom_fields(invocation, &session, &prompter).await?;
            payload.extend(custom);
        }

        let created = session
            .spin(
                spinners::CREATE,
                session.api().create_issue(Value::Object(payload)),
            )
            .await?;

        session
            .config_mut()
            .set_latest_project(Some(project.key.clone()));
        session.persist()?;

        invocation.output().success(&format!(
            "Created {} {}",
            created.key,
            session.api().browse_url(&created.key)
        ));
        Ok(())
    }
}

fn selectable_types(project: &Project) -> Vec<&IssueType> {
    project
        .issue_types
        .iter()
        .filter(|issue_type| !issue_type.subtask)
        .collect()
}

fn choose_issue_type(prompter: &Prompter, project: &Project) -> Result<String> {
    let names: Vec<String> = selectable_types(project)
        .iter()
        .map(|issue_type| issue_type.name.clone())
        .collect();

    let index = prompter.select("Issue type", &names)?;
    names
        .get(index)
        .cloned()
        .context("Selected issue type is out of range")
}

fn issue_fields(
    project: &Project,
    issue_type: &str,
    summary: &str,
    description: Option<&str>,
) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("project".into(), json!({ "key": project.key }));
    payload.insert("issuetype".into(), json!({ "name": issue_type }));
    payload.insert("summary".into(), json!(summary));
    if let Some(description) = description {
        payload.insert("description".into(), json!(description));
    }
    payload
}

/// Offer every configured custom field as an optional input
async fn prompt_custom_fields(
    invocation: &Invocation,
    session: &Session,
    prompter: &Prompter,
) -> Result<Map<String, Value>> {
    let columns: Vec<(String, ResolvedField)> = fields::configured_columns(session).await?;
    let output = invocation.output();

    let mut values = Map::new();
    for (name, field) in columns {
        let Some(raw) = prompter.optional_text(&name)? else {
            continue;
        };
        match field.kind.parse_input(&raw) {
            Some(value) => {
                values.insert(field.key, value);
            }
            None => output.warning(&format!("Skipping {name}: \"{raw}\" is not a number")),
        }
    }
    Ok(values)
}
