// ABOUTME: `jira init` writes a fresh config file with connection details and verifies them
// ABOUTME: The only command that runs without an existing config file

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches, Command};
use jira_sdk::constants::defaults;
use serde_json::{Map, Value, json};

use crate::command::{CommandModule, Invocation};
use crate::config::{Config, ConfigStore};
use crate::constants::spinners;
use crate::interactive::Prompter;
use crate::session::Session;

pub struct InitCommand;

/// Host as typed by the user, split into the connection members
#[derive(Debug, PartialEq)]
struct HostParts {
    protocol: String,
    host: String,
    port: Option<u16>,
    base: Option<String>,
}

fn split_host(raw: &str) -> HostParts {
    let raw = raw.trim();
    let (protocol, rest) = match raw.split_once("://") {
        Some((protocol, rest)) => (protocol.to_ascii_lowercase(), rest),
        None => (defaults::PROTOCOL.to_string(), raw),
    };

    let (authority, base) = match rest.split_once('/') {
        Some((authority, path)) => {
            let path = path.trim_end_matches('/');
            (authority, (!path.is_empty()).then(|| format!("/{path}")))
        }
        None => (rest, None),
    };

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => match port.parse::<u16>() {
            Ok(port) => (host, Some(port)),
            Err(_) => (authority, None),
        },
        None => (authority, None),
    };

    HostParts {
        protocol,
        host: host.to_string(),
        port,
        base,
    }
}

fn connection(parts: HostParts, username: &str, token: &str) -> Value {
    let mut jira = Map::new();
    jira.insert("protocol".into(), json!(parts.protocol));
    jira.insert("host".into(), json!(parts.host));
    if let Some(port) = parts.port {
        jira.insert("port".into(), json!(port));
    }
    if let Some(base) = parts.base {
        jira.insert("base".into(), json!(base));
    }
    jira.insert("username".into(), json!(username));
    jira.insert("password".into(), json!(token));
    jira.insert("apiVersion".into(), json!(defaults::API_VERSION));
    jira.insert("strictSSL".into(), json!(true));
    Value::Object(jira)
}

#[async_trait(?Send)]
impl CommandModule for InitCommand {
    fn name(&self) -> &'static str {
        "init"
    }

    fn add_options(&self, parser: Command) -> Command {
        parser.subcommand(
            Command::new("init")
                .about("Create the config file")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .help("Jira host (e.g., example.atlassian.net)"),
                )
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .help("Account email or user name"),
                )
                .arg(Arg::new("token").long("token").help("API token or password"))
                .arg(
                    Arg::new("force")
                        .long("force")
                        .short('f')
                        .action(ArgAction::SetTrue)
                        .help("Overwrite an existing config file without asking"),
                ),
        )
    }

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()> {
        let option = |id: &str| matches.get_one::<String>(id).cloned();
        let path = invocation.config_path();
        let output = invocation.output();
        let prompter = Prompter::new();

        if path.exists() && !matches.get_flag("force") {
            let question = format!("{} already exists. Overwrite it?", path.display());
            if !prompter.confirm(&question, false)? {
                output.info("Nothing was changed");
                return Ok(());
            }
        }

        let host = match option("host") {
            Some(host) => host,
            None => prompter.text("Jira host (e.g., example.atlassian.net)", None)?,
        };
        let username = match option("username") {
            Some(username) => username,
            None => prompter.text("Username", None)?,
        };
        let token = match option("token") {
            Some(token) => token,
            None => prompter.password("API token")?,
        };

        let store = ConfigStore::new(
            path,
            Config {
                jira: connection(split_host(&host), &username, &token),
                ..Default::default()
            },
        );
        store.persist()?;
        output.success(&format!("Config written to {}", path.display()));

        let session = Session::new(store)?;
        let user = session
            .spin(spinners::USER, session.api().myself())
            .await
            .context("The config file was written but the credentials could not be verified")?;

        output.success(&format!("Logged in as {}", user.display_name));
        Ok(())
    }
}
