// ABOUTME: The seam every top-level command group plugs into
// ABOUTME: Holds the per-process invocation settings and routes action failures to the error handler

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use clap::{ArgMatches, Command};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::cli_output::CliOutput;
use crate::config;
use crate::error_handler;
use crate::output::TableFormatter;
use crate::session::Session;

/// A top-level command group such as `field` or `preset`.
///
/// `add_options` registers the group and its leaf subcommands on the root
/// parser; `run` receives the group's own matches.
#[async_trait(?Send)]
pub trait CommandModule {
    fn name(&self) -> &'static str;

    fn add_options(&self, parser: Command) -> Command;

    async fn run(&self, invocation: &Invocation, matches: &ArgMatches) -> Result<()>;
}

/// Settings shared by every action of one process
#[derive(Debug, Clone)]
pub struct Invocation {
    config_path: PathBuf,
    use_color: bool,
    output: CliOutput,
}

/// Deepest subcommand matches; global arguments are visible there
pub fn leaf(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        current = sub;
    }
    current
}

impl Invocation {
    pub fn new(config_path: impl Into<PathBuf>, use_color: bool) -> Self {
        Self {
            config_path: config_path.into(),
            use_color,
            output: CliOutput::with_color(use_color),
        }
    }

    /// Route diagnostics somewhere other than stderr
    pub fn with_output(mut self, output: CliOutput) -> Self {
        self.output = output;
        self
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let leaf = leaf(matches);
        let config_path = leaf
            .get_one::<PathBuf>("config")
            .cloned()
            .unwrap_or_else(config::default_path);

        let use_color = !leaf.get_flag("no_color")
            && std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").unwrap_or_default() != "dumb"
            && std::io::stdout().is_terminal();

        Self::new(config_path, use_color)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Fresh session for one action
    pub fn open_session(&self) -> Result<Session> {
        Session::open(&self.config_path)
    }

    pub fn output(&self) -> CliOutput {
        self.output.clone()
    }

    pub fn formatter(&self) -> TableFormatter {
        TableFormatter::new(self.use_color)
    }
}

pub fn required_arg<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("Missing argument <{id}>"))
}

/// Run the module owning the chosen subcommand.
///
/// Action failures are reported here and do not propagate: the process
/// still exits successfully.
pub async fn dispatch(modules: &[Box<dyn CommandModule>], matches: &ArgMatches) -> Result<()> {
    let invocation = Invocation::from_matches(matches);
    dispatch_with(modules, &invocation, matches).await
}

/// [`dispatch`] with caller-built invocation settings
pub async fn dispatch_with(
    modules: &[Box<dyn CommandModule>],
    invocation: &Invocation,
    matches: &ArgMatches,
) -> Result<()> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("No command given"))?;
    let module = modules
        .iter()
        .find(|module| module.name() == name)
        .ok_or_else(|| anyhow!("Unknown command: {name}"))?;

    log::debug!(
        "Running {} with config {}",
        name,
        invocation.config_path().display()
    );

    if let Err(failure) = module.run(invocation, sub).await {
        error_handler::show_error(&invocation.output(), &failure);
    }
    Ok(())
}
