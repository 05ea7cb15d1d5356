// ABOUTME: Root command-line parser for the jira binary
// ABOUTME: Global options live here; command groups register themselves through CommandModule

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::cli_output::CliOutput;
use crate::command::{self, CommandModule, Invocation};
use crate::commands;

/// Root parser with the global options and every module's subcommands
pub fn build_parser(modules: &[Box<dyn CommandModule>]) -> Command {
    let root = Command::new("jira")
        .about("A CLI for Jira")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Config file [default: ~/.jira.json]"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable verbose output for debugging"),
        )
        .arg(
            Arg::new("no_color")
                .long("no-color")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Disable colored output"),
        );

    modules
        .iter()
        .fold(root, |parser, module| module.add_options(parser))
}

pub fn verbose(matches: &ArgMatches) -> bool {
    command::leaf(matches).get_flag("verbose")
}

/// Parse `args` and run the chosen action. Parse errors (including
/// `--help` and `--version`) are returned as `clap::Error`.
pub async fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let modules = commands::all();
    let matches = build_parser(&modules).try_get_matches_from(args)?;
    command::dispatch(&modules, &matches).await
}

/// [`run_from`] with diagnostics written to `output`
pub async fn run_with_output<I, T>(args: I, output: CliOutput) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let modules = commands::all();
    let matches = build_parser(&modules).try_get_matches_from(args)?;
    let invocation = Invocation::from_matches(&matches).with_output(output);
    command::dispatch_with(&modules, &invocation, &matches).await
}
