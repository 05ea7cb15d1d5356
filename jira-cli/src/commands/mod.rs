// ABOUTME: Registry of the top-level command groups of the jira binary
// ABOUTME: Each group is an independent CommandModule; order only affects help output

mod create;
mod field;
mod init;
mod issue;
mod preset;
mod project;
mod query;
mod run;
mod set;
mod sprint;

pub use create::CreateCommand;
pub use field::FieldCommand;
pub use init::InitCommand;
pub use issue::IssueCommand;
pub use preset::PresetCommand;
pub use project::ProjectCommand;
pub use query::QueryCommand;
pub use run::RunCommand;
pub use set::SetCommand;
pub use sprint::SprintCommand;

use crate::command::CommandModule;

/// Every command group, built once at startup
pub fn all() -> Vec<Box<dyn CommandModule>> {
    vec![
        Box::new(CreateCommand),
        Box::new(FieldCommand),
        Box::new(InitCommand),
        Box::new(IssueCommand),
        Box::new(PresetCommand),
        Box::new(ProjectCommand),
        Box::new(QueryCommand),
        Box::new(RunCommand),
        Box::new(SetCommand),
        Box::new(SprintCommand),
    ]
}
