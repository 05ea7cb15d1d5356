// ABOUTME: Library exports for the Jira CLI modules for testing and external use
// ABOUTME: Makes the config store, session and command modules available to integration tests

pub mod cli;
pub mod cli_output;
pub mod command;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error_handler;
pub mod fields;
pub mod interactive;
pub mod output;
pub mod progress;
pub mod session;
pub mod types;
