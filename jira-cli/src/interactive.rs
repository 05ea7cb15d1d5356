// ABOUTME: Interactive prompts for collecting missing command-line arguments
// ABOUTME: Wraps dialoguer for the create and init commands and refuses to prompt off a TTY

use anyhow::{Context, Result, bail};
use dialoguer::{Confirm, Input, Password, Select};
use std::io::IsTerminal;

pub struct Prompter {
    is_tty: bool,
    in_ci: bool,
}

impl Default for Prompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            is_tty: std::io::stdin().is_terminal(),
            in_ci: Self::is_in_ci(),
        }
    }

    /// Check if running in CI environment
    pub fn is_in_ci() -> bool {
        std::env::var("CI").is_ok()
            || std::env::var("GITHUB_ACTIONS").is_ok()
            || std::env::var("JENKINS_URL").is_ok()
            || std::env::var("BUILDKITE").is_ok()
    }

    /// Check if interactive prompts should be used
    pub fn should_prompt(&self) -> bool {
        self.is_tty && !self.in_ci
    }

    #[cfg(test)]
    pub fn with_overrides(is_tty: bool, in_ci: bool) -> Self {
        Self { is_tty, in_ci }
    }

    fn ensure_interactive(&self, what: &str) -> Result<()> {
        if !self.should_prompt() {
            bail!("Missing {what}: pass it as an option when not running in a terminal");
        }
        Ok(())
    }

    /// Non-empty text, with an optional pre-filled default
    pub fn text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        self.ensure_interactive(prompt)?;

        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        let value = input
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Value cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .with_context(|| format!("Failed to read {prompt}"))?;

        Ok(value.trim().to_string())
    }

    /// Text that may be left empty, in which case `None` is returned
    pub fn optional_text(&self, prompt: &str) -> Result<Option<String>> {
        self.ensure_interactive(prompt)?;

        let value: String = Input::new()
            .with_prompt(format!("{prompt} (optional)"))
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read {prompt}"))?;

        let trimmed = value.trim();
        Ok(if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        })
    }

    pub fn password(&self, prompt: &str) -> Result<String> {
        self.ensure_interactive(prompt)?;

        Password::new()
            .with_prompt(prompt)
            .interact()
            .with_context(|| format!("Failed to read {prompt}"))
    }

    /// Index of the chosen item
    pub fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        if items.is_empty() {
            bail!("Nothing to choose from for {prompt}");
        }
        self.ensure_interactive(prompt)?;

        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .with_context(|| format!("Failed to select {prompt}"))
    }

    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        self.ensure_interactive(prompt)?;

        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .with_context(|| format!("Failed to read {prompt}"))
    }
}
