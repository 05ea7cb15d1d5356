// ABOUTME: Configuration file loading, mutation and persistence for the Jira CLI
// ABOUTME: Holds credentials, custom fields, presets and the latest project in one JSON file

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::files::DEFAULT_CONFIG_FILE;

/// `~/.jira.json`, or `.jira.json` in the working directory when no home is known
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(DEFAULT_CONFIG_FILE)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {} does not exist.", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write config file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config")]
    Serialize(#[from] serde_json::Error),
}

/// Contents of the config file.
///
/// Top-level members this struct does not model are kept in `extra` and
/// written back on persist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Connection block handed verbatim to the Jira client
    #[serde(default)]
    pub jira: Value,
    /// Custom field names, in display order
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub presets: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_project: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let mut config: Config = serde_json::from_str(content)?;
        config.dedup_fields();
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        Ok(content)
    }

    fn dedup_fields(&mut self) {
        let mut seen = Vec::with_capacity(self.fields.len());
        for name in self.fields.drain(..) {
            if seen.contains(&name) {
                log::warn!("Ignoring duplicate custom field \"{}\"", name);
            } else {
                seen.push(name);
            }
        }
        self.fields = seen;
    }
}

/// A config file bound to the path it was loaded from
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    /// Bind an in-memory config to a path without touching the disk
    pub fn new<P: Into<PathBuf>>(path: P, config: Config) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Loaded config from {}", path.display());
        Ok(Self::new(path, config))
    }

    /// Rewrite the whole file. The new content goes to a sibling temp file
    /// first so a failed write never leaves a truncated config behind.
    ///
    /// A symlinked path is resolved so the link's target is rewritten and the
    /// link survives. The file keeps its permissions; a new file is created
    /// readable by its owner only.
    pub fn persist(&self) -> Result<(), ConfigError> {
        let content = self.config.to_json()?;
        let write_error = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let target = match std::fs::canonicalize(&self.path) {
            Ok(resolved) => resolved,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => self.path.clone(),
            Err(err) => return Err(write_error(err)),
        };
        let existing = std::fs::metadata(&target)
            .ok()
            .map(|metadata| metadata.permissions());

        let file_name = target
            .file_name()
            .ok_or_else(|| {
                write_error(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "config path has no file name",
                ))
            })?
            .to_string_lossy()
            .into_owned();
        let temp_path = target.with_file_name(format!(".{file_name}.tmp"));

        let replaced = write_private(&temp_path, &content)
            .and_then(|()| match existing {
                Some(permissions) => std::fs::set_permissions(&temp_path, permissions),
                None => restrict_to_owner(&temp_path),
            })
            .and_then(|()| std::fs::rename(&temp_path, &target));
        if let Err(source) = replaced {
            let _ = std::fs::remove_file(&temp_path);
            return Err(write_error(source));
        }

        log::debug!("Persisted config to {}", target.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> &Value {
        &self.config.jira
    }

    pub fn set_credentials(&mut self, credentials: Value) {
        self.config.jira = credentials;
    }

    pub fn fields(&self) -> &[String] {
        &self.config.fields
    }

    pub fn set_fields(&mut self, fields: Vec<String>) {
        self.config.fields = fields;
        self.config.dedup_fields();
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.config.fields.iter().any(|field| field == name)
    }

    /// Append a field name unless it is already configured.
    /// Returns whether the list changed.
    pub fn add_field(&mut self, name: &str) -> bool {
        if self.has_field(name) {
            return false;
        }
        self.config.fields.push(name.to_string());
        true
    }

    /// Remove a field name if present. Returns whether the list changed.
    pub fn remove_field(&mut self, name: &str) -> bool {
        let before = self.config.fields.len();
        self.config.fields.retain(|field| field != name);
        self.config.fields.len() != before
    }

    pub fn presets(&self) -> &BTreeMap<String, String> {
        &self.config.presets
    }

    pub fn preset(&self, name: &str) -> Option<&str> {
        self.config.presets.get(name).map(String::as_str)
    }

    /// Insert a preset unless the name is taken. Returns whether it was added.
    pub fn add_preset(&mut self, name: &str, query: &str) -> bool {
        if self.config.presets.contains_key(name) {
            return false;
        }
        self.config
            .presets
            .insert(name.to_string(), query.to_string());
        true
    }

    pub fn remove_preset(&mut self, name: &str) -> bool {
        self.config.presets.remove(name).is_some()
    }

    pub fn latest_project(&self) -> Option<&str> {
        self.config.latest_project.as_deref()
    }

    pub fn set_latest_project(&mut self, project: Option<String>) {
        self.config.latest_project = project;
    }
}

/// Create or truncate `path`, never readable by others while it is written
fn write_private(path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
