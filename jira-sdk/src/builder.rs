// ABOUTME: Builder pattern implementation for JiraClient configuration
// ABOUTME: Parses the connection block of the config file into a typed client config

use crate::JiraClient;
use crate::constants::{defaults, timeouts};
use crate::error::JiraError;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

/// Credentials attached to every request
#[derive(Debug, Clone)]
pub enum Auth {
    Basic {
        username: String,
        password: SecretString,
    },
    Bearer(SecretString),
}

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<JiraClient, JiraError>))]
pub struct JiraClientConfig {
    /// Server root, including any context path (e.g. `https://host/jira`)
    pub base_url: Url,

    #[builder(default = None)]
    pub auth: Option<Auth>,

    #[builder(default = defaults::API_VERSION.to_string(), setter(into))]
    pub api_version: String,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = true)]
    pub strict_ssl: bool,
}

impl From<JiraClientConfig> for Result<JiraClient, JiraError> {
    fn from(config: JiraClientConfig) -> Self {
        JiraClient::from_config(config)
    }
}

/// The `jira` block of the config file.
///
/// Members the client does not know about are ignored here; the config store
/// keeps the raw block so they survive a rewrite.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default = "default_protocol")]
    pub protocol: String,
    pub host: String,
    #[serde(default, deserialize_with = "port_from_string_or_number")]
    pub port: Option<u16>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub bearer: Option<String>,
    #[serde(
        default = "default_api_version",
        deserialize_with = "string_from_string_or_number"
    )]
    pub api_version: String,
    #[serde(default = "default_strict_ssl", rename = "strictSSL")]
    pub strict_ssl: bool,
}

fn default_protocol() -> String {
    defaults::PROTOCOL.to_string()
}

fn default_api_version() -> String {
    defaults::API_VERSION.to_string()
}

fn default_strict_ssl() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

fn port_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::Number(port)) => u16::try_from(port)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("Invalid port {port}"))),
        Some(StringOrNumber::String(port)) if port.trim().is_empty() => Ok(None),
        Some(StringOrNumber::String(port)) => port
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("Invalid port '{port}'"))),
    }
}

fn string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(value) => value,
        StringOrNumber::Number(value) => value.to_string(),
    })
}

impl Connection {
    pub fn from_value(value: &serde_json::Value) -> Result<Self, JiraError> {
        Connection::deserialize(value)
            .map_err(|e| JiraError::Configuration(format!("Invalid \"jira\" block: {e}")))
    }

    pub fn base_url(&self) -> Result<Url, JiraError> {
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(JiraError::Configuration("Missing host".to_string()));
        }

        let mut url = Url::parse(&format!("{}://{}", self.protocol, host))?;
        if self.port.is_some() {
            url.set_port(self.port)
                .map_err(|_| JiraError::Configuration("Invalid port".to_string()))?;
        }
        if let Some(base) = self.base.as_deref() {
            let base = base.trim_matches('/');
            if !base.is_empty() {
                url.set_path(&format!("/{base}"));
            }
        }

        Ok(url)
    }

    pub fn auth(&self) -> Option<Auth> {
        if let Some(token) = &self.bearer {
            return Some(Auth::Bearer(SecretString::new(
                token.clone().into_boxed_str(),
            )));
        }

        self.username.as_ref().map(|username| Auth::Basic {
            username: username.clone(),
            password: SecretString::new(
                self.password.clone().unwrap_or_default().into_boxed_str(),
            ),
        })
    }

    pub fn into_config(self) -> Result<JiraClientConfig, JiraError> {
        Ok(JiraClientConfig {
            base_url: self.base_url()?,
            auth: self.auth(),
            api_version: self.api_version.clone(),
            timeout: timeouts::HTTP_REQUEST_TIMEOUT,
            strict_ssl: self.strict_ssl,
        })
    }
}

impl JiraClient {
    pub fn builder() -> JiraClientConfigBuilder<((), (), (), (), ())> {
        JiraClientConfig::builder()
    }

    /// Build a client from the raw `jira` block of the config file.
    /// No network I/O happens here.
    pub fn from_connection(value: &serde_json::Value) -> Result<JiraClient, JiraError> {
        let config = Connection::from_value(value)?.into_config()?;
        JiraClient::from_config(config)
    }
}
