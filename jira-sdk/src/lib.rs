// ABOUTME: Jira SDK library providing an async client for the Jira REST API
// ABOUTME: Builds standard and agile API URLs and decodes JSON responses

use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

mod api;
pub mod builder;
pub mod constants;
pub mod error;
pub mod types;

#[cfg(test)]
mod test_helpers;

pub use builder::{Auth, Connection, JiraClientConfig};
pub use error::JiraError;
pub use types::*;

pub type Result<T> = std::result::Result<T, JiraError>;

/// Method, body and query string of a single API call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            query: Vec::new(),
        }
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            query: Vec::new(),
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            query: Vec::new(),
        }
    }

    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((name.to_string(), value.into()));
        self
    }
}

pub struct JiraClient {
    client: reqwest::Client,
    auth: Option<Auth>,
    web_base: Url,
    api_base: Url,
    agile_base: Url,
}

fn join_base(root: &Url, suffix: &str) -> Url {
    let mut url = root.clone();
    let path = format!("{}{}", root.path().trim_end_matches('/'), suffix);
    url.set_path(&path);
    url
}

impl JiraClient {
    pub fn from_config(config: JiraClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(constants::defaults::USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.strict_ssl)
            .build()
            .map_err(|e| JiraError::Configuration(e.to_string()))?;

        let api_base = join_base(
            &config.base_url,
            &format!(
                "{}{}",
                constants::paths::REST_API_PREFIX,
                config.api_version
            ),
        );
        let agile_base = join_base(&config.base_url, constants::paths::AGILE_API_BASE);

        Ok(Self {
            client,
            auth: config.auth,
            web_base: config.base_url,
            api_base,
            agile_base,
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn agile_base(&self) -> &Url {
        &self.agile_base
    }

    pub fn host(&self) -> &str {
        self.web_base.host_str().unwrap_or_default()
    }

    /// Web page of an issue, e.g. `https://example.atlassian.net/browse/ENG-1`
    pub fn browse_url(&self, key: &str) -> String {
        join_base(
            &self.web_base,
            &format!("{}{}", constants::paths::BROWSE_PREFIX, key),
        )
        .to_string()
    }

    pub fn make_uri(&self, path: &str, query: &[(String, String)]) -> Url {
        Self::uri_on(&self.api_base, path, query)
    }

    pub fn make_agile_uri(&self, path: &str, query: &[(String, String)]) -> Url {
        Self::uri_on(&self.agile_base, path, query)
    }

    fn uri_on(base: &Url, path: &str, query: &[(String, String)]) -> Url {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let mut url = join_base(base, &path);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        url
    }

    /// Call the standard REST API (`/rest/api/{version}`)
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.make_uri(path, &options.query);
        self.do_request(url, options).await
    }

    /// Call the agile REST API (`/rest/agile/1.0`)
    pub async fn agile_request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.make_agile_uri(path, &options.query);
        self.do_request(url, options).await
    }

    async fn do_request<T: DeserializeOwned>(
        &self,
        url: Url,
        options: RequestOptions,
    ) -> Result<T> {
        log::debug!("{} {}", options.method, url);

        let mut request = self.client.request(options.method, url);
        request = match &self.auth {
            Some(Auth::Basic { username, password }) => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
            Some(Auth::Bearer(token)) => request.bearer_auth(token.expose_secret()),
            None => request,
        };
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        log::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(JiraError::from_status(status.as_u16(), &text));
        }

        // 204 and friends carry no body
        if text.trim().is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
