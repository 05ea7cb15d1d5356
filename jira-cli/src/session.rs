// ABOUTME: Per-invocation session pairing the loaded config with a Jira client
// ABOUTME: All remote calls and config persistence of a command go through here

use anyhow::Result;
use jira_sdk::{JiraClient, JiraError, RequestOptions};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::Path;

use crate::config::{ConfigError, ConfigStore};
use crate::progress;

/// Built fresh at the top of each command action and passed by reference
pub struct Session {
    store: ConfigStore,
    client: JiraClient,
}

impl Session {
    /// Load the config at `path` and build a client from its `jira` block
    pub fn open(path: &Path) -> Result<Self> {
        let store = ConfigStore::load(path)?;
        Self::new(store)
    }

    pub fn new(store: ConfigStore) -> Result<Self> {
        let client = JiraClient::from_connection(store.credentials())?;
        Ok(Self { store, client })
    }

    pub fn config(&self) -> &ConfigStore {
        &self.store
    }

    pub fn config_mut(&mut self) -> &mut ConfigStore {
        &mut self.store
    }

    pub fn api(&self) -> &JiraClient {
        &self.client
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> std::result::Result<T, JiraError> {
        self.client.request(path, options).await
    }

    pub async fn agile_request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> std::result::Result<T, JiraError> {
        self.client.agile_request(path, options).await
    }

    /// Show a spinner labelled `label` until `operation` settles
    pub fn spin<F: Future>(&self, label: &str, operation: F) -> impl Future<Output = F::Output> {
        progress::spin(label, operation)
    }

    pub fn persist(&self) -> std::result::Result<(), ConfigError> {
        self.store.persist()
    }
}
