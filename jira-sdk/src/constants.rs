// ABOUTME: Centralized constants for the Jira SDK
// ABOUTME: Contains API path prefixes, connection defaults and timeouts

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Jira REST API paths
pub mod paths {
    /// Prefix of the standard REST API, followed by the API version
    pub const REST_API_PREFIX: &str = "/rest/api/";

    /// Base of the agile (boards and sprints) REST API
    pub const AGILE_API_BASE: &str = "/rest/agile/1.0";

    /// Prefix of the web UI issue page
    pub const BROWSE_PREFIX: &str = "/browse/";
}

/// Defaults applied to the connection block of the config file
pub mod defaults {
    pub const PROTOCOL: &str = "https";

    pub const API_VERSION: &str = "2";

    pub const USER_AGENT: &str = concat!("jira-cli/", env!("CARGO_PKG_VERSION"));
}
