// ABOUTME: Centralized constants for the Jira CLI application
// ABOUTME: Contains file names, limits, requested issue fields and user-facing messages

/// Configuration file defaults
pub mod files {
    /// Config file name, resolved against the home directory
    pub const DEFAULT_CONFIG_FILE: &str = ".jira.json";
}

/// Default limits for issue queries
pub mod limits {
    pub const DEFAULT_MAX_RESULTS: u32 = 50;
}

/// Timeout configurations for various operations
pub mod timeouts {
    /// Progress spinner tick interval for smooth animation
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}

/// Schema types a custom field may have to be shown or edited
pub mod schema {
    pub const NUMBER: &str = "number";
    pub const STRING: &str = "string";
}

/// Status category keys reported by Jira
pub mod status_category {
    pub const NEW: &str = "new";
    pub const IN_PROGRESS: &str = "indeterminate";
    pub const DONE: &str = "done";
}

/// Issue fields requested from the API
pub mod issue_fields {
    pub const LIST: &[&str] = &["summary", "status", "issuetype", "assignee"];

    pub const DETAIL: &[&str] = &[
        "summary",
        "status",
        "issuetype",
        "priority",
        "assignee",
        "reporter",
        "created",
        "updated",
        "description",
    ];
}

pub mod sprints {
    /// Sprint states listed by `sprint list`
    pub const LISTED_STATES: &str = "active,future";

    pub const SCRUM_BOARD: &str = "scrum";
}

/// Messages shared by several commands
pub mod messages {
    pub const CONFIG_UPDATED: &str = "Config file successfully updated";
    pub const UNKNOWN_FIELD: &str = "Unknown field.";
    pub const UNSUPPORTED_FIELD: &str = "Unsupported field.";
    pub const UNKNOWN_PRESET: &str = "Unknown preset.";
    pub const PRESET_EXISTS: &str = "This preset already exists";
    pub const NO_ISSUES: &str = "No issues found.";
}

/// Spinner labels
pub mod spinners {
    pub const FIELDS: &str = "Retrieving the fields...";
    pub const QUERY: &str = "Running the query...";
    pub const ISSUE: &str = "Retrieving the issue...";
    pub const PROJECTS: &str = "Retrieving the projects...";
    pub const SPRINTS: &str = "Retrieving the sprints...";
    pub const UPDATE: &str = "Updating the issue...";
    pub const CREATE: &str = "Creating the issue...";
    pub const USER: &str = "Checking the credentials...";
}
