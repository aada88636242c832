//! Constants used throughout the application
//!
//! This module centralizes magic strings, API limits, and other constant values
//! to improve maintainability and consistency.

// GitHub API
/// Default GraphQL endpoint
pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";
/// Upper bound requested for every per-repository contribution field
pub const MAX_REPOSITORIES: u32 = 100;
/// Environment variable consulted when no token is given on the command line
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

// Profile store
/// Number of distinct usernames kept in the history
pub const USERNAME_HISTORY_LIMIT: usize = 10;
pub const DEFAULT_LANGUAGE: &str = "en";

// File names
pub const APP_DIR_NAME: &str = "contrib-readme";
pub const LOCAL_CONFIG_FILE: &str = "contrib-readme.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const PROFILE_FILE_NAME: &str = "profile.json";
pub const LOG_FILE_NAME: &str = "contrib-readme.log";

// Translation keys used by the document renderer
pub const KEY_TITLE: &str = "categories.profile_git";
pub const KEY_COMMIT_ONLY: &str = "categories.commit_only";
pub const KEY_PULL_REQUESTS: &str = "categories.pull_requests";
pub const KEY_OTHER_CONTRIBUTIONS: &str = "categories.other_contributions";

// Success Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const SUCCESS_README_WRITTEN: &str = "✅ README written to";

// Error Messages
pub const ERROR_NO_USERNAME: &str = "❌ No username given and none stored in the profile";
pub const ERROR_NO_TOKEN: &str = "❌ No token given, GITHUB_TOKEN unset and none stored in the profile";
