//! Constants used throughout the application
//!
//! This module centralizes magic strings, user-visible messages, and other
//! constant values to improve maintainability and consistency.

// REST API
/// Path prefix appended to the server URL for every API call
pub const API_PREFIX: &str = "/api/v1/";
/// Default Taiga server
pub const DEFAULT_SERVER_URL: &str = "https://api.taiga.io";
/// Number of items the Taiga API returns per page
pub const PAGE_SIZE: usize = 20;
/// Upper bound accepted for a configured page size
pub const PAGE_SIZE_MAX: usize = 100;
/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// Upper bound accepted for a configured HTTP timeout
pub const TIMEOUT_SECONDS_MAX: u64 = 300;

// Error Messages
pub const ERROR_COMMON: &str = "❌ Something went wrong";
pub const ERROR_NETWORK: &str = "❌ Network error, check your connection";
pub const ERROR_UNAUTHORIZED: &str = "❌ Session expired, please log in again";
pub const ERROR_PERMISSION: &str = "❌ You don't have permission for this action";
pub const ERROR_NOT_FOUND: &str = "❌ Requested item was not found";
pub const ERROR_LOGIN_FAILED: &str = "❌ Login failed, check server and credentials";
pub const ERROR_NO_PROJECT: &str = "❌ No project selected";

// Log Messages
pub const LOG_LOADING_PAGE: &str = "📄 Loading page";
pub const LOG_PAGES_EXHAUSTED: &str = "✅ All pages loaded";
pub const LOG_PROJECT_CHANGED: &str = "🔄 Current project changed";
pub const LOG_SESSION_RESET: &str = "🔄 Session reset";

// Generated files
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const APP_DIR_NAME: &str = "taigalist";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE_NAME: &str = "taigalist.toml";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const LOG_FILE_NAME: &str = "taigalist.log";

/// Number of in-memory log lines kept for the debug view
pub const LOG_BUFFER_CAPACITY: usize = 500;
