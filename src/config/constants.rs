//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Feed
// =============================================================================

/// Number of tweets returned per feed or profile page
pub const TWEET_PAGE_SIZE: u64 = 30;

// =============================================================================
// Authentication & Security
// =============================================================================

/// Minimum plaintext password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Length of a generated session token
pub const SESSION_TOKEN_LENGTH: usize = 64;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "sessid";

/// Absolute lifetime of the login cookie, in days. Independent from the
/// session store's own sliding inactivity TTL.
pub const LOGIN_COOKIE_DAYS: i64 = 14;

/// Default sliding session TTL in hours (inactivity expiry)
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3333;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://warbler.db?mode=rwc";
