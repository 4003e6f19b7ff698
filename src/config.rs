/*
 * Responsibility
 * - Authorizer configuration (bypass routes, session storage key)
 * - Validation of configured values (reject patterns that match everything)
 */
use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for [`RequestAuthorizer`](crate::RequestAuthorizer).
///
/// Bypass matching is plain substring matching against the full request URL,
/// not path-segment matching: a pattern like `/settings` also bypasses
/// `/api/user-settings/update`. Callers who need tighter matching should
/// configure more specific patterns.
#[derive(Debug, Clone)]
pub struct AuthorizerConfig {
    /// URL substrings for which authorization is skipped entirely.
    pub bypass_patterns: Vec<String>,
    /// Session storage key the bearer token is read from.
    pub token_key: String,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            bypass_patterns: vec!["/auth/".to_string(), "/settings".to_string()],
            token_key: "token".to_string(),
        }
    }
}

impl AuthorizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_key.is_empty() {
            return Err(ConfigError::Invalid("token_key"));
        }
        // An empty pattern is a substring of every URL and would bypass everything.
        if self.bypass_patterns.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Invalid("bypass_patterns"));
        }
        Ok(())
    }
}
