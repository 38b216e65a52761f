// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, known log levels, and unique credentials.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::WardenConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of failing fast.
pub fn validate_config(config: &WardenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        fail("server.port must be between 1 and 65535".to_string());
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "logging.level `{}` is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.auth.realm.trim().is_empty() {
        fail("auth.realm must not be empty".to_string());
    } else if config.auth.realm.chars().any(char::is_control) {
        fail("auth.realm must not contain control characters".to_string());
    }

    let mut usernames = HashSet::new();
    for (i, user) in config.auth.basic_users.iter().enumerate() {
        if user.username.trim().is_empty() {
            fail(format!("auth.basic_users[{i}].username must not be empty"));
        } else if user.username.contains(':') {
            fail(format!(
                "auth.basic_users[{i}].username `{}` must not contain `:`",
                user.username
            ));
        }
        if !usernames.insert(user.username.as_str()) {
            fail(format!(
                "duplicate username `{}` in [[auth.basic_users]]",
                user.username
            ));
        }
    }

    let mut tokens = HashSet::new();
    for (i, token) in config.auth.bearer_tokens.iter().enumerate() {
        if token.token.trim().is_empty() {
            fail(format!("auth.bearer_tokens[{i}].token must not be empty"));
        }
        if token.subject.trim().is_empty() {
            fail(format!("auth.bearer_tokens[{i}].subject must not be empty"));
        }
        // Never echo the token itself.
        if !tokens.insert(token.token.as_str()) {
            fail(format!(
                "auth.bearer_tokens[{i}] duplicates an earlier token"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
