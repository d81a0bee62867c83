//! Environment variable parsing utilities
//!
//! Missing variables fall back to a default; present but unparsable values are
//! reported instead of being silently replaced.

use std::str::FromStr;

/// Parse an environment variable, falling back to `default` when it is unset.
///
/// # Example
/// ```ignore
/// let port: u16 = parse_env_or("SNS_SERVICE_PORT", 8000)?;
/// ```
pub fn parse_env_or<T: FromStr>(key: &str, default: T) -> Result<T, String> {
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

/// Parse a raw value read from `key`, naming the variable on failure.
pub fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("Failed to parse {}='{}'", key, raw))
}

/// Parse a boolean flag (`true`/`false`/`1`/`0`/`yes`/`no`), falling back to `default`.
pub fn parse_flag_or(key: &str, default: bool) -> Result<bool, String> {
    let raw = match std::env::var(key) {
        Ok(raw) => raw,
        Err(_) => return Ok(default),
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("Failed to parse {}='{}' as a boolean", key, raw)),
    }
}
