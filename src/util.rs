use anyhow::{bail, Result};
use reqwest::Url;

/// Zero-width space kept in empty edit surfaces so they stay focusable.
pub const FOCUS_PLACEHOLDER: char = '\u{200B}';
const NON_BREAKING_SPACE: char = '\u{00A0}';

/// Parse "true"/"false"/"1"/"0" from an owned String.
pub fn parse_bool_flag(s: String) -> Option<bool> {
    parse_bool_str(&s)
}

/// Parse "true"/"false"/"1"/"0" from a &str.
pub fn parse_bool_str(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Strips the focus placeholder and turns non-breaking spaces into plain ones.
/// Applied to every piece of user-entered text before the session reads it.
pub fn sanitize_command(text: &str) -> String {
    text.chars()
        .filter(|ch| *ch != FOCUS_PLACEHOLDER)
        .map(|ch| if ch == NON_BREAKING_SPACE { ' ' } else { ch })
        .collect()
}

/// Normalizes an origin to `scheme://host[:port]` with no trailing slash.
pub fn normalize_origin(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = match Url::parse(trimmed) {
        Ok(parsed) => parsed,
        Err(error) => bail!("Invalid origin '{trimmed}': {error}"),
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("Invalid origin '{trimmed}': expected http:// or https://");
    }
    if parsed.host_str().is_none() {
        bail!("Invalid origin '{trimmed}': missing host");
    }
    if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
        bail!("Invalid origin '{trimmed}': must not carry a path, query or fragment");
    }

    Ok(trimmed.to_string())
}
