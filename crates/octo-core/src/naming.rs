//! Session names: `ui-YYYYMMDD-HHMMSS-<basename>` unless the user typed one.

use chrono::{Local, NaiveDateTime};

const UNKNOWN_BASENAME: &str = "unknown";

/// Name a new session from its working directory and the current local time.
/// A non-blank `custom_name` wins and is returned trimmed.
pub fn generate_session_name(directory: &str, custom_name: Option<&str>) -> String {
    generate_session_name_at(directory, custom_name, Local::now().naive_local())
}

/// Same as [`generate_session_name`] with an explicit timestamp
pub fn generate_session_name_at(
    directory: &str,
    custom_name: Option<&str>,
    now: NaiveDateTime,
) -> String {
    if let Some(name) = custom_name.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    format!("ui-{}-{}", now.format("%Y%m%d-%H%M%S"), basename(directory))
}

/// Last non-empty path segment, splitting on both `/` and `\`
pub fn basename(directory: &str) -> &str {
    directory
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or(UNKNOWN_BASENAME)
}
