//! Task ID generation
//!
//! IDs use the format: `{6-char-hex}-{type}-{slug}`
//! Example: `9f41c2-task-clean-room`
//!
//! The hex prefix comes from the random tail of a UUIDv7, not its leading
//! timestamp bits: two same-title tasks created in the same millisecond
//! must still get distinct ids.

/// Generate an ID from type and title
pub fn generate_id(id_type: &str, title: &str) -> String {
    let hex = uuid::Uuid::now_v7().simple().to_string();
    // Last 6 of the 32 hex chars sit entirely in the uuid's random section
    let hex_suffix = &hex[hex.len() - 6..];
    let slug = slugify(title);
    format!("{}-{}-{}", hex_suffix, id_type, slug)
}

/// Slugify a title for use in IDs
fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        // Strip apostrophes entirely, replace other non-alphanumeric with hyphens
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}
