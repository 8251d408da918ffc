pub mod setting_keys {
    /// When truthy, every username is accepted.
    pub const DISABLE_USERNAME_VALIDATION: &str = "disable_username_validation";
}

/// Interprets a stored setting value as a boolean flag.
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
