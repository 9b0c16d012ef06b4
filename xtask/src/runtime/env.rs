//! Environment normalization helpers.

use std::env;
use std::process::Command;

/// Shared environment helper utilities.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvHelper;

impl EnvHelper {
    /// Normalize `NO_COLOR` values that trunk parses strictly as a boolean.
    pub fn normalized_no_color_value(raw: Option<&str>) -> Option<&'static str> {
        match raw {
            Some("1") => Some("true"),
            Some("0") => Some("false"),
            _ => None,
        }
    }

    /// Apply `NO_COLOR` normalization to a command if needed.
    pub fn apply_no_color_override(&self, cmd: &mut Command) {
        if let Some(value) = Self::normalized_no_color_value(env::var("NO_COLOR").ok().as_deref()) {
            cmd.env("NO_COLOR", value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_no_color_values_become_booleans() {
        assert_eq!(EnvHelper::normalized_no_color_value(Some("1")), Some("true"));
        assert_eq!(EnvHelper::normalized_no_color_value(Some("0")), Some("false"));
        assert_eq!(EnvHelper::normalized_no_color_value(Some("true")), None);
        assert_eq!(EnvHelper::normalized_no_color_value(None), None);
    }
}
