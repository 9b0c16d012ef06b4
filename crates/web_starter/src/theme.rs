//! Typography tokens the global stylesheet declares for the whole document.

/// Base font stack on `body`.
pub const BASE_FONT_FAMILY: &str = r#"system-ui, -apple-system, "Segoe UI", Roboto, sans-serif"#;

/// Base font size on `body`.
pub const BASE_FONT_SIZE: &str = "16px";

/// Base line height on `body`.
pub const BASE_LINE_HEIGHT: &str = "1.5";
