//! Bundled site configuration and its update reducer.
//!
//! `site.toml` is validated and embedded at build time; [`SiteConfig::bundled`] parses the
//! embedded copy once at bootstrap. After mount the configuration only changes through
//! [`reduce_site_config`], which the [`crate::app::SiteProvider`] context routes updates into.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/site_config_generated.rs"));
}

/// Element id the entry document reserves for the UI tree.
pub const DEFAULT_MOUNT_ID: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One titled block of landing page copy.
pub struct LandingSection {
    /// Section heading.
    pub title: String,
    /// Section body text.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Static copy rendered by the landing page.
pub struct LandingContent {
    /// Page heading. Rendered once as the page's only `h1`.
    pub heading: String,
    /// Lead paragraph under the heading.
    pub lead: String,
    /// Ordered content sections.
    #[serde(default)]
    pub sections: Vec<LandingSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Site-wide configuration shared with every view through the site context.
pub struct SiteConfig {
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Id of the mount element in the entry document.
    #[serde(default = "default_mount_id")]
    pub mount_id: String,
    /// Landing page copy.
    pub landing: LandingContent,
}

fn default_mount_id() -> String {
    DEFAULT_MOUNT_ID.to_string()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised while loading or updating [`SiteConfig`].
pub enum ConfigError {
    /// The embedded JSON could not be parsed.
    #[error("bundled site config is malformed: {0}")]
    Malformed(String),
    /// A required text field is blank.
    #[error("site config field `{0}` must not be empty")]
    EmptyField(&'static str),
}

impl SiteConfig {
    /// Parses the configuration embedded from `site.toml` at build time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the embedded JSON is malformed or fails validation.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(generated::SITE_CONFIG_JSON)
    }

    /// Parses and validates a configuration from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `raw` is malformed or fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Malformed(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every required field carries text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("title", &self.title)?;
        require("mount_id", &self.mount_id)?;
        require("landing.heading", &self.landing.heading)?;
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::EmptyField(field))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Updates accepted by the site context after mount.
pub enum SiteConfigUpdate {
    /// Replace the document title.
    SetTitle(String),
    /// Replace the meta description.
    SetDescription(String),
    /// Replace the landing page copy.
    SetLanding(LandingContent),
}

/// Applies a [`SiteConfigUpdate`] to `config`.
///
/// The mount id is fixed for the lifetime of the page and is not updatable.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyField`] when the update would blank a required field. `config` is
/// left untouched in that case.
pub fn reduce_site_config(
    config: &mut SiteConfig,
    update: SiteConfigUpdate,
) -> Result<(), ConfigError> {
    match update {
        SiteConfigUpdate::SetTitle(title) => {
            require("title", &title)?;
            config.title = title;
        }
        SiteConfigUpdate::SetDescription(description) => {
            config.description = description;
        }
        SiteConfigUpdate::SetLanding(landing) => {
            require("landing.heading", &landing.heading)?;
            config.landing = landing;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_config() -> SiteConfig {
    SiteConfig {
        title: "Sample".into(),
        description: "Sample site".into(),
        mount_id: DEFAULT_MOUNT_ID.into(),
        landing: LandingContent {
            heading: "Hello there".into(),
            lead: "A short lead.".into(),
            sections: vec![LandingSection {
                title: "First".into(),
                body: "First body.".into(),
            }],
        },
    }
}
