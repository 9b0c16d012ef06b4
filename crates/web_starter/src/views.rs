//! Closed set of page-level views and their props records.

use crate::config::{LandingContent, SiteConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Props record for [`crate::pages::landing::LandingPage`].
pub struct LandingProps {
    /// Copy to render.
    pub content: LandingContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Every page-level view the root container can render.
pub enum SiteView {
    /// The landing page shown to all visitors.
    Landing(LandingProps),
}

impl SiteView {
    /// Stable name used for the `data-view` attribute and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Landing(_) => "landing",
        }
    }
}

/// Chooses the view the root container renders.
///
/// There is exactly one page, so this always yields [`SiteView::Landing`].
pub fn root_view(config: &SiteConfig) -> SiteView {
    SiteView::Landing(LandingProps {
        content: config.landing.clone(),
    })
}
