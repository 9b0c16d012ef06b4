//! Leptos client-side starter site.
//!
//! The crate mounts a single root container into the entry document's `#root` element. The root
//! container renders the landing page; global typography comes from `style/main.css`.

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod entry;
#[cfg(not(target_arch = "wasm32"))]
pub mod headless;
pub mod pages;
pub mod stylesheet;
pub mod theme;
pub mod views;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
mod browser;

pub use app::{use_site_context, SiteApp, SiteContext, SiteProvider, SiteRoot};
pub use bootstrap::{bootstrap, BootstrapError, MountHost, MountOutcome};
#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub use browser::BrowserDocument;
pub use config::{LandingContent, LandingSection, SiteConfig, SiteConfigUpdate};
#[cfg(not(target_arch = "wasm32"))]
pub use headless::{HeadlessDocument, RenderedTree};
pub use views::{root_view, LandingProps, SiteView};

/// Loads the bundled configuration and mounts the site into the browser document.
///
/// A failure is logged and rethrown as a JS exception; the page stays blank.
#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();

    let result = SiteConfig::bundled()
        .map_err(BootstrapError::from)
        .and_then(|config| {
            let mut document = BrowserDocument::current()?;
            bootstrap(&mut document, config)
        });

    if let Err(err) = result {
        leptos::logging::error!("site bootstrap failed: {err}");
        wasm_bindgen::throw_str(&err.to_string());
    }
}
