//! [`MountHost`] over the live browser document.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::{
    app::{SiteApp, SiteProvider},
    bootstrap::{BootstrapError, MountHost},
    config::SiteConfig,
};

/// The document the WASM module was loaded into.
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    /// Returns the current window's document.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::DocumentUnavailable`] outside a window context.
    pub fn current() -> Result<Self, BootstrapError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(|document| Self { document })
            .ok_or(BootstrapError::DocumentUnavailable)
    }
}

impl MountHost for BrowserDocument {
    type Element = HtmlElement;

    fn mount_element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn attribute(&self, element: &HtmlElement, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(
        &mut self,
        element: &HtmlElement,
        name: &str,
        value: &str,
    ) -> Result<(), BootstrapError> {
        element
            .set_attribute(name, value)
            .map_err(|err| BootstrapError::Attach {
                id: element.id(),
                reason: format!("{err:?}"),
            })
    }

    fn remove_attribute(
        &mut self,
        element: &HtmlElement,
        name: &str,
    ) -> Result<(), BootstrapError> {
        element
            .remove_attribute(name)
            .map_err(|err| BootstrapError::Attach {
                id: element.id(),
                reason: format!("{err:?}"),
            })
    }

    fn attach(&mut self, element: &HtmlElement, config: SiteConfig) -> Result<(), BootstrapError> {
        mount_to(element.clone(), move || {
            view! {
                <SiteProvider config=config>
                    <SiteApp />
                </SiteProvider>
            }
        });
        Ok(())
    }
}
