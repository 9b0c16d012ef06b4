//! [`MountHost`] over an in-memory document, for native builds.
//!
//! Attaching renders the real component tree to HTML with Leptos and reads the markup back with
//! the entry scanner, so assertions about headings and text run against what the components
//! actually emit.

use std::collections::BTreeMap;

use leptos::*;

use crate::{
    app::{SiteProvider, SiteRoot},
    bootstrap::{BootstrapError, MountHost},
    config::SiteConfig,
    entry::{EntryDocument, EntryError},
    stylesheet::GlobalStylesheet,
    views::{root_view, SiteView},
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the headless host recorded for an attached tree.
pub struct RenderedTree {
    /// Document title set by the root container.
    pub title: String,
    /// View chosen by the root container.
    pub view: SiteView,
    /// Markup rendered under the mount element.
    pub html: String,
    /// Global stylesheet loaded alongside the tree.
    pub stylesheet: GlobalStylesheet,
    markup: EntryDocument,
}

impl RenderedTree {
    /// Text content in document order.
    pub fn text(&self) -> &[String] {
        self.markup.text()
    }

    /// Number of rendered elements named `name`.
    pub fn element_count(&self, name: &str) -> usize {
        self.markup.count_elements(name)
    }

    /// Value of `attribute` on the first rendered `name` element.
    pub fn attribute_of(&self, name: &str, attribute: &str) -> Option<&str> {
        self.markup
            .tags()
            .iter()
            .find(|tag| tag.name == name)
            .and_then(|tag| tag.attribute(attribute))
    }
}

/// Renders the body of the root container for `config` to HTML.
///
/// Head metadata is owned by the browser document and is not part of the output.
pub fn render_site_markup(config: SiteConfig) -> String {
    leptos::ssr::render_to_string(move || {
        view! {
            <SiteProvider config=config>
                <SiteRoot />
            </SiteProvider>
        }
    })
    .to_string()
}

#[derive(Debug, Clone)]
struct HeadlessElement {
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    rendered: Option<RenderedTree>,
}

#[derive(Debug, Clone)]
/// In-memory document built from entry markup.
pub struct HeadlessDocument {
    elements: Vec<HeadlessElement>,
    attach_count: usize,
}

impl HeadlessDocument {
    /// Builds a document from entry markup.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::Malformed`] when the markup cannot be scanned.
    pub fn from_entry_html(html: &str) -> Result<Self, EntryError> {
        let entry = EntryDocument::parse(html)?;
        let elements = entry
            .tags()
            .iter()
            .map(|tag| HeadlessElement {
                id: tag.id().map(str::to_string),
                attributes: tag
                    .attributes
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone().unwrap_or_default()))
                    .collect(),
                rendered: None,
            })
            .collect();
        Ok(Self {
            elements,
            attach_count: 0,
        })
    }

    /// Tree rendered into the element with `id`, if any.
    pub fn rendered(&self, id: &str) -> Option<&RenderedTree> {
        self.elements
            .iter()
            .find(|element| element.id.as_deref() == Some(id))
            .and_then(|element| element.rendered.as_ref())
    }

    /// Text rendered anywhere in the document, in element order.
    pub fn text_content(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|element| element.rendered.as_ref())
            .flat_map(|tree| tree.text().iter().map(String::as_str))
            .collect()
    }

    /// Number of successful attach operations performed on this document.
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    /// Base font family in effect for the document once a tree has loaded the stylesheet.
    pub fn computed_base_font(&self) -> Option<&str> {
        self.elements
            .iter()
            .filter_map(|element| element.rendered.as_ref())
            .find_map(|tree| tree.stylesheet.document_font_family())
    }

    fn element_mut(&mut self, element: usize) -> Result<&mut HeadlessElement, BootstrapError> {
        self.elements
            .get_mut(element)
            .ok_or(BootstrapError::DocumentUnavailable)
    }
}

impl MountHost for HeadlessDocument {
    type Element = usize;

    fn mount_element(&self, id: &str) -> Option<usize> {
        self.elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
    }

    fn attribute(&self, element: &usize, name: &str) -> Option<String> {
        self.elements
            .get(*element)
            .and_then(|element| element.attributes.get(name).cloned())
    }

    fn set_attribute(
        &mut self,
        element: &usize,
        name: &str,
        value: &str,
    ) -> Result<(), BootstrapError> {
        self.element_mut(*element)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, element: &usize, name: &str) -> Result<(), BootstrapError> {
        self.element_mut(*element)?.attributes.remove(name);
        Ok(())
    }

    fn attach(&mut self, element: &usize, config: SiteConfig) -> Result<(), BootstrapError> {
        let id = config.mount_id.clone();
        let attach_error = |reason: String| BootstrapError::Attach {
            id: id.clone(),
            reason,
        };
        let stylesheet = GlobalStylesheet::embedded().map_err(|err| attach_error(err.to_string()))?;

        let title = config.title.clone();
        let view = root_view(&config);
        let html = render_site_markup(config);
        let markup = EntryDocument::parse(&html).map_err(|err| attach_error(err.to_string()))?;

        self.element_mut(*element)?.rendered = Some(RenderedTree {
            title,
            view,
            html,
            stylesheet,
            markup,
        });
        self.attach_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{bootstrap::bootstrap, config::sample_config};

    fn mounted(config: SiteConfig) -> HeadlessDocument {
        let mut doc = HeadlessDocument::from_entry_html("<body><div id=\"root\"></div></body>")
            .expect("entry");
        bootstrap(&mut doc, config).expect("bootstrap");
        doc
    }

    #[test]
    fn rendered_text_follows_landing_layout() {
        let doc = mounted(sample_config());
        assert_eq!(
            doc.text_content(),
            vec!["Hello there", "A short lead.", "First", "First body."]
        );
    }

    #[test]
    fn landing_renders_one_page_heading_and_a_section_heading_per_section() {
        let doc = mounted(sample_config());
        let tree = doc.rendered("root").expect("rendered tree");
        assert_eq!(tree.element_count("h1"), 1);
        assert_eq!(tree.element_count("h2"), 1);
        assert_eq!(tree.element_count("main"), 1);
        assert_eq!(tree.attribute_of("main", "data-view"), Some("landing"));
    }

    #[test]
    fn empty_lead_is_not_rendered() {
        let mut config = sample_config();
        config.landing.lead.clear();
        let doc = mounted(config);
        assert_eq!(
            doc.text_content(),
            vec!["Hello there", "First", "First body."]
        );
        let tree = doc.rendered("root").expect("rendered tree");
        assert_eq!(tree.element_count("p"), 1);
    }

    #[test]
    fn markup_escaping_is_undone_in_text() {
        let mut config = sample_config();
        config.landing.heading = "Fish & <Chips>".into();
        let doc = mounted(config);
        assert_eq!(doc.text_content().first().copied(), Some("Fish & <Chips>"));
    }

    #[test]
    fn removing_an_attribute_forgets_it() {
        let mut doc = HeadlessDocument::from_entry_html("<div id=\"root\" data-x=\"1\"></div>")
            .expect("entry");
        let element = doc.mount_element("root").expect("mount element");
        doc.remove_attribute(&element, "data-x").expect("remove");
        assert_eq!(doc.attribute(&element, "data-x"), None);
    }
}
