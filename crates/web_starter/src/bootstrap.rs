//! One-shot attachment of the root tree to the entry document's mount element.
//!
//! [`bootstrap`] is written against [`MountHost`] so the same sequence runs against the live
//! browser document (`BrowserDocument`, wasm32 only) and the in-memory `HeadlessDocument`
//! (native only). Mounted state is recorded on the mount element itself via
//! [`MOUNTED_ATTRIBUTE`]; a second bootstrap against the same element is a no-op.

use leptos::logging;
use thiserror::Error;

use crate::config::{ConfigError, SiteConfig};

/// Marker attribute set on the mount element once the tree is attached.
pub const MOUNTED_ATTRIBUTE: &str = "data-web-starter-mounted";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Bootstrap failures. All of them leave the page blank.
pub enum BootstrapError {
    /// The host has no loaded document.
    #[error("no document is available to mount into")]
    DocumentUnavailable,
    /// The entry document lacks the mount element.
    #[error("mount element `#{id}` not found in the entry document")]
    MountPointMissing {
        /// Mount id that was looked up.
        id: String,
    },
    /// The host could not attach the tree.
    #[error("failed to attach to `#{id}`: {reason}")]
    Attach {
        /// Mount id.
        id: String,
        /// Host-reported reason.
        reason: String,
    },
    /// The bundled configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of a successful [`bootstrap`] call.
pub enum MountOutcome {
    /// The tree was attached by this call.
    Mounted,
    /// The element already carried a tree; nothing was changed.
    AlreadyMounted,
}

/// Document operations bootstrap needs from its environment.
pub trait MountHost {
    /// Handle to an element of the loaded document.
    type Element: Clone;

    /// Looks up an element by id.
    fn mount_element(&self, id: &str) -> Option<Self::Element>;

    /// Reads an attribute of `element`.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Writes an attribute of `element`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Attach`] when the host rejects the write.
    fn set_attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), BootstrapError>;

    /// Removes an attribute of `element`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Attach`] when the host rejects the removal.
    fn remove_attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
    ) -> Result<(), BootstrapError>;

    /// Attaches the root tree built from `config` under `element`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Attach`] when the host cannot render into `element`.
    fn attach(&mut self, element: &Self::Element, config: SiteConfig) -> Result<(), BootstrapError>;
}

/// Attaches the root tree to the mount element named by `config.mount_id`.
///
/// The mounted marker is written before attaching and removed again if attaching fails, so a
/// failed call never leaves a tree behind that a retry would duplicate.
///
/// # Errors
///
/// Returns [`BootstrapError::MountPointMissing`] when the element is absent, or the host's error
/// when attaching fails. Never reports success without a mounted tree.
pub fn bootstrap<H: MountHost>(
    host: &mut H,
    config: SiteConfig,
) -> Result<MountOutcome, BootstrapError> {
    let id = config.mount_id.clone();
    let element = host
        .mount_element(&id)
        .ok_or_else(|| BootstrapError::MountPointMissing { id: id.clone() })?;

    if host.attribute(&element, MOUNTED_ATTRIBUTE).is_some() {
        logging::warn!("#{id} is already mounted; skipping bootstrap");
        return Ok(MountOutcome::AlreadyMounted);
    }

    host.set_attribute(&element, MOUNTED_ATTRIBUTE, "true")?;
    if let Err(err) = host.attach(&element, config) {
        if let Err(cleanup) = host.remove_attribute(&element, MOUNTED_ATTRIBUTE) {
            logging::warn!("could not clear mount marker on #{id}: {cleanup}");
        }
        return Err(err);
    }
    logging::log!("mounted site into #{id}");
    Ok(MountOutcome::Mounted)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::sample_config, headless::HeadlessDocument};

    const ENTRY: &str = "<!DOCTYPE html><html><body><div id=\"root\"></div></body></html>";

    #[test]
    fn bootstrap_renders_landing_heading_once() {
        let mut doc = HeadlessDocument::from_entry_html(ENTRY).expect("entry");
        let outcome = bootstrap(&mut doc, sample_config()).expect("bootstrap");

        assert_eq!(outcome, MountOutcome::Mounted);
        let text = doc.text_content();
        assert_eq!(text.iter().filter(|line| **line == "Hello there").count(), 1);
        assert_eq!(
            doc.rendered("root").map(|tree| tree.view.name()),
            Some("landing")
        );
    }

    #[test]
    fn missing_mount_point_is_an_error() {
        let mut doc = HeadlessDocument::from_entry_html("<body><div id=\"app\"></div></body>")
            .expect("entry");
        let err = bootstrap(&mut doc, sample_config()).expect_err("no mount point");

        assert_eq!(err, BootstrapError::MountPointMissing { id: "root".into() });
        assert_eq!(doc.attach_count(), 0);
        assert!(doc.text_content().is_empty());
    }

    #[test]
    fn second_bootstrap_is_a_noop() {
        let mut doc = HeadlessDocument::from_entry_html(ENTRY).expect("entry");
        bootstrap(&mut doc, sample_config()).expect("first bootstrap");

        let mut changed = sample_config();
        changed.landing.heading = "Changed".into();
        let outcome = bootstrap(&mut doc, changed).expect("second bootstrap");

        assert_eq!(outcome, MountOutcome::AlreadyMounted);
        assert_eq!(doc.attach_count(), 1);
        assert_eq!(doc.text_content().first().copied(), Some("Hello there"));
    }

    #[test]
    fn mount_marker_is_written_to_element() {
        let mut doc = HeadlessDocument::from_entry_html(ENTRY).expect("entry");
        bootstrap(&mut doc, sample_config()).expect("bootstrap");

        let element = doc.mount_element("root").expect("mount element");
        assert_eq!(
            doc.attribute(&element, MOUNTED_ATTRIBUTE).as_deref(),
            Some("true")
        );
    }

    #[test]
    fn prerendered_marker_counts_as_mounted() {
        let html = format!("<div id=\"root\" {MOUNTED_ATTRIBUTE}=\"true\"></div>");
        let mut doc = HeadlessDocument::from_entry_html(&html).expect("entry");

        let outcome = bootstrap(&mut doc, sample_config()).expect("bootstrap");
        assert_eq!(outcome, MountOutcome::AlreadyMounted);
        assert_eq!(doc.attach_count(), 0);
    }

    #[test]
    fn custom_mount_id_is_honoured() {
        let mut doc = HeadlessDocument::from_entry_html("<main id=\"app\"></main>").expect("entry");
        let mut config = sample_config();
        config.mount_id = "app".into();

        bootstrap(&mut doc, config).expect("bootstrap");
        assert!(doc.rendered("app").is_some());
    }

    struct FlakyHost {
        document: HeadlessDocument,
        fail_attach: bool,
    }

    impl MountHost for FlakyHost {
        type Element = usize;

        fn mount_element(&self, id: &str) -> Option<usize> {
            self.document.mount_element(id)
        }

        fn attribute(&self, element: &usize, name: &str) -> Option<String> {
            self.document.attribute(element, name)
        }

        fn set_attribute(
            &mut self,
            element: &usize,
            name: &str,
            value: &str,
        ) -> Result<(), BootstrapError> {
            self.document.set_attribute(element, name, value)
        }

        fn remove_attribute(&mut self, element: &usize, name: &str) -> Result<(), BootstrapError> {
            self.document.remove_attribute(element, name)
        }

        fn attach(&mut self, element: &usize, config: SiteConfig) -> Result<(), BootstrapError> {
            if self.fail_attach {
                return Err(BootstrapError::Attach {
                    id: config.mount_id,
                    reason: "renderer unavailable".into(),
                });
            }
            self.document.attach(element, config)
        }
    }

    #[test]
    fn failed_attach_clears_marker_so_retry_mounts_once() {
        let mut host = FlakyHost {
            document: HeadlessDocument::from_entry_html(ENTRY).expect("entry"),
            fail_attach: true,
        };

        let err = bootstrap(&mut host, sample_config()).expect_err("attach fails");
        assert!(matches!(err, BootstrapError::Attach { .. }));
        let element = host.mount_element("root").expect("mount element");
        assert_eq!(host.attribute(&element, MOUNTED_ATTRIBUTE), None);

        host.fail_attach = false;
        let outcome = bootstrap(&mut host, sample_config()).expect("retry");
        assert_eq!(outcome, MountOutcome::Mounted);
        assert_eq!(host.document.attach_count(), 1);
        assert_eq!(
            host.document
                .rendered("root")
                .map(|tree| tree.element_count("h1")),
            Some(1)
        );
    }
}
