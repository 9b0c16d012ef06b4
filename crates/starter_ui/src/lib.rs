//! Shared UI primitive library for the starter site.
//!
//! The crate owns a small set of reusable Leptos primitives and the stable `data-ui-*` DOM
//! contract consumed by the global stylesheet. Pages should compose these primitives instead of
//! emitting ad hoc layout markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod primitives;

pub use primitives::{
    Heading, HeadingLevel, LayoutGap, LayoutPadding, Stack, Surface, SurfaceVariant, Text,
    TextRole, TextTone,
};

/// Convenience imports for page modules consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        Heading, HeadingLevel, LayoutGap, LayoutPadding, Stack, Surface, SurfaceVariant, Text,
        TextRole, TextTone,
    };
}
