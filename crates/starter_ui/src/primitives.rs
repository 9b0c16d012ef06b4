//! Structural and typography primitives.

use leptos::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Semantic surface variants for structural primitives.
pub enum SurfaceVariant {
    /// Primary surface.
    #[default]
    Standard,
    /// Secondary or muted surface.
    Muted,
}

impl SurfaceVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Muted => "muted",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Shared text roles.
pub enum TextRole {
    /// Body text.
    #[default]
    Body,
    /// Lead paragraph text.
    Lead,
    /// Caption text.
    Caption,
}

impl TextRole {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Lead => "lead",
            Self::Caption => "caption",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Shared text tone.
pub enum TextTone {
    /// Primary text.
    #[default]
    Primary,
    /// Secondary text.
    Secondary,
    /// Accent text.
    Accent,
}

impl TextTone {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Document outline level rendered by [`Heading`].
pub enum HeadingLevel {
    /// Page title (`h1`). A page renders at most one.
    #[default]
    Page,
    /// Section title (`h2`).
    Section,
}

impl HeadingLevel {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Gap between children of a layout primitive.
pub enum LayoutGap {
    /// No gap.
    None,
    /// Small gap.
    Sm,
    /// Medium gap.
    #[default]
    Md,
    /// Large gap.
    Lg,
}

impl LayoutGap {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Inner padding of a layout primitive.
pub enum LayoutPadding {
    /// No padding.
    #[default]
    None,
    /// Small padding.
    Sm,
    /// Medium padding.
    Md,
    /// Large padding.
    Lg,
}

impl LayoutPadding {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

#[component]
/// Vertical layout stack.
pub fn Stack(
    #[prop(default = LayoutGap::Md)] gap: LayoutGap,
    #[prop(default = LayoutPadding::None)] padding: LayoutPadding,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-stack", layout_class)
            data-ui-primitive="true"
            data-ui-kind="stack"
            data-ui-gap=gap.token()
            data-ui-padding=padding.token()
        >
            {children()}
        </div>
    }
}

#[component]
/// Generic sectioning surface.
pub fn Surface(
    #[prop(default = SurfaceVariant::Standard)] variant: SurfaceVariant,
    #[prop(default = LayoutPadding::Md)] padding: LayoutPadding,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <section
            class=merge_layout_class("ui-surface", layout_class)
            data-ui-primitive="true"
            data-ui-kind="surface"
            data-ui-variant=variant.token()
            data-ui-padding=padding.token()
            aria-label=aria_label
        >
            {children()}
        </section>
    }
}

#[component]
/// Shared heading primitive.
pub fn Heading(
    #[prop(default = HeadingLevel::Page)] level: HeadingLevel,
    #[prop(default = TextTone::Primary)] tone: TextTone,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let class = merge_layout_class("ui-heading", layout_class);
    match level {
        HeadingLevel::Page => view! {
            <h1
                class=class
                data-ui-primitive="true"
                data-ui-kind="heading"
                data-ui-variant=level.token()
                data-ui-tone=tone.token()
            >
                {children()}
            </h1>
        }
        .into_view(),
        HeadingLevel::Section => view! {
            <h2
                class=class
                data-ui-primitive="true"
                data-ui-kind="heading"
                data-ui-variant=level.token()
                data-ui-tone=tone.token()
            >
                {children()}
            </h2>
        }
        .into_view(),
    }
}

#[component]
/// Paragraph-level text primitive.
pub fn Text(
    #[prop(default = TextRole::Body)] role: TextRole,
    #[prop(default = TextTone::Primary)] tone: TextTone,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <p
            class=merge_layout_class("ui-text", layout_class)
            data-ui-primitive="true"
            data-ui-kind="text"
            data-ui-variant=role.token()
            data-ui-tone=tone.token()
        >
            {children()}
        </p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_layout_class_appends_non_empty_extra_class() {
        assert_eq!(merge_layout_class("ui-stack", None), "ui-stack");
        assert_eq!(merge_layout_class("ui-stack", Some("")), "ui-stack");
        assert_eq!(
            merge_layout_class("ui-stack", Some("landing-page")),
            "ui-stack landing-page"
        );
    }

    #[test]
    fn defaults_match_component_prop_defaults() {
        assert_eq!(LayoutGap::default().token(), "md");
        assert_eq!(LayoutPadding::default().token(), "none");
        assert_eq!(TextRole::default().token(), "body");
        assert_eq!(TextTone::default().token(), "primary");
        assert_eq!(HeadingLevel::default().token(), "page");
        assert_eq!(SurfaceVariant::default().token(), "standard");
    }

    #[test]
    fn heading_levels_have_distinct_tokens() {
        assert_ne!(HeadingLevel::Page.token(), HeadingLevel::Section.token());
    }
}
