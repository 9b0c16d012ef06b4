//! Root container and site context wiring.
//!
//! [`SiteProvider`] owns the site-wide configuration for the lifetime of the mounted tree;
//! [`SiteApp`] is the root container: it owns the document head metadata and renders
//! [`SiteRoot`], which holds exactly one page view.

use leptos::*;
use leptos_meta::*;

use crate::{
    config::{reduce_site_config, SiteConfig, SiteConfigUpdate},
    pages::LandingPage,
    views::{root_view, SiteView},
};

#[derive(Clone, Copy)]
/// Leptos context for reading site configuration and submitting [`SiteConfigUpdate`] values.
pub struct SiteContext {
    /// Reactive site configuration.
    pub config: ReadSignal<SiteConfig>,
    update: Callback<SiteConfigUpdate>,
}

impl SiteContext {
    /// Routes an update through [`reduce_site_config`].
    pub fn update(&self, update: SiteConfigUpdate) {
        self.update.call(update);
    }
}

#[component]
/// Provides [`SiteContext`] to descendant components.
pub fn SiteProvider(
    /// Configuration loaded by bootstrap.
    config: SiteConfig,
    children: Children,
) -> impl IntoView {
    let (config, set_config) = create_signal(config);

    let update = Callback::new(move |update: SiteConfigUpdate| {
        let mut next = config.get_untracked();
        match reduce_site_config(&mut next, update) {
            Ok(()) => {
                if next != config.get_untracked() {
                    set_config.set(next);
                }
            }
            Err(err) => logging::warn!("site config update rejected: {err}"),
        }
    });

    provide_context(SiteContext { config, update });

    children().into_view()
}

/// Returns the current [`SiteContext`].
///
/// # Panics
///
/// Panics if called outside [`SiteProvider`].
pub fn use_site_context() -> SiteContext {
    use_context::<SiteContext>().expect("SiteContext not provided")
}

#[component]
/// Root container. Takes no props and always renders the landing page.
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();
    let site = use_site_context();

    let title = move || site.config.with(|config| config.title.clone());
    let description = move || site.config.with(|config| config.description.clone());

    view! {
        <Title text=title />
        <Meta name="description" content=description />

        <SiteRoot />
    }
}

#[component]
/// Body of the root container: the `<main>` element and the current page view.
pub fn SiteRoot() -> impl IntoView {
    let site = use_site_context();
    let current_view = move || site.config.with(root_view);

    view! {
        <main class="site-root" data-view=move || current_view().name()>
            {move || render_site_view(current_view())}
        </main>
    }
}

fn render_site_view(site_view: SiteView) -> View {
    match site_view {
        SiteView::Landing(props) => view! { <LandingPage props=props /> }.into_view(),
    }
}
