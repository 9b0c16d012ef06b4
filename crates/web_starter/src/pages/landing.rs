use leptos::*;
use starter_ui::prelude::*;

use crate::views::LandingProps;

#[component]
/// Static landing page. Terminal node of the render tree.
pub fn LandingPage(props: LandingProps) -> impl IntoView {
    let content = props.content;
    let lead = (!content.lead.is_empty()).then(|| {
        let lead = content.lead.clone();
        view! { <Text role=TextRole::Lead tone=TextTone::Secondary>{lead}</Text> }
    });

    view! {
        <Stack gap=LayoutGap::Lg padding=LayoutPadding::Lg layout_class="landing-page">
            <Heading level=HeadingLevel::Page>{content.heading}</Heading>
            {lead}
            {content
                .sections
                .into_iter()
                .map(|section| {
                    let label = section.title.clone();
                    view! {
                        <Surface aria_label=label>
                            <Stack gap=LayoutGap::Sm>
                                <Heading level=HeadingLevel::Section tone=TextTone::Accent>
                                    {section.title}
                                </Heading>
                                <Text>{section.body}</Text>
                            </Stack>
                        </Surface>
                    }
                })
                .collect_view()}
        </Stack>
    }
}
