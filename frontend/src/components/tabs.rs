use yew::prelude::*;

use crate::utils::dom::{arrow_target, focus_element};

#[derive(Properties, PartialEq)]
pub struct TabStripProps {
    pub id_prefix: &'static str,
    pub tab_class: &'static str,
    pub labels: Vec<&'static str>,
    /// `None` until the visitor picks a tab.
    pub active: Option<usize>,
    pub on_select: Callback<usize>,
}

/// Row of `role="tab"` buttons with wrapping arrow-key navigation.
#[function_component(TabStrip)]
pub fn tab_strip(props: &TabStripProps) -> Html {
    let len = props.labels.len();
    html! {
        <div class="tab-list" role="tablist">
            { for props.labels.iter().enumerate().map(|(index, label)| {
                let onclick = {
                    let on_select = props.on_select.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(index))
                };
                let onkeydown = {
                    let on_select = props.on_select.clone();
                    let id_prefix = props.id_prefix;
                    Callback::from(move |e: KeyboardEvent| {
                        if let Some(next) = arrow_target(&e.key(), index, len) {
                            e.prevent_default();
                            focus_element(&format!("{}-{}", id_prefix, next));
                            on_select.emit(next);
                        }
                    })
                };
                let selected = props.active == Some(index);
                let focusable = selected || (props.active.is_none() && index == 0);
                html! {
                    <button
                        id={format!("{}-{}", props.id_prefix, index)}
                        type="button"
                        role="tab"
                        class={classes!(props.tab_class, selected.then_some("active"))}
                        aria-selected={selected.to_string()}
                        tabindex={if focusable { "0" } else { "-1" }}
                        {onclick}
                        {onkeydown}
                    >
                        {*label}
                    </button>
                }
            }) }
        </div>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub points: &'static [&'static str],
}

#[derive(Properties, PartialEq)]
pub struct FeatureTabsProps {
    pub features: &'static [Feature],
}

#[function_component(FeatureTabs)]
pub fn feature_tabs(props: &FeatureTabsProps) -> Html {
    let active = use_state(|| 0usize);
    let on_select = {
        let active = active.clone();
        Callback::from(move |index: usize| active.set(index))
    };

    html! {
        <div class="features-tabs">
            <TabStrip
                id_prefix="feature-tab"
                tab_class="feature-tab"
                labels={props.features.iter().map(|f| f.title).collect::<Vec<_>>()}
                active={Some(*active)}
                {on_select}
            />
            { for props.features.iter().enumerate().map(|(index, feature)| html! {
                <div
                    class={classes!("features-panel", (index == *active).then_some("active"))}
                    data-panel={feature.id}
                    role="tabpanel"
                    hidden={index != *active}
                >
                    <p class="features-panel-summary">{feature.summary}</p>
                    <ul>
                        { for feature.points.iter().map(|point| html! { <li>{*point}</li> }) }
                    </ul>
                </div>
            }) }
        </div>
    }
}
