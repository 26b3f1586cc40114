use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

/// Flips to `true` the first time `node` scrolls into view and stays there.
#[hook]
pub fn use_in_view(node: NodeRef, threshold: f64, root_margin: &'static str) -> bool {
    let visible = use_state(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |node: &NodeRef| {
                let mut observer_handle = None;
                if let Some(element) = node.cast::<web_sys::Element>() {
                    let on_visible = visible.clone();
                    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                        move |entries: js_sys::Array, observer: IntersectionObserver| {
                            for entry in entries.iter() {
                                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                                    continue;
                                };
                                if entry.is_intersecting() {
                                    on_visible.set(true);
                                    observer.unobserve(&entry.target());
                                }
                            }
                        },
                    );

                    let mut options = IntersectionObserverInit::new();
                    options
                        .threshold(&JsValue::from_f64(threshold))
                        .root_margin(root_margin);

                    let observer = IntersectionObserver::new_with_options(
                        callback.as_ref().unchecked_ref(),
                        &options,
                    );
                    match observer {
                        Ok(observer) => {
                            observer.observe(&element);
                            observer_handle = Some((observer, callback));
                        }
                        Err(e) => {
                            // Without an observer just show the content.
                            tracing::warn!("IntersectionObserver unavailable: {:?}", e);
                            visible.set(true);
                        }
                    }
                }

                move || {
                    if let Some((observer, _callback)) = observer_handle {
                        observer.disconnect();
                    }
                }
            },
            node,
        );
    }

    *visible
}

#[derive(Properties, PartialEq)]
pub struct AnimateOnViewProps {
    pub animation: &'static str,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Adds `animated animate-{name}` the first time the block becomes visible.
#[function_component(AnimateOnView)]
pub fn animate_on_view(props: &AnimateOnViewProps) -> Html {
    let threshold = use_context::<crate::config::Config>()
        .unwrap_or_default()
        .observer_threshold;
    let node = use_node_ref();
    let visible = use_in_view(node.clone(), threshold, "0px 0px -50px 0px");

    let classes = classes!(
        props.class.clone(),
        visible.then(|| vec!["animated".to_string(), format!("animate-{}", props.animation)])
    );

    html! {
        <div ref={node} class={classes} data-animate={props.animation}>
            { for props.children.iter() }
        </div>
    }
}
