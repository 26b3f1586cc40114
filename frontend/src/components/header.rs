use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config::Config;
use crate::utils::dom::{anchor_target, element_by_id, scroll_to_section, set_body_scroll_locked};
use crate::utils::theme::{self, Theme};

const SCROLLED_AFTER_PX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

/// Section whose top edge has most recently passed `probe`, given section
/// tops in document order.
pub fn current_section<'a>(tops: &[(&'a str, f64)], probe: f64) -> Option<&'a str> {
    tops.iter()
        .take_while(|(_, top)| *top <= probe)
        .last()
        .map(|(id, _)| *id)
}

fn section_tops(links: &[NavLink]) -> Vec<(&'static str, f64)> {
    links
        .iter()
        .filter_map(|link| {
            let id = anchor_target(link.href)?;
            let element = element_by_id(id)?;
            Some((id, f64::from(element.offset_top())))
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub links: &'static [NavLink],
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let theme = use_state(|| Theme::initial(theme::load_saved(), theme::system_prefers_dark()));
    let menu_open = use_state(|| false);
    let scrolled = use_state(|| false);
    let active_section = use_state(|| None::<&'static str>);

    {
        use_effect_with_deps(
            move |theme: &Theme| {
                theme::apply(*theme);
                || ()
            },
            *theme,
        );
    }

    // Follow the OS theme until the visitor picks one explicitly.
    {
        let theme = theme.clone();
        use_effect_with_deps(
            move |_| {
                let query = theme::dark_scheme_query();
                let listener = Closure::<dyn Fn(web_sys::Event)>::new(move |event: web_sys::Event| {
                    if theme::load_saved().is_some() {
                        return;
                    }
                    if let Some(prefers_dark) = theme::event_prefers_dark(&event) {
                        theme.set(Theme::from_system(prefers_dark));
                    }
                });
                if let Some(query) = &query {
                    let _ = query.add_event_listener_with_callback(
                        "change",
                        listener.as_ref().unchecked_ref(),
                    );
                }
                move || {
                    if let Some(query) = query {
                        let _ = query.remove_event_listener_with_callback(
                            "change",
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    {
        use_effect_with_deps(
            move |open: &bool| {
                set_body_scroll_locked(*open);
                || ()
            },
            *menu_open,
        );
    }

    // Header shadow and active nav link follow the scroll position.
    {
        let scrolled = scrolled.clone();
        let active_section = active_section.clone();
        let links = props.links;
        let offset = config.scroll_offset;
        use_effect_with_deps(
            move |_| {
                let update = move || {
                    if let Some(window) = web_sys::window() {
                        if let Ok(scroll_y) = window.scroll_y() {
                            scrolled.set(scroll_y > SCROLLED_AFTER_PX);
                            let tops = section_tops(links);
                            active_section.set(current_section(&tops, scroll_y + offset + 1.0));
                        }
                    }
                };
                update();
                let callback = Closure::<dyn Fn()>::new(update);
                let window = web_sys::window();
                if let Some(window) = &window {
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        callback.as_ref().unchecked_ref(),
                    );
                }
                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    {
        let menu_open = menu_open.clone();
        use_effect_with_deps(
            move |_| {
                let callback = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                    if e.key() == "Escape" {
                        menu_open.set(false);
                    }
                });
                let document = web_sys::window().and_then(|w| w.document());
                if let Some(document) = &document {
                    let _ = document.add_event_listener_with_callback(
                        "keydown",
                        callback.as_ref().unchecked_ref(),
                    );
                }
                move || {
                    if let Some(document) = document {
                        let _ = document.remove_event_listener_with_callback(
                            "keydown",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = theme.toggled();
            theme::save(next);
            theme.set(next);
        })
    };

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let nav_link = |link: &NavLink, class: &'static str| {
        let href = link.href;
        let onclick = {
            let menu_open = menu_open.clone();
            let offset = config.scroll_offset;
            Callback::from(move |e: MouseEvent| {
                if let Some(id) = anchor_target(href) {
                    e.prevent_default();
                    scroll_to_section(id, offset);
                }
                menu_open.set(false);
            })
        };
        let is_active = anchor_target(href).is_some() && *active_section == anchor_target(href);
        html! {
            <a href={href} class={classes!(class, is_active.then_some("active"))} {onclick}>{link.label}</a>
        }
    };

    let theme_label = match *theme {
        Theme::Dark => "Включить светлую тему",
        Theme::Light => "Включить тёмную тему",
    };

    html! {
        <header class={classes!("header", scrolled.then_some("scrolled"))}>
            <div class="header-inner">
                <a href="#hero" class="logo">{"CodeGraph"}</a>
                <nav class="nav" aria-label="Основная навигация">
                    { for props.links.iter().map(|link| nav_link(link, "nav-link")) }
                </nav>
                <button type="button" class="theme-toggle" aria-label={theme_label} onclick={toggle_theme}>
                    {if *theme == Theme::Dark { "☀" } else { "☾" }}
                </button>
                <button
                    type="button"
                    class={classes!("mobile-menu-toggle", menu_open.then_some("active"))}
                    aria-label="Меню"
                    aria-expanded={menu_open.to_string()}
                    onclick={toggle_menu}
                >
                    <span></span><span></span><span></span>
                </button>
            </div>
            <nav class={classes!("mobile-nav", menu_open.then_some("open"))} aria-label="Мобильная навигация">
                { for props.links.iter().map(|link| nav_link(link, "mobile-nav-link")) }
            </nav>
        </header>
    }
}
