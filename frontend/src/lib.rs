pub mod components;
pub mod config;
pub mod demo;
pub mod leads;
pub mod pages;
pub mod utils;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use yew::prelude::*;

use config::Config;
use pages::landing::Landing;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Config,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! {
        <ContextProvider<Config> context={props.config.clone()}>
            <Landing />
        </ContextProvider<Config>>
    }
}

/// Sets up logging and the page-wide error guard, then mounts the page.
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    install_error_guard();
    let config = Config::from_document();
    tracing::info!("CodeGraph landing page initialized (api: {})", config.api_base_url);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}

/// Logs anything that escapes our handlers and keeps the browser from
/// surfacing it, so one failure never breaks the rest of the page.
fn install_error_guard() {
    let Some(window) = web_sys::window() else { return };
    let handler = Closure::<dyn FnMut(JsValue, JsValue, JsValue, JsValue, JsValue) -> bool>::new(
        |message: JsValue, source: JsValue, line: JsValue, column: JsValue, _error: JsValue| {
            tracing::error!(
                "Uncaught error: {} ({}:{}:{})",
                message.as_string().unwrap_or_default(),
                source.as_string().unwrap_or_default(),
                line.as_f64().unwrap_or_default(),
                column.as_f64().unwrap_or_default(),
            );
            true
        },
    );
    window.set_onerror(Some(handler.as_ref().unchecked_ref()));
    handler.forget();
}
