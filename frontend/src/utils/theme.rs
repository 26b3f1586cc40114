use wasm_bindgen::JsCast;

pub const THEME_STORAGE_KEY: &str = "theme";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// An explicit saved choice beats the system preference.
    pub fn initial(saved: Option<Theme>, prefers_dark: bool) -> Self {
        saved.unwrap_or_else(|| Theme::from_system(prefers_dark))
    }
}

pub fn load_saved() -> Option<Theme> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let raw = storage.get_item(THEME_STORAGE_KEY).ok()??;
    Theme::parse(&raw)
}

pub fn save(theme: Theme) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if storage.set_item(THEME_STORAGE_KEY, theme.as_str()).is_err() {
                tracing::warn!("Could not persist theme preference");
            }
        }
    }
}

pub fn system_prefers_dark() -> bool {
    dark_scheme_query().map(|q| q.matches()).unwrap_or(false)
}

pub fn dark_scheme_query() -> Option<web_sys::MediaQueryList> {
    web_sys::window()?.match_media(DARK_SCHEME_QUERY).ok()?
}

/// Applies the theme as the `data-theme` attribute of `<html>`.
pub fn apply(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

/// Reads `matches` off a `change` event from the dark-scheme media query.
pub fn event_prefers_dark(event: &web_sys::Event) -> Option<bool> {
    event
        .dyn_ref::<web_sys::MediaQueryListEvent>()
        .map(|e| e.matches())
}
