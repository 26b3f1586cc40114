use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

pub fn element_by_id(id: &str) -> Option<HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Smooth-scrolls so the element sits `offset` pixels below the top edge,
/// leaving room for the fixed header.
pub fn scroll_to_section(id: &str, offset: f64) {
    let Some(window) = web_sys::window() else { return };
    let Some(target) = element_by_id(id) else {
        tracing::debug!("No section with id {}", id);
        return;
    };
    let mut options = ScrollToOptions::new();
    options
        .top(f64::from(target.offset_top()) - offset)
        .behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Strips the leading `#` from an in-page link.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn set_body_scroll_locked(locked: bool) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let value = if locked { "hidden" } else { "" };
        let _ = body.style().set_property("overflow", value);
    }
}

pub fn focus_element(id: &str) {
    if let Some(el) = element_by_id(id) {
        let _ = el.focus();
    }
}

/// Index reached from `current` by an arrow key in a horizontal or vertical
/// tab list; wraps around at both ends.
pub fn arrow_target(key: &str, current: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match key {
        "ArrowRight" | "ArrowDown" => Some((current + 1) % len),
        "ArrowLeft" | "ArrowUp" => Some((current + len - 1) % len),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_target_wraps() {
        assert_eq!(arrow_target("ArrowRight", 2, 3), Some(0));
        assert_eq!(arrow_target("ArrowDown", 0, 3), Some(1));
        assert_eq!(arrow_target("ArrowLeft", 0, 3), Some(2));
        assert_eq!(arrow_target("ArrowUp", 1, 3), Some(0));
        assert_eq!(arrow_target("Enter", 1, 3), None);
        assert_eq!(arrow_target("ArrowRight", 0, 0), None);
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#solution"), Some("solution"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("https://codegraph.ru"), None);
    }
}
