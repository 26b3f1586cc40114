/// Escapes text for insertion into `innerHTML`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// How far back from the limit we look for a word boundary.
const WORD_BOUNDARY_WINDOW: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Truncated {
    pub text: String,
    pub truncated: bool,
}

/// Shortens `text` to at most `max_chars` characters plus an ellipsis,
/// preferring to cut at a space when one exists close to the limit.
pub fn truncate_for_display(text: &str, max_chars: usize) -> Truncated {
    if text.chars().count() <= max_chars {
        return Truncated {
            text: text.to_string(),
            truncated: false,
        };
    }

    let head: String = text.chars().take(max_chars).collect();
    let mut head = head.trim().to_string();

    if let Some(byte_idx) = head.rfind(' ') {
        let char_idx = head[..byte_idx].chars().count();
        if char_idx > max_chars.saturating_sub(WORD_BOUNDARY_WINDOW) {
            head.truncate(byte_idx);
        }
    }

    head.push_str("...");
    Truncated {
        text: head,
        truncated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Функция"), "Функция");
    }

    #[test]
    fn test_short_text_is_untouched() {
        let out = truncate_for_display("A function is a named block.", 300);
        assert_eq!(out.text, "A function is a named block.");
        assert!(!out.truncated);
    }

    #[test]
    fn test_cuts_at_word_boundary() {
        let text = "слово ".repeat(80);
        let out = truncate_for_display(&text, 300);
        assert!(out.truncated);
        let body = out.text.strip_suffix("...").unwrap();
        assert!(body.chars().count() <= 300);
        assert!(body.ends_with("слово"));
        assert!(text.starts_with(body));
    }

    #[test]
    fn test_hard_cut_without_nearby_space() {
        let text = format!("intro {}", "x".repeat(400));
        let out = truncate_for_display(&text, 300);
        let body = out.text.strip_suffix("...").unwrap();
        assert_eq!(body.chars().count(), 300);
        assert!(body.starts_with("intro x"));
    }

    #[test]
    fn test_space_exactly_at_window_edge_is_not_used() {
        // Space at char index 250 == 300 - 50, which is not strictly inside the window.
        let text = format!("{} {}", "a".repeat(250), "b".repeat(100));
        let out = truncate_for_display(&text, 300);
        let body = out.text.strip_suffix("...").unwrap();
        assert_eq!(body.chars().count(), 300);

        let text = format!("{} {}", "a".repeat(251), "b".repeat(100));
        let out = truncate_for_display(&text, 300);
        assert_eq!(out.text, format!("{}...", "a".repeat(251)));
    }

    #[test]
    fn test_never_exceeds_limit_for_multibyte_text() {
        let text = "Граф кода показывает связи между функциями. ".repeat(20);
        for limit in [10, 60, 300] {
            let out = truncate_for_display(&text, limit);
            let body = out.text.strip_suffix("...").unwrap();
            assert!(body.chars().count() <= limit);
        }
    }
}
