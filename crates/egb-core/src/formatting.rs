//! Telegram HTML helpers.
//!
//! Telegram HTML supports only a small subset of tags; everything user-supplied
//! must be escaped before it goes inside one.

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn bold(text: &str) -> String {
    format!("<b>{}</b>", escape_html(text))
}

pub fn strike(text: &str) -> String {
    format!("<s>{}</s>", escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html(r#"Theory & Survey <now> "quoted""#),
            "Theory &amp; Survey &lt;now&gt; &quot;quoted&quot;"
        );
    }

    #[test]
    fn wrappers_escape_their_content() {
        assert_eq!(bold("a&b"), "<b>a&amp;b</b>");
        assert_eq!(strike("<x>"), "<s>&lt;x&gt;</s>");
    }
}
