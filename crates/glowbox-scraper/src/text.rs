//! Markup-to-text normalization for language-model consumption.

use regex::Regex;

/// Elements removed together with their content: non-content by
/// definition (`script`, `style`, ...) or page boilerplate (`nav`,
/// `footer`, `header`).
const CONTAINER_BLOCKLIST: [&str; 8] = [
    "script", "style", "noscript", "svg", "iframe", "nav", "footer", "header",
];

/// Convert raw markup into compact plain text.
///
/// Strips non-content and boilerplate elements wholesale, turns
/// block-element closings into newlines so the output stays readable,
/// drops every remaining tag, decodes the common HTML entities, collapses
/// whitespace, and truncates to `max_chars` characters to bound
/// downstream model cost.
#[must_use]
pub fn normalize_html(html: &str, max_chars: usize) -> String {
    let mut text = html.to_string();

    // The regex crate has no backreferences, so each blocked container
    // gets its own open-to-close pattern.
    for tag in CONTAINER_BLOCKLIST {
        let re = Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}>"))
            .expect("valid container-strip regex");
        text = re.replace_all(&text, " ").into_owned();
    }

    let comment_re = Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex");
    text = comment_re.replace_all(&text, " ").into_owned();

    let block_close_re = Regex::new(r"(?i)</(?:div|p|h[1-6]|li|tr|td|th|section|article|main)>")
        .expect("valid block-close regex");
    text = block_close_re.replace_all(&text, "\n").into_owned();

    let tag_re = Regex::new(r"(?s)<[^>]+>").expect("valid tag-strip regex");
    text = tag_re.replace_all(&text, " ").into_owned();

    text = decode_entities(&text);

    let horizontal_re = Regex::new(r"[ \t]+").expect("valid whitespace regex");
    text = horizontal_re.replace_all(&text, " ").into_owned();
    let newline_pad_re = Regex::new(r" ?\n ?").expect("valid newline-pad regex");
    text = newline_pad_re.replace_all(&text, "\n").into_owned();
    let vertical_re = Regex::new(r"\n{3,}").expect("valid newline regex");
    text = vertical_re.replace_all(&text, "\n\n").into_owned();
    text = text.trim().to_string();

    truncate_chars(&mut text, max_chars);
    text
}

/// Decode the handful of entities that dominate product pages. Numeric
/// entities become a space — their exact glyph never matters for
/// extraction.
pub(crate) fn decode_entities(text: &str) -> String {
    let numeric_re = Regex::new(r"&#x?[0-9a-fA-F]+;").expect("valid numeric entity regex");

    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    numeric_re.replace_all(&text, " ").into_owned()
}

/// Truncate in place to at most `max_chars` characters, respecting UTF-8
/// boundaries.
fn truncate_chars(text: &mut String, max_chars: usize) {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: usize = 4000;

    #[test]
    fn strips_scripts_with_content() {
        let html = "<p>Lip Oil</p><script>var x = '<secret>';</script><p>for $20</p>";
        let text = normalize_html(html, CAP);
        assert!(text.contains("Lip Oil"));
        assert!(text.contains("for $20"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn strips_nav_footer_header_boilerplate() {
        let html = "<header>Free shipping!</header><main><p>Blush Stick</p></main><footer>© Store</footer>";
        let text = normalize_html(html, CAP);
        assert!(text.contains("Blush Stick"));
        assert!(!text.contains("Free shipping"));
        assert!(!text.contains("© Store"));
    }

    #[test]
    fn output_never_contains_tag_delimiters() {
        let html = "<div class='a'><span>Foundation</span> &lt;kept as text&gt; <br/></div>";
        let text = normalize_html(html, CAP);
        assert!(text.contains("Foundation"));
        // Decoded &lt;/&gt; survive as literal characters only via
        // entities in the source text; raw markup delimiters do not.
        assert!(!text.contains("<div"));
        assert!(!text.contains("<span"));
        assert!(!text.contains("<br"));
    }

    #[test]
    fn block_closings_become_newlines() {
        let html = "<p>Name</p><p>Brand</p>";
        let text = normalize_html(html, CAP);
        assert_eq!(text, "Name\nBrand");
    }

    #[test]
    fn decodes_common_entities() {
        let html = "<p>Beauty &amp; Personal Care&nbsp;&#8211;&#39;23</p>";
        let text = normalize_html(html, CAP);
        assert!(text.contains("Beauty & Personal Care"));
        assert!(text.contains("'23"));
        assert!(!text.contains("&#8211;"));
    }

    #[test]
    fn removes_html_comments() {
        let text = normalize_html("<p>A</p><!-- hidden --><p>B</p>", CAP);
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn caps_blank_lines_at_one() {
        let html = "<p>A</p>\n\n\n\n<p>B</p>";
        let text = normalize_html(html, CAP);
        assert!(!text.contains("\n\n\n"), "got: {text:?}");
    }

    #[test]
    fn never_exceeds_the_character_cap() {
        let html = format!("<p>{}</p>", "word ".repeat(5000));
        let text = normalize_html(&html, CAP);
        assert!(text.chars().count() <= CAP);
    }

    #[test]
    fn cap_respects_multibyte_boundaries() {
        let html = "é".repeat(100);
        let text = normalize_html(&html, 10);
        assert_eq!(text.chars().count(), 10);
    }

    #[test]
    fn short_input_is_untouched_by_the_cap() {
        assert_eq!(normalize_html("plain words", CAP), "plain words");
    }
}
