//! HTML sanitization
//!
//! Strips active content from stored post bodies while keeping formatting:
//! script, style and iframe blocks, inline event handlers, and
//! `javascript:` URLs. Also normalizes the entity and quote damage that
//! generated content accumulates.

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static IFRAME_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<iframe[^>]*>.*?</iframe>").unwrap());
static STRAY_ACTIVE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(?:script|style|iframe)[^>]*>").unwrap());
static EVENT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap());
static JS_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\s(href|src)\s*=\s*["']\s*javascript:[^"']*["']"#).unwrap());
static EMPTY_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h[1-6][^>]*>\s*</h[1-6]>").unwrap());
static HR_ARTIFACT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*-{3,}\s*$").unwrap());

/// Removes active content and normalizes entity damage
pub fn sanitize(content: &str) -> String {
    let out = SCRIPT_BLOCK.replace_all(content, "");
    let out = STYLE_BLOCK.replace_all(&out, "");
    let out = IFRAME_BLOCK.replace_all(&out, "");
    let out = STRAY_ACTIVE_TAG.replace_all(&out, "");
    let out = EVENT_ATTR.replace_all(&out, "");
    let out = JS_URL.replace_all(&out, r##" $1="#""##);
    let out = EMPTY_HEADING.replace_all(&out, "");
    let out = HR_ARTIFACT.replace_all(&out, "");
    normalize_entities(&out)
}

/// Decodes the double-encoded entities generated content is littered with
/// and normalizes quotes
///
/// `&lt;` and `&gt;` are deliberately left encoded: decoding them would
/// resurrect markup the rest of the pipeline has no reason to trust.
fn normalize_entities(content: &str) -> String {
    content
        .replace("&amp;lt;", "&lt;")
        .replace("&amp;gt;", "&gt;")
        .replace("&amp;quot;", "&quot;")
        .replace("&amp;amp;", "&")
        .replace("&amp;", "&")
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_blocks_are_removed() {
        let html = r#"<p>Before</p><script type="text/javascript">alert("x");</script><p>After</p>"#;
        let out = sanitize(html);

        assert!(!out.contains("<script"));
        assert!(!out.contains("alert"));
        assert!(out.contains("<p>Before</p>"));
        assert!(out.contains("<p>After</p>"));
    }

    #[test]
    fn style_and_iframe_blocks_are_removed() {
        let html = "<style>p { color: red }</style><iframe src=\"https://x.test\"></iframe><p>Kept</p>";
        let out = sanitize(html);

        assert!(!out.contains("<style"));
        assert!(!out.contains("<iframe"));
        assert!(out.contains("<p>Kept</p>"));
    }

    #[test]
    fn unclosed_script_tags_are_removed() {
        let out = sanitize("<p>Hi</p><script src=\"https://evil.test/x.js\">");
        assert!(!out.contains("script"));
    }

    #[test]
    fn event_handlers_are_stripped() {
        let html = r#"<a href="https://example.com" onclick="steal()">Link</a>"#;
        let out = sanitize(html);

        assert!(!out.contains("onclick"));
        assert!(out.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn javascript_urls_are_neutralized() {
        let html = r#"<a href="javascript:alert(1)">Click</a>"#;
        let out = sanitize(html);

        assert!(!out.contains("javascript:"));
        assert!(out.contains(r##"href="#""##));
    }

    #[test]
    fn double_encoded_entities_are_decoded() {
        assert_eq!(sanitize("Tom &amp;amp; Jerry"), "Tom & Jerry");
        assert_eq!(sanitize("Tom &amp; Jerry"), "Tom & Jerry");
        // Encoded angle brackets stay encoded.
        assert_eq!(sanitize("5 &lt; 10"), "5 &lt; 10");
        assert_eq!(sanitize("5 &amp;lt; 10"), "5 &lt; 10");
    }

    #[test]
    fn quotes_and_spacing_entities_are_normalized() {
        assert_eq!(sanitize("a&nbsp;b"), "a b");
        assert_eq!(sanitize("&quot;quoted&quot;"), "\"quoted\"");
        assert_eq!(sanitize("it\u{2019}s \u{201C}fine\u{201D}"), "it's \"fine\"");
    }

    #[test]
    fn empty_headings_and_rules_are_dropped() {
        let html = "<h2>  </h2><p>Text</p>\n---\n<p>More</p>";
        let out = sanitize(html);

        assert!(!out.contains("<h2>"));
        assert!(!out.contains("---"));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let html = r#"<p onclick="x()">Hi &amp;amp; bye</p><script>a()</script>"#;
        let once = sanitize(html);
        assert_eq!(sanitize(&once), once);
    }
}
