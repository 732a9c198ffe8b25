//! Whole-document normalization
//!
//! [`normalize_content`] is the entry point the batch reformatter calls per
//! row. It strips generation artifacts, decides whether the stored body is
//! HTML or plain text, routes it through the matching branch, and ends with
//! the same hardening steps either way. The result is stable: normalizing
//! the output again returns it unchanged, which is what lets the batch job
//! compare bytes to decide whether a row needs a write.

use crate::{blocks, classes, inline, sanitize};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static FENCE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*```[a-zA-Z]*\s*$\n?").unwrap());
static OUTPUT_PREAMBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\A\s*(?:html\s+)?output\s*:?\s*\n").unwrap());
static HERES_PREAMBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\A\s*here(?:'s|’s| is| are)?[^\n]{0,60}?(?:html|content|formatted|version|code)[^\n]{0,20}?:\s*\n")
        .unwrap()
});
static STRUCTURAL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|h[1-6]|ul|ol|li|div|article|section|blockquote|strong|em|a|img|br)\b")
        .unwrap()
});
static ARTICLE_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\A\s*<article[^>]*>(.*)</article>\s*\z").unwrap());
static MD_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(#{1,3})\s+(.+?)\s*$").unwrap());
static LEADING_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\A\s*<(h1|h2|p)\b[^>]*>(.*?)</(h1|h2|p)>\s*").unwrap());
static TAG_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static EXTRA_BLANKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalizes a stored post body into renderer-ready HTML
///
/// `title` is the post's (possibly derived) title; a leading heading or
/// paragraph duplicating it is dropped because the page template renders
/// the title itself.
pub fn normalize_content(title: Option<&str>, raw: &str) -> String {
    let text = strip_code_fences(raw);
    let text = strip_generation_preamble(&text);

    if looks_like_html(&text) {
        let text = unwrap_article(&text);
        let text = promote_markdown_headings(&text);
        let text = drop_duplicate_title(title, &text);
        let text = inline::heal_split_bold(&text);
        let text = inline::convert_emphasis(&text);
        let text = inline::convert_markdown_links(&text);
        let text = sanitize::sanitize(&text);
        let text = inline::autolink(&text);
        let text = inline::secure_external_links(&text);
        let text = inline::harden_images(&text);
        let text = classes::annotate(&text);
        EXTRA_BLANKS.replace_all(&text, "\n\n").trim().to_string()
    } else {
        let text = drop_duplicate_title_plain(title, &text);
        let html = blocks::render(&text);
        let html = sanitize::sanitize(&html);
        let html = inline::secure_external_links(&html);
        let html = inline::harden_images(&html);
        classes::annotate(&html).trim().to_string()
    }
}

/// Removes markdown code-fence lines, keeping whatever is inside
fn strip_code_fences(text: &str) -> String {
    FENCE_LINE.replace_all(text, "").into_owned()
}

/// Drops "HTML output:" / "Here is the formatted content:" lead-ins that
/// generators prepend to their answer
fn strip_generation_preamble(text: &str) -> String {
    let out = OUTPUT_PREAMBLE.replace(text, "");
    HERES_PREAMBLE.replace(&out, "").into_owned()
}

fn looks_like_html(text: &str) -> bool {
    STRUCTURAL_TAG.is_match(text)
}

/// Peels duplicate `<article>` wrappers the generator sometimes nests
fn unwrap_article(html: &str) -> String {
    let mut current = html.to_string();
    while let Some(caps) = ARTICLE_WRAPPER.captures(&current) {
        current = caps[1].to_string();
    }
    current
}

/// Converts stray markdown heading lines left inside HTML bodies
fn promote_markdown_headings(html: &str) -> String {
    MD_HEADING
        .replace_all(html, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned()
}

/// Drops leading headings or paragraphs that duplicate the title
///
/// Runs until the leading block no longer matches, so a title pasted twice
/// disappears in a single normalization.
fn drop_duplicate_title(title: Option<&str>, html: &str) -> String {
    let Some(title) = title else {
        return html.to_string();
    };
    let target = comparison_key(title);
    if target.is_empty() {
        return html.to_string();
    }

    let mut current = html.to_string();
    loop {
        let next = LEADING_BLOCK
            .replacen(&current, 1, |caps: &Captures| {
                if caps[1].eq_ignore_ascii_case(&caps[3]) {
                    let inner = comparison_key(&caps[2]);
                    if inner == target || inner == format!("title {target}") {
                        return String::new();
                    }
                }
                caps[0].to_string()
            })
            .into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Plain-text variant: drops leading lines that restate the title
fn drop_duplicate_title_plain(title: Option<&str>, text: &str) -> String {
    let Some(title) = title else {
        return text.to_string();
    };
    let target = comparison_key(title);
    if target.is_empty() {
        return text.to_string();
    }

    let mut out: Vec<&str> = Vec::new();
    let mut dropping = true;
    for line in text.lines() {
        if dropping {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let key = comparison_key(trimmed);
            let heading_key = comparison_key(trimmed.trim_start_matches('#').trim());
            if key == target || key == format!("title {target}") || heading_key == target {
                continue;
            }
            dropping = false;
        }
        out.push(line);
    }
    out.join("\n")
}

/// Reduces text to lowercase alphanumeric words for duplicate comparison
fn comparison_key(text: &str) -> String {
    let stripped = TAG_STRIP.replace_all(text, " ");
    let stripped = stripped.replace('*', " ");
    stripped
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn html_normalization_is_idempotent() {
        let raw = r#"<article>
<h1>The Guide</h1>
<p>**Bold** start with https://example.com/ref link.</p>
## Checklist
<ul><li>item one</li></ul>
<script>alert(1)</script>
<img src="/a.png">
</article>"#;

        let once = normalize_content(Some("The Guide"), raw);
        let twice = normalize_content(Some("The Guide"), &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn plain_normalization_is_idempotent() {
        let raw = "My Post Title\n\nIntro paragraph with **bold** text.\n\n- item one\n- item two\n\n1. step";
        let once = normalize_content(Some("My Post Title"), raw);
        let twice = normalize_content(Some("My Post Title"), &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn code_fences_are_stripped() {
        let out = normalize_content(None, "```html\n<p>Hi there</p>\n```");
        assert!(!out.contains("```"));
        assert!(out.contains("Hi there"));
    }

    #[test]
    fn generation_preambles_are_dropped() {
        let out = normalize_content(None, "Here is the formatted HTML:\n<p>Body text</p>");
        assert!(!out.contains("Here is"));
        assert!(out.contains("Body text"));

        let out = normalize_content(None, "HTML output:\n<p>Body text</p>");
        assert!(!out.contains("output"));
    }

    #[test]
    fn real_intro_lines_are_not_mistaken_for_preambles() {
        let raw = "Here are the top strategies:\n\n- guest posts\n- digital PR";
        let out = normalize_content(None, raw);
        assert!(out.contains("Here are the top strategies:"));
    }

    #[test]
    fn article_wrappers_are_unwrapped() {
        let out = normalize_content(None, "<article><article><p>Inner</p></article></article>");
        assert!(!out.contains("<article"));
        assert!(out.contains("Inner"));
    }

    #[test]
    fn leading_title_duplicate_is_dropped() {
        let out = normalize_content(
            Some("Link Building Guide"),
            "<h1>Link Building Guide</h1><p>Intro text here.</p>",
        );
        assert!(!out.contains("<h1"));
        assert!(out.contains("Intro text here."));
    }

    #[test]
    fn title_prefix_duplicate_is_dropped() {
        let out = normalize_content(
            Some("Link Building Guide"),
            "<p><strong>Title: Link Building Guide</strong></p><p>Intro.</p>",
        );
        assert!(!out.contains("Title:"));
        assert!(out.contains("Intro."));
    }

    #[test]
    fn doubled_title_disappears_in_one_pass() {
        let out = normalize_content(
            Some("The Guide"),
            "<h1>The Guide</h1><p>The Guide</p><p>Real intro.</p>",
        );
        assert!(!out.contains("The Guide"));
        assert!(out.contains("Real intro."));
    }

    #[test]
    fn plain_title_line_is_dropped() {
        let out = normalize_content(Some("My Post Title"), "My Post Title\n\nThe intro line.");
        assert!(!out.contains("My Post Title"));
        assert!(out.contains("The intro line."));
    }

    #[test]
    fn unrelated_leading_heading_survives() {
        let out = normalize_content(
            Some("Something Else"),
            "<h1>Link Building Guide</h1><p>Intro.</p>",
        );
        assert!(out.contains("Link Building Guide"));
    }

    #[test]
    fn markdown_headings_in_html_are_promoted() {
        let out = normalize_content(None, "<p>Intro.</p>\n## Next Steps\n<p>More.</p>");
        assert!(out.contains("<h2"));
        assert!(out.contains(">Next Steps</h2>"));
    }

    #[test]
    fn plain_text_becomes_classed_paragraphs() {
        let out = normalize_content(None, "Just one paragraph of text.");
        assert!(out.starts_with("<p class=\""));
        assert!(out.contains("Just one paragraph of text."));
    }

    #[test]
    fn scripts_are_removed_end_to_end() {
        let out = normalize_content(
            None,
            "<p>Before</p><script>document.cookie</script><p onclick=\"x()\">After</p>",
        );
        assert!(!out.contains("script"));
        assert!(!out.contains("onclick"));
        assert!(!out.contains("document.cookie"));
    }

    #[test]
    fn every_external_anchor_carries_noopener() {
        let raw = "<p>Read [the study](https://x.test/a) and https://y.test/b</p>\n<a href=\"https://z.test/c\">c</a>";
        let out = normalize_content(None, raw);

        let anchors = Regex::new(r#"(?i)<a\s[^>]*href="https?://[^>]*>"#).unwrap();
        let mut seen = 0;
        for tag in anchors.find_iter(&out) {
            seen += 1;
            assert!(
                tag.as_str().to_lowercase().contains("noopener"),
                "anchor missing noopener: {}",
                tag.as_str()
            );
        }
        assert_eq!(seen, 3);
    }
}
