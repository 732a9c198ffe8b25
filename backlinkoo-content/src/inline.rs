//! Inline formatting repair
//!
//! Converts the markdown remnants generated posts leave behind (emphasis
//! markers, markdown links, bare URLs) into the HTML the renderer expects,
//! and hardens anchors and images.

use crate::classes::{A_CLASSES, STRONG_CLASSES};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Generated content splits the first letter out of bold runs, most often
// in list items ("* **E**nhanced trust: ...").
static LIST_BOLD_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\s*[*+-]\s+)\*\*([A-Za-z])\*\*([a-z][^:\n]*:)").unwrap()
});
static BOLD_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([A-Za-z])\*\*([a-z]+)").unwrap());
static BOLD_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([A-Za-z][^:\n*<]*?):\*\*").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\n]+?)\*").unwrap());

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());
static ANCHOR_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>.*?</a>").unwrap());
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"')\]]+"#).unwrap());

static EXTERNAL_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<a\s([^>]*href\s*=\s*["']https?://[^>]*)>"#).unwrap());
static REL_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)rel\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());
static IMG_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").unwrap());

/// Runs every inline transform in order
pub fn apply(text: &str) -> String {
    let out = heal_split_bold(text);
    let out = convert_emphasis(&out);
    let out = convert_markdown_links(&out);
    autolink(&out)
}

/// Rejoins bold runs whose first letter was split off
pub fn heal_split_bold(text: &str) -> String {
    let out = LIST_BOLD_SPLIT.replace_all(text, "$1**$2$3**");
    BOLD_SPLIT.replace_all(&out, "**$1$2**").into_owned()
}

/// Converts `**bold**` and `*italic*` remnants to HTML
pub fn convert_emphasis(text: &str) -> String {
    let out = BOLD_LABEL.replace_all(text, |caps: &Captures| {
        format!(r#"<strong class="{}">{}:</strong>"#, STRONG_CLASSES, &caps[1])
    });
    let out = BOLD.replace_all(&out, |caps: &Captures| {
        format!(r#"<strong class="{}">{}</strong>"#, STRONG_CLASSES, &caps[1])
    });
    ITALIC.replace_all(&out, "<em>$1</em>").into_owned()
}

/// Converts `[text](url)` markdown links to styled anchors
///
/// External targets open in a new tab with `rel="noopener noreferrer"`;
/// relative targets stay same-tab.
pub fn convert_markdown_links(text: &str) -> String {
    MARKDOWN_LINK
        .replace_all(text, |caps: &Captures| {
            let label = &caps[1];
            let url = &caps[2];
            if url.starts_with("http://") || url.starts_with("https://") {
                format!(
                    r#"<a href="{url}" target="_blank" rel="noopener noreferrer" class="{A_CLASSES}">{label}</a>"#
                )
            } else {
                format!(r#"<a href="{url}" class="{A_CLASSES}">{label}</a>"#)
            }
        })
        .into_owned()
}

/// Wraps bare URLs in anchors, leaving existing markup alone
///
/// Anchors and tags are sheltered behind placeholders first so URLs inside
/// `href` attributes or anchor text are never wrapped twice.
pub fn autolink(text: &str) -> String {
    let text = text.replace('\u{1}', "");
    let mut stash: Vec<String> = Vec::new();

    let mut shelter = |re: &Regex, input: &str| -> String {
        re.replace_all(input, |caps: &Captures| {
            let token = format!("\u{1}{}\u{1}", stash.len());
            stash.push(caps[0].to_string());
            token
        })
        .into_owned()
    };

    let sheltered = shelter(&ANCHOR_SPAN, &text);
    let sheltered = shelter(&ANY_TAG, &sheltered);

    let linked = BARE_URL
        .replace_all(&sheltered, |caps: &Captures| {
            let url = caps[0].trim_end_matches(['.', ',', ';', ':', '!', '?']);
            let rest = &caps[0][url.len()..];
            format!(
                r#"<a href="{url}" target="_blank" rel="noopener noreferrer" class="{A_CLASSES}">{url}</a>{rest}"#
            )
        })
        .into_owned();

    let mut out = linked;
    for (i, original) in stash.iter().enumerate() {
        out = out.replace(&format!("\u{1}{i}\u{1}"), original);
    }
    out
}

/// Makes every external anchor carry `rel` with noopener and a target
pub fn secure_external_links(html: &str) -> String {
    EXTERNAL_ANCHOR
        .replace_all(html, |caps: &Captures| {
            let mut attrs = caps[1].trim_end().to_string();

            let lower = attrs.to_lowercase();
            if !(lower.starts_with("rel=") || lower.contains(" rel=")) {
                attrs.push_str(r#" rel="noopener noreferrer""#);
            } else if !lower.contains("noopener") {
                attrs = REL_ATTR
                    .replace(&attrs, |rel: &Captures| {
                        let existing = rel
                            .get(1)
                            .or(rel.get(2))
                            .map(|m| m.as_str())
                            .unwrap_or("");
                        format!(r#"rel="{existing} noopener""#)
                    })
                    .into_owned();
            }

            let lower = attrs.to_lowercase();
            if !(lower.starts_with("target=") || lower.contains(" target=")) {
                attrs.push_str(r#" target="_blank""#);
            }

            format!("<a {attrs}>")
        })
        .into_owned()
}

/// Gives every image lazy loading and a strict referrer policy
pub fn harden_images(html: &str) -> String {
    IMG_TAG
        .replace_all(html, |caps: &Captures| {
            let tag = caps[0].trim_end_matches('>');
            let (core, self_closing) = match tag.trim_end().strip_suffix('/') {
                Some(rest) => (rest.trim_end(), true),
                None => (tag.trim_end(), false),
            };

            let lower = core.to_lowercase();
            let mut out = core.to_string();
            if !lower.contains("loading=") {
                out.push_str(r#" loading="lazy""#);
            }
            if !lower.contains("referrerpolicy=") {
                out.push_str(r#" referrerpolicy="no-referrer""#);
            }
            out.push_str(if self_closing { " />" } else { ">" });
            out
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_markdown_becomes_strong() {
        let out = convert_emphasis("This **really** matters");
        assert_eq!(
            out,
            format!(r#"This <strong class="{STRONG_CLASSES}">really</strong> matters"#)
        );
    }

    #[test]
    fn italic_markdown_becomes_em() {
        let out = convert_emphasis("a *subtle* hint");
        assert_eq!(out, "a <em>subtle</em> hint");
    }

    #[test]
    fn split_bold_is_healed() {
        let out = apply("**E**nhanced outreach works");
        assert!(out.contains("Enhanced</strong>"));
        assert!(!out.contains("**"));
    }

    #[test]
    fn split_bold_in_list_items_keeps_label() {
        let out = apply("* **E**nhanced trust: readers come back");
        assert!(out.contains("Enhanced trust:</strong>"));
    }

    #[test]
    fn orphan_bold_labels_are_closed() {
        let out = convert_emphasis("Key Takeaways:**\nmore text");
        assert!(out.contains("Key Takeaways:</strong>"));
        assert!(!out.contains(":**"));
    }

    #[test]
    fn markdown_links_become_external_anchors() {
        let out = convert_markdown_links("see [the study](https://example.com/study)");
        assert!(out.contains(r#"href="https://example.com/study""#));
        assert!(out.contains(r#"target="_blank""#));
        assert!(out.contains("noopener"));
        assert!(out.contains(">the study</a>"));
    }

    #[test]
    fn relative_markdown_links_stay_same_tab() {
        let out = convert_markdown_links("see [our guide](/blog/guide)");
        assert!(out.contains(r#"href="/blog/guide""#));
        assert!(!out.contains("target="));
    }

    #[test]
    fn bare_urls_are_wrapped() {
        let out = autolink("Read https://example.com/post for more.");
        assert!(out.contains(r#"<a href="https://example.com/post""#));
        assert!(out.contains(">https://example.com/post</a>"));
        // The sentence period stays outside the anchor.
        assert!(out.ends_with("</a> for more."));
    }

    #[test]
    fn urls_inside_existing_markup_are_left_alone() {
        let html = r#"<a href="https://example.com">example</a> and <img src="https://x.test/a.png">"#;
        assert_eq!(autolink(html), html);
    }

    #[test]
    fn autolink_is_idempotent() {
        let once = autolink("visit https://backlinkoo.com today");
        assert_eq!(autolink(&once), once);
    }

    #[test]
    fn external_anchors_gain_rel_and_target() {
        let out = secure_external_links(r#"<a href="https://example.com">x</a>"#);
        assert!(out.contains(r#"rel="noopener noreferrer""#));
        assert!(out.contains(r#"target="_blank""#));
    }

    #[test]
    fn existing_rel_is_extended_not_replaced() {
        let out = secure_external_links(r#"<a href="https://example.com" rel="nofollow">x</a>"#);
        assert!(out.contains(r#"rel="nofollow noopener""#));
    }

    #[test]
    fn internal_anchors_are_untouched() {
        let html = r#"<a href="/pricing">pricing</a>"#;
        assert_eq!(secure_external_links(html), html);
    }

    #[test]
    fn securing_links_is_idempotent() {
        let once = secure_external_links(r#"<a href="http://example.com">x</a>"#);
        assert_eq!(secure_external_links(&once), once);
    }

    #[test]
    fn images_gain_lazy_loading() {
        let out = harden_images(r#"<img src="/chart.png" alt="chart">"#);
        assert!(out.contains(r#"loading="lazy""#));
        assert!(out.contains(r#"referrerpolicy="no-referrer""#));
    }

    #[test]
    fn image_attributes_are_not_duplicated() {
        let once = harden_images(r#"<img src="/a.png" loading="eager">"#);
        assert!(once.contains(r#"loading="eager""#));
        assert!(!once.contains(r#"loading="lazy""#));
        assert_eq!(harden_images(&once), once);
    }
}
