//! Presentation classes
//!
//! The blog renderer styles content through a fixed Tailwind vocabulary
//! keyed off the `beautiful-prose` marker class. Elements that already
//! carry a class attribute are left alone, which also makes annotation
//! idempotent.

use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const H1_CLASSES: &str =
    "beautiful-prose text-4xl md:text-5xl font-black mb-8 leading-tight text-black";
pub const H2_CLASSES: &str = "beautiful-prose text-3xl font-bold text-black mb-6 mt-12";
pub const H3_CLASSES: &str = "beautiful-prose text-2xl font-semibold text-black mb-4 mt-8";
pub const P_CLASSES: &str = "beautiful-prose text-lg leading-relaxed text-gray-700 mb-6";
pub const UL_CLASSES: &str = "beautiful-prose space-y-4 my-8";
pub const OL_CLASSES: &str = "beautiful-prose my-8";
pub const LI_CLASSES: &str = "beautiful-prose relative pl-8 text-lg leading-relaxed text-gray-700";
pub const A_CLASSES: &str = "beautiful-prose text-blue-600 hover:text-purple-600 font-semibold \
     transition-colors duration-300 underline decoration-2 underline-offset-2 \
     hover:decoration-purple-600";
pub const BLOCKQUOTE_CLASSES: &str = "beautiful-prose border-l-4 border-blue-500 pl-6 py-4 my-8 \
     bg-gradient-to-r from-blue-50 to-purple-50 rounded-r-lg italic text-xl text-gray-700";
pub const STRONG_CLASSES: &str = "font-bold text-inherit";
pub const IMG_CLASSES: &str = "rounded-lg shadow-lg w-full h-auto";

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(h1|h2|h3|p|ul|ol|li|a|blockquote|strong|img)((?:\s[^>]*)?)>").unwrap()
});

/// The class set a given element receives, empty when it gets none
pub fn classes_for(tag: &str) -> &'static str {
    match tag {
        "h1" => H1_CLASSES,
        "h2" => H2_CLASSES,
        "h3" => H3_CLASSES,
        "p" => P_CLASSES,
        "ul" => UL_CLASSES,
        "ol" => OL_CLASSES,
        "li" => LI_CLASSES,
        "a" => A_CLASSES,
        "blockquote" => BLOCKQUOTE_CLASSES,
        "strong" => STRONG_CLASSES,
        "img" => IMG_CLASSES,
        _ => "",
    }
}

/// Adds the renderer's class set to every styled element that lacks one
pub fn annotate(html: &str) -> String {
    OPEN_TAG
        .replace_all(html, |caps: &Captures| {
            let tag = caps[1].to_lowercase();
            let attrs = &caps[2];
            if attrs.to_lowercase().contains("class=") {
                return caps[0].to_string();
            }
            let classes = classes_for(&tag);
            if classes.is_empty() {
                return caps[0].to_string();
            }
            let (attrs_core, self_close) = match attrs.trim_end().strip_suffix('/') {
                Some(rest) => (rest.trim_end(), " /"),
                None => (attrs.trim_end(), ""),
            };
            format!(r#"<{tag}{attrs_core} class="{classes}"{self_close}>"#)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_elements_gain_classes() {
        let html = "<h2>Why Links Matter</h2><p>Because rankings.</p>";
        let out = annotate(html);

        assert!(out.contains(&format!(r#"<h2 class="{}">"#, H2_CLASSES)));
        assert!(out.contains(&format!(r#"<p class="{}">"#, P_CLASSES)));
    }

    #[test]
    fn existing_classes_are_preserved() {
        let html = r#"<p class="intro">Hello</p>"#;
        assert_eq!(annotate(html), html);
    }

    #[test]
    fn annotation_is_idempotent() {
        let once = annotate("<h3>Checklist</h3><ul><li>One</li></ul>");
        assert_eq!(annotate(&once), once);
    }

    #[test]
    fn self_closing_img_stays_self_closing() {
        let out = annotate(r#"<img src="/chart.png" />"#);
        assert!(out.contains(&format!(r#"class="{}" /"#, IMG_CLASSES)));
    }
}
