//! Post title validation and repair
//!
//! Automation runs occasionally persist titles containing raw markup,
//! structured-data remnants, or whole URLs. These helpers detect such
//! titles and derive a clean replacement from the post body.

use regex::Regex;
use std::sync::LazyLock;

/// Words kept lowercase in titles unless position forces capitalization
const SMALL_WORDS: [&str; 18] = [
    "a", "an", "and", "as", "at", "but", "by", "for", "in", "nor", "of", "on", "or", "so", "the",
    "to", "up", "yet",
];

/// Industry initialisms always rendered uppercase
const INITIALISMS: [&str; 18] = [
    "seo", "serp", "sem", "ppc", "roi", "api", "url", "html", "css", "cta", "ai", "da", "dr",
    "pbn", "cms", "faq", "b2b", "b2c",
];

/// Markers of structured data leaking into a title column
const STRUCTURED_MARKERS: [&str; 3] = ["itemscope", "schema", "class="];

/// Tokens that disqualify a body fragment from becoming a title
const NOISE_WORDS: [&str; 6] = ["html", "output", "json", "schema", "doctype", "lorem"];

const MAX_TITLE_LEN: usize = 120;

static URL_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://|www\.").unwrap());
static H1_TEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap());
static TITLE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*\*\*\s*Title:\s*(.+?)\*\*").unwrap());
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Whether a stored title needs to be replaced
///
/// A title is broken when markup leaked into it: a raw tag, structured-data
/// keywords, or a bare URL. Clean plain text passes.
pub fn is_broken_title(title: &str) -> bool {
    let title = title.trim();
    if title.is_empty() {
        return true;
    }
    if title.contains('<') {
        return true;
    }
    let lower = title.to_lowercase();
    if STRUCTURED_MARKERS.iter().any(|m| lower.contains(m)) {
        return true;
    }
    URL_FRAGMENT.is_match(title)
}

/// Derives a replacement title from the post body
///
/// Preference order: the first `<h1>`, then a `**Title: ...**` marker line,
/// then the first sentence-like fragment of the text. Returns None when the
/// body offers nothing usable.
pub fn derive_title(content: &str) -> Option<String> {
    if let Some(caps) = H1_TEXT.captures(content) {
        if let Some(title) = finalize(&clean_fragment(&caps[1])) {
            return Some(title);
        }
    }

    if let Some(caps) = TITLE_MARKER.captures(content) {
        if let Some(title) = finalize(&clean_fragment(&caps[1])) {
            return Some(title);
        }
    }

    first_sentence_candidate(content).and_then(|text| finalize(&text))
}

/// Truncates and cases a candidate, rejecting anything that collapses to
/// nothing
fn finalize(text: &str) -> Option<String> {
    let truncated = truncate_at_word(text, MAX_TITLE_LEN);
    if truncated.is_empty() {
        None
    } else {
        Some(title_case(&truncated))
    }
}

/// Capitalizes a title the way the blog renders headings
///
/// Small function words stay lowercase unless they open the title, close
/// it, or follow a sentence boundary. Words already carrying capitals past
/// the first letter are kept as written; known initialisms are forced
/// uppercase.
pub fn title_case(input: &str) -> String {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.is_empty() {
        return String::new();
    }
    let last = words.len() - 1;

    let mut out = Vec::with_capacity(words.len());
    let mut at_boundary = true;
    for (i, word) in words.iter().enumerate() {
        let (prefix, core, suffix) = split_punctuation(word);
        let lower = core.to_lowercase();

        let cased = if core.is_empty() {
            (*word).to_string()
        } else if INITIALISMS.contains(&lower.as_str()) {
            lower.to_uppercase()
        } else if has_capital_past_first(core) {
            core.to_string()
        } else if SMALL_WORDS.contains(&lower.as_str()) && i != 0 && i != last && !at_boundary {
            lower
        } else {
            capitalize(&lower)
        };

        if core.is_empty() {
            out.push(cased);
        } else {
            out.push(format!("{prefix}{cased}{suffix}"));
        }
        at_boundary = matches!(suffix.chars().last(), Some('.' | ':' | '?' | '!'));
    }

    out.join(" ")
}

/// Strips tags and emphasis markers and collapses whitespace
fn clean_fragment(raw: &str) -> String {
    let without_tags = ANY_TAG.replace_all(raw, " ");
    let without_emphasis = without_tags.replace("**", "").replace('*', "");
    WHITESPACE
        .replace_all(without_emphasis.trim(), " ")
        .into_owned()
}

/// Finds the first fragment of body text that reads like a title
fn first_sentence_candidate(content: &str) -> Option<String> {
    for line in content.lines() {
        let line = clean_fragment(line);
        if line.is_empty() {
            continue;
        }
        for sentence in line.split(['.', '!', '?']) {
            let sentence = sentence.trim();
            if sentence.split_whitespace().count() < 3 {
                continue;
            }
            let lower = sentence.to_lowercase();
            if lower.contains("http") || lower.contains('{') || lower.contains('=') {
                continue;
            }
            if lower
                .split_whitespace()
                .any(|token| NOISE_WORDS.contains(&token.trim_matches(':')))
            {
                continue;
            }
            return Some(sentence.to_string());
        }
    }
    None
}

/// Shortens text to at most `max` bytes without splitting a word
fn truncate_at_word(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for word in text.split_whitespace() {
        let needed = if out.is_empty() {
            word.len()
        } else {
            word.len() + 1
        };
        if out.len() + needed > max {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Splits a word into leading punctuation, alphanumeric core, and trailing
/// punctuation
fn split_punctuation(word: &str) -> (&str, &str, &str) {
    let start = match word.find(|c: char| c.is_alphanumeric()) {
        Some(i) => i,
        None => return ("", "", word),
    };
    let end = word
        .rfind(|c: char| c.is_alphanumeric())
        .map(|i| {
            i + word[i..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1)
        })
        .unwrap_or(start);
    (&word[..start], &word[start..end], &word[end..])
}

fn has_capital_past_first(core: &str) -> bool {
    core.chars().skip(1).any(|c| c.is_uppercase())
}

fn capitalize(lower: &str) -> String {
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
