//! Block structure for plain-text bodies
//!
//! Posts stored as plain text (or markdown without any HTML) are rebuilt
//! into the block elements the renderer expects: headings, lists,
//! blockquotes, and paragraphs. Inline repair runs inside every block.

use crate::classes::{
    BLOCKQUOTE_CLASSES, H1_CLASSES, H2_CLASSES, H3_CLASSES, LI_CLASSES, OL_CLASSES, P_CLASSES,
    UL_CLASSES,
};
use crate::inline;
use regex::Regex;
use std::sync::LazyLock;

static ORDERED_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").unwrap());

/// One parsed block of a plain-text body
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Heading(u8, String),
    Bullets(Vec<String>),
    Ordered(Vec<String>),
    Quote(Vec<String>),
    Paragraph(Vec<String>),
}

/// Renders a plain-text body as block HTML
pub fn render(text: &str) -> String {
    let blocks = parse(text);
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        out.push(render_block(&block));
    }
    out.join("\n")
}

fn parse(text: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            continue;
        }

        if let Some((level, heading)) = heading_line(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::Heading(level, heading));
        } else if let Some(item) = bullet_line(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            match blocks.last_mut() {
                Some(Block::Bullets(items)) => items.push(item),
                _ => blocks.push(Block::Bullets(vec![item])),
            }
        } else if let Some(item) = ordered_line(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            match blocks.last_mut() {
                Some(Block::Ordered(items)) => items.push(item),
                _ => blocks.push(Block::Ordered(vec![item])),
            }
        } else if let Some(quoted) = trimmed.strip_prefix("> ") {
            flush_paragraph(&mut blocks, &mut paragraph);
            match blocks.last_mut() {
                Some(Block::Quote(lines)) => lines.push(quoted.to_string()),
                _ => blocks.push(Block::Quote(vec![quoted.to_string()])),
            }
        } else {
            paragraph.push(trimmed.to_string());
        }
    }
    flush_paragraph(&mut blocks, &mut paragraph);

    blocks
}

fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<String>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(std::mem::take(paragraph)));
    }
}

fn heading_line(line: &str) -> Option<(u8, String)> {
    for (marker, level) in [("### ", 3u8), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some((level, rest.trim().to_string()));
        }
    }
    None
}

fn bullet_line(line: &str) -> Option<String> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim().to_string());
        }
    }
    None
}

fn ordered_line(line: &str) -> Option<String> {
    ORDERED_MARKER
        .find(line)
        .map(|m| line[m.end()..].trim().to_string())
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading(level, text) => {
            let classes = match level {
                1 => H1_CLASSES,
                2 => H2_CLASSES,
                _ => H3_CLASSES,
            };
            format!(
                r#"<h{level} class="{classes}">{}</h{level}>"#,
                inline::apply(text)
            )
        }
        Block::Bullets(items) => render_list("ul", UL_CLASSES, items),
        Block::Ordered(items) => render_list("ol", OL_CLASSES, items),
        Block::Quote(lines) => {
            format!(
                r#"<blockquote class="{BLOCKQUOTE_CLASSES}"><p class="{P_CLASSES}">{}</p></blockquote>"#,
                inline::apply(&lines.join(" "))
            )
        }
        Block::Paragraph(lines) => {
            format!(
                r#"<p class="{P_CLASSES}">{}</p>"#,
                inline::apply(&lines.join(" "))
            )
        }
    }
}

fn render_list(tag: &str, classes: &str, items: &[String]) -> String {
    let mut out = format!(r#"<{tag} class="{classes}">"#);
    for item in items {
        out.push_str(&format!(
            r#"<li class="{LI_CLASSES}">{}</li>"#,
            inline::apply(item)
        ));
    }
    out.push_str(&format!("</{tag}>"));
    out
}
