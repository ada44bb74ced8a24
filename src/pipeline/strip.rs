//! Markup stripping for chaptered content units.
//!
//! Converts a unit's raw XHTML into plain text while preserving block
//! structure: block-level boundaries become single newlines, whitespace
//! inside a block collapses to single spaces (so source line-wrapping leaves
//! no artefacts), and non-content elements (`script`, `style`, `head`) are
//! dropped entirely.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Elements whose text content is never document content.
const SKIP_TAGS: &[&str] = &["script", "style", "head", "title", "noscript"];

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "li"
            | "ul"
            | "ol"
            | "dl"
            | "dt"
            | "dd"
            | "blockquote"
            | "pre"
            | "br"
            | "hr"
            | "table"
            | "tr"
            | "section"
            | "article"
            | "aside"
            | "header"
            | "footer"
            | "figure"
            | "figcaption"
    )
}

/// Strip presentation markup from one content unit.
///
/// Block-level boundaries are kept as single newlines; everything inside a
/// block flows on one line regardless of how the source wrapped it.
pub fn strip_markup(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let mut raw = String::new();
    collect_text(document.tree.root(), &mut raw);

    // One pass over the raw lines: collapse intra-line whitespace, drop the
    // blank lines left behind by adjacent block boundaries.
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => push_inline_text(out, text),
            Node::Element(element) => {
                let tag = element.name();
                if SKIP_TAGS.contains(&tag) {
                    continue;
                }
                let block = is_block(tag);
                if block {
                    out.push('\n');
                }
                collect_text(child, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Push a text node, collapsing internal whitespace runs (including source
/// newlines) to single spaces while keeping word boundaries that straddle
/// inline tags.
fn push_inline_text(out: &mut String, text: &str) {
    let ends_with_space = |s: &String| s.ends_with(|c: char| c.is_whitespace());

    if text.trim().is_empty() {
        if !out.is_empty() && !ends_with_space(out) {
            out.push(' ');
        }
        return;
    }

    if text.starts_with(|c: char| c.is_whitespace()) && !out.is_empty() && !ends_with_space(out) {
        out.push(' ');
    }
    out.push_str(&text.split_whitespace().collect::<Vec<_>>().join(" "));
    if text.ends_with(|c: char| c.is_whitespace()) {
        out.push(' ');
    }
}
