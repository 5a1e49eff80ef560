//! The callout rewriting pass.
//!
//! A single synchronous depth-first walk over one document tree. Blockquotes
//! that open with a recognized lead marker are rewritten; everything else
//! passes through untouched. Unmatched input is a successful outcome, not an
//! error: the pass has no failure channel and performs no I/O.

use callouts_mdast::{Blockquote, Node, NodeData, Paragraph, Root};

use crate::kind::CalloutKind;

/// Class present on every rewritten callout
const CALLOUT_CLASS: &str = "callout";
/// Class on the synthetic title node
const TITLE_CLASS: &str = "callout-title";

/// Rewrite every marked blockquote in the tree, consuming and returning it.
///
/// This is the pipeline entry point: it runs once per document, between
/// parsing and rendering. Each blockquote is rewritten independently, so
/// document order has no cross-node effect.
pub fn transform(mut root: Root) -> Root {
    rewrite_callouts(&mut root);
    root
}

/// Rewrite every marked blockquote in the tree, in place.
///
/// Returns the number of blockquotes rewritten. Running the pass again on an
/// already-rewritten tree finds no lead markers and changes nothing.
pub fn rewrite_callouts(root: &mut Root) -> usize {
    let mut rewritten = 0;
    for node in &mut root.children {
        rewrite_node(node, &mut rewritten);
    }
    rewritten
}

/// List the callouts the tree contains, in document order, without
/// rewriting anything.
///
/// Applies the same guards as [`rewrite_callouts`], so the result is exactly
/// the set of blockquotes that pass would rewrite.
pub fn scan_callouts(root: &Root) -> Vec<CalloutKind> {
    let mut found = Vec::new();
    for node in &root.children {
        scan_node(node, &mut found);
    }
    found
}

fn rewrite_node(node: &mut Node, rewritten: &mut usize) {
    if let Node::Blockquote(quote) = node
        && let Some(kind) = lead_marker(quote)
    {
        apply_rewrite(quote, kind);
        *rewritten += 1;
    }
    // Descend into rewritten callouts too: blockquotes inside a callout body
    // are judged independently on their own lead markers.
    if let Some(children) = node.children_mut() {
        for child in children {
            rewrite_node(child, rewritten);
        }
    }
}

fn scan_node(node: &Node, found: &mut Vec<CalloutKind>) {
    if let Node::Blockquote(quote) = node
        && let Some(kind) = lead_marker(quote)
    {
        found.push(kind);
    }
    if let Some(children) = node.children() {
        for child in children {
            scan_node(child, found);
        }
    }
}

/// Recognize the lead-marker convention on a blockquote.
///
/// The blockquote must open with a paragraph whose first inline child is a
/// link reference whose identifier is `!` + one of the five keywords. Every
/// other shape is "not a callout" rather than an error.
fn lead_marker(quote: &Blockquote) -> Option<CalloutKind> {
    let Some(Node::Paragraph(paragraph)) = quote.children.first() else {
        return None;
    };
    let Some(Node::LinkReference(marker)) = paragraph.children.first() else {
        return None;
    };
    CalloutKind::from_marker(&marker.identifier)
}

/// Rewrite a blockquote whose lead marker matched `kind`.
fn apply_rewrite(quote: &mut Blockquote, kind: CalloutKind) {
    // Strip the marker from the lead paragraph and trim the whitespace that
    // followed it in source text. The paragraph itself goes away if the
    // marker was its only content.
    let mut drop_lead_paragraph = false;
    if let Some(Node::Paragraph(paragraph)) = quote.children.first_mut() {
        paragraph.children.remove(0);
        if let Some(Node::Text(text)) = paragraph.children.first_mut()
            && text.value.starts_with(char::is_whitespace)
        {
            text.value = text.value.trim_start().to_owned();
        }
        drop_lead_paragraph = paragraph.children.is_empty();
    }
    if drop_lead_paragraph {
        quote.children.remove(0);
    }

    quote.data = Some(NodeData::with_classes([
        CALLOUT_CLASS.to_owned(),
        format!("{CALLOUT_CLASS}-{kind}"),
    ]));
    quote.children.insert(0, title_node(kind));
}

/// Build the synthetic title node: icon glyph plus capitalized keyword.
fn title_node(kind: CalloutKind) -> Node {
    Node::Paragraph(Paragraph {
        children: vec![Node::html(kind.icon()), Node::text(kind.title())],
        data: Some(NodeData::with_classes([TITLE_CLASS])),
    })
}
