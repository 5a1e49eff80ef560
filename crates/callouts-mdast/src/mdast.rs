//! mdast (Markdown Abstract Syntax Tree) types
//!
//! A subset of mdast nodes needed for document transformation.
//! Reference: https://github.com/syntax-tree/mdast

use serde::{Deserialize, Serialize};

/// Root node of an mdast document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub children: Vec<Node>,
}

/// An mdast node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    // Block nodes
    Heading(Heading),
    Paragraph(Paragraph),
    ThematicBreak,
    Blockquote(Blockquote),
    List(List),
    ListItem(ListItem),
    Code(Code),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),

    // Inline nodes
    Text(Text),
    Emphasis(Emphasis),
    Strong(Strong),
    InlineCode(InlineCode),
    Break,
    Link(Link),
    LinkReference(LinkReference),
    Image(Image),

    // Raw markup passed through to the renderer verbatim
    Html(Html),
}

/// Out-of-band metadata attached to a node for downstream stages.
///
/// Mirrors mdast's `data` field; `hProperties` is the conventional slot the
/// rendering stage reads element attributes from. The tree structure never
/// depends on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_properties: Option<HProperties>,
}

/// Element attributes for the rendering stage
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HProperties {
    /// CSS classes the renderer applies to the element
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class_name: Vec<String>,
}

impl NodeData {
    /// Renderer-hint data carrying only a class list
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            h_properties: Some(HProperties {
                class_name: classes.into_iter().map(Into::into).collect(),
            }),
        }
    }

    /// The class list, if any
    pub fn classes(&self) -> &[String] {
        self.h_properties
            .as_ref()
            .map_or(&[], |props| props.class_name.as_slice())
    }
}

/// Heading node (# to ######)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    pub children: Vec<Node>,
}

/// Paragraph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
}

/// Blockquote node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blockquote {
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
}

/// List node (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u32>,
    pub spread: bool,
    pub children: Vec<Node>,
}

/// List item node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub spread: bool,
    pub children: Vec<Node>,
}

/// Code block node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    pub lang: Option<String>,
    pub meta: Option<String>,
    pub value: String,
}

/// Table node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub align: Vec<Option<Align>>,
    pub children: Vec<Node>,
}

/// Table row node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub children: Vec<Node>,
}

/// Table cell node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub children: Vec<Node>,
}

/// Table alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// Emphasis node (*text* or _text_)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub children: Vec<Node>,
}

/// Strong node (**text** or __text__)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strong {
    pub children: Vec<Node>,
}

/// Inline code node (`code`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineCode {
    pub value: String,
}

/// Link node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub children: Vec<Node>,
}

/// Reference style of a link reference, as recorded by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceType {
    Shortcut,
    Collapsed,
    Full,
}

/// Link reference node (`[text]` without an accompanying URL)
///
/// The parser normalizes the bracketed text into `identifier` (lower-cased)
/// and keeps the verbatim source text in `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReference {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<ReferenceType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// Image node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub title: Option<String>,
    pub alt: String,
}

/// Raw markup node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    pub value: String,
}

// Convenience constructors
impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(Text { value: s.into() })
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph {
            children,
            data: None,
        })
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Node::Blockquote(Blockquote {
            children,
            data: None,
        })
    }

    pub fn heading(depth: u8, children: Vec<Node>) -> Self {
        Node::Heading(Heading { depth, children })
    }

    pub fn code(lang: Option<String>, value: impl Into<String>) -> Self {
        Node::Code(Code {
            lang,
            meta: None,
            value: value.into(),
        })
    }

    pub fn inline_code(value: impl Into<String>) -> Self {
        Node::InlineCode(InlineCode {
            value: value.into(),
        })
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Node::Emphasis(Emphasis { children })
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Node::Strong(Strong { children })
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link(Link {
            url: url.into(),
            title: None,
            children,
        })
    }

    /// A shortcut-style link reference, as the parser produces for `[text]`
    pub fn link_reference(identifier: impl Into<String>) -> Self {
        Node::LinkReference(LinkReference {
            identifier: identifier.into(),
            label: None,
            reference_type: Some(ReferenceType::Shortcut),
            children: Vec::new(),
        })
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Node::Image(Image {
            url: url.into(),
            title: None,
            alt: alt.into(),
        })
    }

    pub fn list(ordered: bool, children: Vec<Node>) -> Self {
        Node::List(List {
            ordered,
            start: if ordered { Some(1) } else { None },
            spread: false,
            children,
        })
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Node::ListItem(ListItem {
            spread: false,
            children,
        })
    }

    pub fn table(align: Vec<Option<Align>>, children: Vec<Node>) -> Self {
        Node::Table(Table { align, children })
    }

    pub fn table_row(children: Vec<Node>) -> Self {
        Node::TableRow(TableRow { children })
    }

    pub fn table_cell(children: Vec<Node>) -> Self {
        Node::TableCell(TableCell { children })
    }

    pub fn html(value: impl Into<String>) -> Self {
        Node::Html(Html {
            value: value.into(),
        })
    }

    pub fn thematic_break() -> Self {
        Node::ThematicBreak
    }

    pub fn line_break() -> Self {
        Node::Break
    }
}

impl Node {
    /// The node's children, if it is a container
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Heading(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::Blockquote(n) => Some(&n.children),
            Node::List(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::Table(n) => Some(&n.children),
            Node::TableRow(n) => Some(&n.children),
            Node::TableCell(n) => Some(&n.children),
            Node::Emphasis(n) => Some(&n.children),
            Node::Strong(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::LinkReference(n) => Some(&n.children),
            Node::Text(_)
            | Node::Code(_)
            | Node::InlineCode(_)
            | Node::Image(_)
            | Node::Html(_)
            | Node::Break
            | Node::ThematicBreak => None,
        }
    }

    /// Mutable access to the node's children, if it is a container
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Heading(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Blockquote(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Table(n) => Some(&mut n.children),
            Node::TableRow(n) => Some(&mut n.children),
            Node::TableCell(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            Node::LinkReference(n) => Some(&mut n.children),
            Node::Text(_)
            | Node::Code(_)
            | Node::InlineCode(_)
            | Node::Image(_)
            | Node::Html(_)
            | Node::Break
            | Node::ThematicBreak => None,
        }
    }
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}
