//! callouts-mdast: mdast types for the callouts transformation engine
//!
//! This crate provides:
//! - mdast (Markdown Abstract Syntax Tree) types (subset)
//! - Renderer-hint metadata (`data.hProperties.className`)
//! - serde derives compatible with the mdast JSON shape
//!
//! ## Example
//!
//! ```rust
//! use callouts_mdast::{Node, Root};
//!
//! let doc = Root::new(vec![
//!     Node::heading(1, vec![Node::text("Hello")]),
//!     Node::paragraph(vec![Node::text("World")]),
//! ]);
//!
//! let json = serde_json::to_string(&doc).unwrap();
//! assert!(json.contains("\"type\":\"heading\""));
//! ```

pub mod mdast;

pub use mdast::{
    Align, Blockquote, Code, Emphasis, HProperties, Heading, Html, Image, InlineCode, Link,
    LinkReference, List, ListItem, Node, NodeData, Paragraph, ReferenceType, Root, Strong, Table,
    TableCell, TableRow, Text,
};
