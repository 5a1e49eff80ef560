//! callouts-core: build-time callout rewriting for mdast trees
//!
//! This crate provides:
//! - The callout vocabulary ([`CalloutKind`]) and its fixed icon table
//! - A single-pass tree rewrite that turns `> [!TYPE]` blockquotes into
//!   classified, title-augmented callouts
//!
//! The pass operates on an already-parsed tree; it never sees raw markdown
//! text, performs no I/O, and has no failure channel. Blockquotes that do
//! not match the lead-marker convention pass through untouched.
//!
//! # Example
//!
//! ```rust
//! use callouts_core::transform;
//! use callouts_mdast::{Node, Root};
//!
//! let doc = Root::new(vec![Node::blockquote(vec![Node::paragraph(vec![
//!     Node::link_reference("!note"),
//!     Node::text("\nRemember this."),
//! ])])]);
//!
//! let doc = transform(doc);
//!
//! // The blockquote now opens with the synthetic title node, followed by
//! // the original body paragraph.
//! let Node::Blockquote(quote) = &doc.children[0] else {
//!     unreachable!()
//! };
//! assert_eq!(quote.children.len(), 2);
//! assert_eq!(quote.data.as_ref().unwrap().classes(), ["callout", "callout-note"]);
//! ```

pub mod kind;
pub mod transform;

pub use kind::CalloutKind;
pub use transform::{rewrite_callouts, scan_callouts, transform};
