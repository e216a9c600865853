//! Typed encode/decode between node-document trees and Rust values.
//!
//! A document is an ordered sequence of named [`Node`]s; a node carries
//! positional [`Scalar`] arguments, named properties, and nested children.
//! `doctree` maps such trees to strongly-typed values and back through a
//! pair of per-type conversion traits, [`Decode`] and [`Encode`], each with
//! one method per tree level (document, node, scalar value). Implementing a
//! trait for a type registers its conversion hook; built-in impls cover the
//! primitives, `Option`, sequences, sets, string-keyed maps, and the tree
//! types themselves, while the [`record!`], [`tagged!`], and
//! [`enumeration!`] macros define structs, tagged unions, and C-like enums
//! together with their impls.
//!
//! Decoding runs a fixed lifecycle: [`Initial::initial`] pre-populates the
//! value with its documented default, the structural `decode_*` method
//! fills it in place, and [`Decode::post_decode`] runs last. Name matching
//! is case- and dash/underscore-insensitive throughout (see [`eq_ident`]),
//! later sources override earlier ones (duplicate sibling nodes, properties
//! shadowed by children), and failures surface as the single [`Error`]
//! kind.
//!
//! The textual representation is out of scope: this crate consumes and
//! produces already-parsed trees.
//!
//! # Example
//! ```rust
//! use doctree::*;
//!
//! record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Server {
//!         host: String,
//!         port: u16,
//!         tls: bool,
//!     }
//! }
//!
//! let server = Server {
//!     host: "localhost".to_string(),
//!     port: 8080,
//!     tls: true,
//! };
//!
//! // encode to a document: one node per field
//! let doc = Document::encode(&server).unwrap();
//! assert_eq!(doc.get("port").unwrap().args()[0].int(), Some(8080));
//!
//! // decode back: the round trip is lossless
//! let back: Server = doc.decode().unwrap();
//! assert_eq!(back, server);
//! ```

#![warn(missing_docs)]

pub mod ds;
pub mod encode;
mod macros;

pub use crate::ds::{eq_ident, Document, Node, Scalar, Value};
pub use crate::encode::{one_arg, Decode, Encode, Enumeration, Error, Initial};
