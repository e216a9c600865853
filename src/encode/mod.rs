//! [`Encode`] and [`Decode`] for converting between data structures and
//! document trees.
//!
//! Both directions share one dispatch philosophy: a generic entry point on
//! the tree type ([`Document::decode`], [`Node::decode`], [`Scalar::decode`]
//! and the `encode` counterparts) delegates to a trait method chosen by the
//! level of the tree: document, node, or scalar value. Implementing
//! [`Decode`] or [`Encode`] for a type *is* registering the conversion hook
//! for that type: the impl runs exclusively, and the provided method
//! defaults carry the built-in cross-level rules (for example, a scalar
//! target decoding from a node unwraps the node's single argument).
//!
//! Decoding additionally runs a fixed lifecycle around the structural
//! conversion: [`Initial::initial`] pre-populates the value with its
//! documented default, the `decode_*` method fills it in place, and
//! [`Decode::post_decode`] runs afterwards for derived fixups.
//!
//! # Examples
//! Built-in rules cover the primitives and the std collections.
//!
//! ```rust
//! # use doctree::*;
//! let mut node = Node::new("retries");
//! node.push_arg(3i64);
//!
//! let retries: u32 = node.decode().unwrap();
//! assert_eq!(retries, 3);
//! ```
//!
//! An example of a round trip through a document.
//!
//! ```rust
//! # use doctree::*;
//! let values = vec![1i32, 2, 3];
//!
//! let doc = Document::encode(&values).unwrap();
//! assert_eq!(doc.len(), 3);
//! assert_eq!(doc.nodes()[0].name(), "-");
//!
//! let back: Vec<i32> = doc.decode().unwrap();
//! assert_eq!(back, values);
//! ```

use crate::{Document, Node, Scalar, Value};

mod decoder;
mod encoder;
#[cfg(feature = "chrono")]
mod time;

pub use self::decoder::{one_arg, Decode, Enumeration, Initial};
pub use self::encoder::Encode;

/// A conversion failure.
///
/// The engine carries a single error kind with a descriptive message. Any
/// contract violation (kind mismatch, missing named lookup, wrong argument
/// count, sparse-enumeration integer decode) raises it and aborts the
/// current call; there is no partial-result recovery. The one place the
/// engine recovers internally is the node-level [`Option`] leniency, which
/// downgrades a failure of the wrapped type to "absent".
///
/// Custom hooks fail with [`Error::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Error(String);

impl Error {
    /// A new error with the given message.
    pub fn new<M: Into<String>>(message: M) -> Self {
        Error(message.into())
    }

    pub(crate) fn mismatch(expected: &str, found: &Value) -> Self {
        let found = match found {
            Value::Null | Value::Empty => found.kind().to_string(),
            other => format!("{} `{}`", other.kind(), other),
        };
        Error(format!("invalid kind: {}, expected {}", found, expected))
    }

    pub(crate) fn arg_count(found: usize) -> Self {
        Error(format!("expected a single argument, found {}", found))
    }

    pub(crate) fn out_of_range(field: usize, available: usize) -> Self {
        Error(format!(
            "field {} out of range: {} element(s) available",
            field, available
        ))
    }

    pub(crate) fn missing_node(name: &str) -> Self {
        Error(format!("no node named \"{}\" in document", name))
    }
}

impl Document {
    /// Decode the document into a `T`.
    ///
    /// Runs the full lifecycle: [`Initial::initial`], then
    /// [`Decode::decode_document`] in place, then [`Decode::post_decode`].
    ///
    /// # Example
    /// ```rust
    /// # use doctree::*;
    /// let mut doc = Document::new();
    /// let mut node = Node::new("-");
    /// node.push_arg("one");
    /// doc.push(node);
    ///
    /// let items: Vec<String> = doc.decode().unwrap();
    /// assert_eq!(items, vec!["one".to_string()]);
    /// ```
    pub fn decode<T: Decode>(&self) -> Result<T, Error> {
        let mut value = T::initial();
        value.decode_document(self)?;
        value.post_decode()?;
        Ok(value)
    }

    /// Decode a single node of the document, looked up by name.
    ///
    /// The lookup is identifier-insensitive and returns the
    /// **last-declared** match (see [`Document::get`]); finding no match is
    /// a fatal lookup error.
    ///
    /// # Example
    /// ```rust
    /// # use doctree::*;
    /// let mut doc = Document::new();
    /// let mut node = Node::new("port");
    /// node.push_arg(8080i64);
    /// doc.push(node);
    ///
    /// assert_eq!(doc.decode_named::<u16>("port"), Ok(8080));
    /// assert!(doc.decode_named::<u16>("host").is_err());
    /// ```
    pub fn decode_named<T: Decode>(&self, name: &str) -> Result<T, Error> {
        match self.get(name) {
            Some(node) => node.decode(),
            None => Err(Error::missing_node(name)),
        }
    }

    /// Encode a value as a document.
    ///
    /// Convenience for [`Encode::encode_document`].
    pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Self, Error> {
        value.encode_document()
    }
}

impl Node {
    /// Decode the node into a `T`.
    ///
    /// Runs the full lifecycle: [`Initial::initial`], then
    /// [`Decode::decode_node`] in place, then [`Decode::post_decode`].
    pub fn decode<T: Decode>(&self) -> Result<T, Error> {
        let mut value = T::initial();
        value.decode_node(self)?;
        value.post_decode()?;
        Ok(value)
    }

    /// Encode a value as a node with the given name.
    ///
    /// Convenience for [`Encode::encode_node`].
    ///
    /// # Example
    /// ```rust
    /// # use doctree::*;
    /// let node = Node::encode(&3u8, "retries").unwrap();
    /// assert_eq!(node.name(), "retries");
    /// assert_eq!(node.args()[0].int(), Some(3));
    /// ```
    pub fn encode<T: Encode + ?Sized>(value: &T, name: &str) -> Result<Self, Error> {
        value.encode_node(name)
    }
}

impl Scalar {
    /// Decode the scalar into a `T`.
    ///
    /// Runs the full lifecycle: [`Initial::initial`], then
    /// [`Decode::decode_value`] in place, then [`Decode::post_decode`].
    pub fn decode<T: Decode>(&self) -> Result<T, Error> {
        let mut value = T::initial();
        value.decode_value(self)?;
        value.post_decode()?;
        Ok(value)
    }

    /// Encode a value as a scalar.
    ///
    /// Convenience for [`Encode::encode_value`].
    pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Self, Error> {
        value.encode_value()
    }
}
