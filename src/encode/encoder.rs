use super::Error;
use crate::{ds::Numeric, Document, Node, Scalar, Value};
use std::any::type_name;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ffi::CString;

/// The encode hook: conversion into the document tree, one method per tree
/// level.
///
/// Implementing `Encode` for a type registers its conversion; the impl runs
/// exclusively for that type. Only the method for the level being encoded
/// is consulted, and the provided defaults carry the built-in cross-level
/// rules:
///
/// - `encode_node` wraps [`encode_value`](Encode::encode_value) as the sole
///   positional argument of a node, the rule for any value with no more
///   specific node encoding;
/// - `encode_document` has no general rule and fails.
///
/// # Implementing
/// Most types go through the [`record!`], [`tagged!`], and [`enumeration!`]
/// macros. A manual impl only has to supply the scalar form:
///
/// ```rust
/// use doctree::*;
///
/// struct Celsius(f64);
///
/// impl Encode for Celsius {
///     fn encode_value(&self) -> Result<Scalar, Error> {
///         Ok(Scalar::new_float(self.0))
///     }
/// }
///
/// let node = Node::encode(&Celsius(21.5), "ambient").unwrap();
/// assert_eq!(node.args()[0].float(), Some(21.5));
/// ```
///
/// [`record!`]: crate::record
/// [`tagged!`]: crate::tagged
/// [`enumeration!`]: crate::enumeration
pub trait Encode {
    /// Encode as a scalar value.
    fn encode_value(&self) -> Result<Scalar, Error>;

    /// Encode as a node with the given name.
    ///
    /// The default wraps the scalar form as a single positional argument.
    fn encode_node(&self, name: &str) -> Result<Node, Error> {
        let mut node = Node::new(name);
        node.push_arg(self.encode_value()?);
        Ok(node)
    }

    /// Encode as a document.
    ///
    /// There is no general rule for scalar sources; the default fails.
    fn encode_document(&self) -> Result<Document, Error> {
        Err(Error::new(format!(
            "cannot encode {} as a document",
            type_name::<Self>()
        )))
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode_value(&self) -> Result<Scalar, Error> {
        (**self).encode_value()
    }

    fn encode_node(&self, name: &str) -> Result<Node, Error> {
        (**self).encode_node(name)
    }

    fn encode_document(&self) -> Result<Document, Error> {
        (**self).encode_document()
    }
}

// ********************* PRIMITIVES *******************************************

macro_rules! number {
    ($( $t:ty )*) => {$(
        impl Encode for $t {
            fn encode_value(&self) -> Result<Scalar, Error> {
                match self.to_value() {
                    Some(value) => Ok(Scalar::new(value)),
                    None => Err(Error::new(format!(
                        "{} does not fit the document's integer range",
                        self
                    ))),
                }
            }
        }
    )*};
}

number!(
    usize u8 u16 u32 u64 u128
    isize i8 i16 i32 i64 i128
    f32 f64
);

macro_rules! nonzero {
    ($( $t:ident ),* $(,)?) => {$(
        impl Encode for std::num::$t {
            fn encode_value(&self) -> Result<Scalar, Error> {
                self.get().encode_value()
            }
        }
    )*};
}

nonzero!(
    NonZeroUsize, NonZeroU8, NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128,
    NonZeroIsize, NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128,
);

impl Encode for bool {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Ok(Scalar::new_bool(*self))
    }
}

impl Encode for char {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Ok(Scalar::new_string(self.to_string()))
    }
}

impl Encode for str {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Ok(Scalar::new_str(self))
    }
}

impl Encode for String {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Ok(Scalar::new_str(self))
    }
}

impl Encode for CString {
    fn encode_value(&self) -> Result<Scalar, Error> {
        match self.to_str() {
            Ok(s) => Ok(Scalar::new_str(s)),
            Err(_) => Err(Error::new("C string is not valid UTF-8")),
        }
    }
}

impl Encode for () {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Ok(Scalar::empty())
    }
}

// ********************* OPTIONALS ********************************************

impl<T: Encode> Encode for Option<T> {
    /// Absent encodes as the null scalar; present delegates to the inner
    /// value.
    fn encode_value(&self) -> Result<Scalar, Error> {
        match self {
            Some(inner) => inner.encode_value(),
            None => Ok(Scalar::null()),
        }
    }

    /// Absent encodes as an empty node; present encodes as if the inner
    /// value were encoded directly.
    fn encode_node(&self, name: &str) -> Result<Node, Error> {
        match self {
            Some(inner) => inner.encode_node(name),
            None => Ok(Node::new(name)),
        }
    }

    fn encode_document(&self) -> Result<Document, Error> {
        match self {
            Some(inner) => inner.encode_document(),
            None => Ok(Document::new()),
        }
    }
}

// ********************* SEQUENCES ********************************************

impl<T: Encode> Encode for [T] {
    fn encode_value(&self) -> Result<Scalar, Error> {
        match self {
            [item] => item.encode_value(),
            other => Err(Error::new(format!(
                "cannot encode sequence of length {} to a scalar",
                other.len()
            ))),
        }
    }

    fn encode_node(&self, name: &str) -> Result<Node, Error> {
        let mut node = Node::new(name);
        for item in self {
            node.push_child(item.encode_node("-")?);
        }
        Ok(node)
    }

    fn encode_document(&self) -> Result<Document, Error> {
        self.iter().map(|item| item.encode_node("-")).collect()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_value(&self) -> Result<Scalar, Error> {
        self.as_slice().encode_value()
    }

    fn encode_node(&self, name: &str) -> Result<Node, Error> {
        self.as_slice().encode_node(name)
    }

    fn encode_document(&self) -> Result<Document, Error> {
        self.as_slice().encode_document()
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode_value(&self) -> Result<Scalar, Error> {
        self.as_slice().encode_value()
    }

    fn encode_node(&self, name: &str) -> Result<Node, Error> {
        self.as_slice().encode_node(name)
    }

    fn encode_document(&self) -> Result<Document, Error> {
        self.as_slice().encode_document()
    }
}

// ********************* SETS AND MAPS ****************************************

macro_rules! sets {
    ($( $set:ident ),*) => {$(
        impl<T: Encode> Encode for $set<T> {
            fn encode_value(&self) -> Result<Scalar, Error> {
                if self.len() == 1 {
                    match self.iter().next() {
                        Some(item) => item.encode_value(),
                        None => Err(Error::new("cannot encode sequence of length 0 to a scalar")),
                    }
                } else {
                    Err(Error::new(format!(
                        "cannot encode sequence of length {} to a scalar",
                        self.len()
                    )))
                }
            }

            fn encode_node(&self, name: &str) -> Result<Node, Error> {
                let mut node = Node::new(name);
                for item in self {
                    node.push_child(item.encode_node("-")?);
                }
                Ok(node)
            }

            fn encode_document(&self) -> Result<Document, Error> {
                self.iter().map(|item| item.encode_node("-")).collect()
            }
        }
    )*};
}

sets!(HashSet, BTreeSet);

macro_rules! maps {
    ($( $map:ident ),*) => {$(
        impl<V: Encode> Encode for $map<String, V> {
            fn encode_value(&self) -> Result<Scalar, Error> {
                Err(Error::new("cannot encode a map to a scalar"))
            }

            /// One child per entry, node name = key.
            fn encode_node(&self, name: &str) -> Result<Node, Error> {
                let mut node = Node::new(name);
                for (key, value) in self {
                    node.push_child(value.encode_node(key)?);
                }
                Ok(node)
            }

            fn encode_document(&self) -> Result<Document, Error> {
                self.iter()
                    .map(|(key, value)| value.encode_node(key))
                    .collect()
            }
        }
    )*};
}

maps!(HashMap, BTreeMap);

// ********************* UNNAMED RECORDS **************************************

macro_rules! tuples {
    ($( $element:ident | $idx:tt ),+) => {
        impl<$( $element: Encode, )+> Encode for ($( $element, )+) {
            fn encode_value(&self) -> Result<Scalar, Error> {
                Err(Error::new("cannot encode an unnamed record to a scalar"))
            }

            /// Fields become the node's positional arguments.
            fn encode_node(&self, name: &str) -> Result<Node, Error> {
                let mut node = Node::new(name);
                $(
                    node.push_arg(self.$idx.encode_value()?);
                )+
                Ok(node)
            }

            /// Fields become anonymously-named sibling nodes.
            fn encode_document(&self) -> Result<Document, Error> {
                let mut doc = Document::new();
                $(
                    doc.push(self.$idx.encode_node("-")?);
                )+
                Ok(doc)
            }
        }
    };
}

tuples!(A | 0);
tuples!(A | 0, B | 1);
tuples!(A | 0, B | 1, C | 2);
tuples!(A | 0, B | 1, C | 2, D | 3);
tuples!(A | 0, B | 1, C | 2, D | 3, E | 4);
tuples!(A | 0, B | 1, C | 2, D | 3, E | 4, F | 5);
tuples!(A | 0, B | 1, C | 2, D | 3, E | 4, F | 5, G | 6);
tuples!(A | 0, B | 1, C | 2, D | 3, E | 4, F | 5, G | 6, H | 7);
tuples!(A | 0, B | 1, C | 2, D | 3, E | 4, F | 5, G | 6, H | 7, I | 8);
tuples!(A | 0, B | 1, C | 2, D | 3, E | 4, F | 5, G | 6, H | 7, I | 8, J | 9);
tuples!(A | 0, B | 1, C | 2, D | 3, E | 4, F | 5, G | 6, H | 7, I | 8, J | 9, K | 10);
tuples!(A | 0, B | 1, C | 2, D | 3, E | 4, F | 5, G | 6, H | 7, I | 8, J | 9, K | 10, L | 11);

// ********************* INDIRECTION ******************************************

/// Transparent: encodes as the pointee.
impl<T: Encode> Encode for Box<T> {
    fn encode_value(&self) -> Result<Scalar, Error> {
        (**self).encode_value()
    }

    fn encode_node(&self, name: &str) -> Result<Node, Error> {
        (**self).encode_node(name)
    }

    fn encode_document(&self) -> Result<Document, Error> {
        (**self).encode_document()
    }
}

// ********************* DYNAMIC SOURCES **************************************

/// Identity: the scalar is its own encoding, tag included.
impl Encode for Scalar {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Ok(self.clone())
    }
}

impl Encode for Value {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Ok(Scalar::new(self.clone()))
    }
}

impl Encode for Node {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Err(Error::new("cannot encode a node to a scalar"))
    }

    /// A copy of the node under the requested name.
    fn encode_node(&self, name: &str) -> Result<Node, Error> {
        let mut node = self.clone();
        node.name = name.to_string();
        Ok(node)
    }

    /// The document formed by the node's children, mirroring the decode
    /// direction.
    fn encode_document(&self) -> Result<Document, Error> {
        Ok(self.children().iter().cloned().collect())
    }
}

impl Encode for Document {
    fn encode_value(&self) -> Result<Scalar, Error> {
        Err(Error::new("cannot encode a document to a scalar"))
    }

    fn encode_node(&self, name: &str) -> Result<Node, Error> {
        let mut node = Node::new(name);
        for child in self.nodes() {
            node.push_child(child.clone());
        }
        Ok(node)
    }

    fn encode_document(&self) -> Result<Document, Error> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_forms() {
        assert_eq!(Scalar::encode(&true), Ok(Scalar::new_bool(true)));
        assert_eq!(Scalar::encode(&12u8), Ok(Scalar::new_int(12)));
        assert_eq!(Scalar::encode(&-3i64), Ok(Scalar::new_int(-3)));
        assert_eq!(Scalar::encode(&2.5f32), Ok(Scalar::new_float(2.5)));
        assert_eq!(Scalar::encode("hi"), Ok(Scalar::new_str("hi")));
        assert_eq!(Scalar::encode(&'y'), Ok(Scalar::new_str("y")));
        assert_eq!(Scalar::encode(&()), Ok(Scalar::empty()));
        assert!(Scalar::encode(&u64::MAX).is_err());
    }

    #[test]
    fn option_forms() {
        let absent: Option<u8> = None;
        assert_eq!(Scalar::encode(&absent), Ok(Scalar::null()));
        assert_eq!(Node::encode(&absent, "port"), Ok(Node::new("port")));

        let present = Some(8u8);
        assert_eq!(Scalar::encode(&present), Ok(Scalar::new_int(8)));
        let node = Node::encode(&present, "port").unwrap();
        assert_eq!(node.args()[0].int(), Some(8));
    }

    #[test]
    fn sequence_single_element_unwrap() {
        assert_eq!(Scalar::encode(&vec![5u8]), Ok(Scalar::new_int(5)));
        let err = Scalar::encode(&vec![5u8, 6]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot encode sequence of length 2 to a scalar"
        );
    }

    #[test]
    fn sequence_node_and_document_forms() {
        let items = vec![1u8, 2, 3];

        let node = Node::encode(&items, "items").unwrap();
        assert_eq!(node.children().len(), 3);
        assert!(node.children().iter().all(|c| c.name() == "-"));

        let doc = Document::encode(&items).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.nodes()[1].args()[0].int(), Some(2));
    }

    #[test]
    fn map_entries_are_named_nodes() {
        let mut map = BTreeMap::new();
        map.insert("alpha".to_string(), 1u8);
        map.insert("beta".to_string(), 2u8);

        let doc = Document::encode(&map).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("alpha").unwrap().args()[0].int(), Some(1));

        let node = Node::encode(&map, "limits").unwrap();
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.child("beta").unwrap().args()[0].int(), Some(2));
    }

    #[test]
    fn tuple_fields_are_positional_arguments() {
        let node = Node::encode(&(1u8, "two", 3.0f64), "triple").unwrap();
        assert!(node.children().is_empty());
        assert_eq!(node.args().len(), 3);
        assert_eq!(node.args()[1].str(), Some("two"));

        let doc = Document::encode(&(1u8, "two")).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.nodes()[0].name(), "-");
    }
}
