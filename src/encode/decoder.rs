use super::Error;
use crate::{eq_ident, Document, Node, Scalar, Value};
use std::any::type_name;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::ffi::CString;
use std::hash::Hash;

type Res = Result<(), Error>;

/// The sole positional argument of a node, or the argument-count error.
///
/// Scalar-target node decoding is defined only for nodes carrying exactly
/// one argument; custom [`Decode`] impls can reuse the contract through this
/// helper.
pub fn one_arg(node: &Node) -> Result<&Scalar, Error> {
    node.single_arg()
        .ok_or_else(|| Error::arg_count(node.args().len()))
}

/// The initialize hook: the documented default a value holds before
/// structural decoding begins.
///
/// Every decode starts from `initial()`; fields and elements the document
/// does not mention keep this value. The built-in defaults are zero for the
/// numeric primitives, `false`, `'\0'`, empty strings and collections,
/// `None`, and the first declared constant of an enumeration. Types whose
/// zero is unrepresentable clamp to their minimum instead: the `NonZero*`
/// integers initialize to `MIN`.
///
/// # Example
/// ```rust
/// # use doctree::*;
/// use std::num::NonZeroU8;
///
/// assert_eq!(u8::initial(), 0);
/// assert_eq!(String::initial(), "");
/// assert_eq!(Option::<bool>::initial(), None);
/// assert_eq!(NonZeroU8::initial(), NonZeroU8::MIN);
/// ```
pub trait Initial: Sized {
    /// The pre-decode default.
    fn initial() -> Self;
}

/// The decode hook: structural conversion from the document tree, one
/// method per tree level.
///
/// Implementing `Decode` for a type registers its conversion; the impl runs
/// exclusively for that type. Only the method for the level being decoded
/// is consulted: overriding `decode_value` never changes how the type
/// decodes from a node, except through the provided defaults, which carry
/// the built-in cross-level rules:
///
/// - `decode_node` unwraps the node's single argument and delegates to
///   `decode_value` (more or fewer arguments is a fatal error);
/// - `decode_document` has no general rule and fails.
///
/// Decoding is in place: the engine calls [`Initial::initial`] first, the
/// `decode_*` method mutates the value, and [`post_decode`] runs last.
/// Nested decodes (a record field, a sequence element) re-run the full
/// lifecycle through [`Scalar::decode`], [`Node::decode`], or
/// [`Document::decode`].
///
/// # Implementing
/// Most types go through the [`record!`], [`tagged!`], and [`enumeration!`]
/// macros. A manual impl looks like this:
///
/// ```rust
/// use doctree::*;
///
/// struct Celsius(f64);
///
/// impl Initial for Celsius {
///     fn initial() -> Self {
///         Celsius(0.0)
///     }
/// }
///
/// impl Decode for Celsius {
///     fn decode_value(&mut self, value: &Scalar) -> Result<(), Error> {
///         self.0 = value.decode()?;
///         Ok(())
///     }
///
///     fn post_decode(&mut self) -> Result<(), Error> {
///         if self.0 < -273.15 {
///             return Err(Error::new("temperature below absolute zero"));
///         }
///         Ok(())
///     }
/// }
///
/// let mut node = Node::new("ambient");
/// node.push_arg(21.5);
/// assert_eq!(node.decode::<Celsius>().map(|c| c.0), Ok(21.5));
///
/// let mut node = Node::new("ambient");
/// node.push_arg(-400.0);
/// assert!(node.decode::<Celsius>().is_err());
/// ```
///
/// [`record!`]: crate::record
/// [`tagged!`]: crate::tagged
/// [`enumeration!`]: crate::enumeration
pub trait Decode: Initial {
    /// Decode from a scalar value.
    fn decode_value(&mut self, value: &Scalar) -> Res;

    /// Decode from a node.
    ///
    /// The default requires the node to carry exactly one argument and
    /// delegates to [`decode_value`](Decode::decode_value).
    fn decode_node(&mut self, node: &Node) -> Res {
        self.decode_value(one_arg(node)?)
    }

    /// Decode from a document.
    ///
    /// There is no general rule for scalar targets; the default fails.
    fn decode_document(&mut self, doc: &Document) -> Res {
        let _ = doc;
        Err(Error::new(format!(
            "cannot decode a document into {}",
            type_name::<Self>()
        )))
    }

    /// The post-process hook, run after structural decoding completes.
    ///
    /// The default is a no-op; override it for derived values or
    /// validation fixups.
    fn post_decode(&mut self) -> Res {
        Ok(())
    }

    /// The rename hook: map a structural field name to the name used for
    /// matching against node names and property keys.
    ///
    /// Applied before every name comparison during record decoding (and,
    /// for round-trip consistency, record encoding). The default is the
    /// identity.
    fn rename_field(field: &'static str) -> &'static str {
        field
    }
}

/// An enumeration over a declared set of named constants with integer
/// ordinals.
///
/// The [`enumeration!`](crate::enumeration) macro defines a C-like enum
/// together with this impl. The provided methods are the enum hooks:
///
/// - [`from_name`](Enumeration::from_name) matches a string against the
///   constant names under [`eq_ident`] equivalence, failing if none match;
/// - [`from_int`](Enumeration::from_int) looks an ordinal up, but rejects
///   the whole conversion when the ordinal set is sparse (not contiguous
///   from zero) unless the type opts in through
///   [`INT_DECODE_SPARSE`](Enumeration::INT_DECODE_SPARSE). An arbitrary
///   integer must not quietly turn into an undeclared constant.
pub trait Enumeration: Sized {
    /// The constant names, in declaration order.
    const NAMES: &'static [&'static str];

    /// The constant ordinals, in declaration order.
    const ORDINALS: &'static [i64];

    /// Opt-in: permit integer decoding even when the ordinal set is sparse.
    const INT_DECODE_SPARSE: bool = false;

    /// The constant at a declaration-order index.
    ///
    /// Only called with positions obtained from [`NAMES`](Enumeration::NAMES)
    /// or [`ORDINALS`](Enumeration::ORDINALS).
    fn from_index(index: usize) -> Self;

    /// The declaration-order index of this constant.
    fn index(&self) -> usize;

    /// The name of this constant.
    fn name(&self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// The ordinal of this constant.
    fn ordinal(&self) -> i64 {
        Self::ORDINALS[self.index()]
    }

    /// Is the ordinal set sparse, i.e. not contiguous from zero?
    fn sparse() -> bool {
        let n = Self::ORDINALS.len() as i64;
        !(0..n).all(|k| Self::ORDINALS.contains(&k))
    }

    /// The enum hook for string sources.
    fn from_name(name: &str) -> Result<Self, Error> {
        Self::NAMES
            .iter()
            .position(|candidate| eq_ident(candidate, name))
            .map(Self::from_index)
            .ok_or_else(|| {
                Error::new(format!(
                    "no constant matching \"{}\" in {}",
                    name,
                    type_name::<Self>()
                ))
            })
    }

    /// The enum hook for integer sources.
    fn from_int(ordinal: i64) -> Result<Self, Error> {
        if Self::sparse() && !Self::INT_DECODE_SPARSE {
            return Err(Error::new(format!(
                "{} has a sparse ordinal set: decoding from an integer is disabled by default",
                type_name::<Self>()
            )));
        }
        Self::ORDINALS
            .iter()
            .position(|&candidate| candidate == ordinal)
            .map(Self::from_index)
            .ok_or_else(|| {
                Error::new(format!(
                    "no constant with ordinal {} in {}",
                    ordinal,
                    type_name::<Self>()
                ))
            })
    }
}

// ********************* PRIMITIVES *******************************************

macro_rules! number {
    ($( $t:ty )*) => {$(
        impl Initial for $t {
            fn initial() -> Self {
                0 as $t
            }
        }

        impl Decode for $t {
            fn decode_value(&mut self, value: &Scalar) -> Res {
                match value.val {
                    Value::Int(_) | Value::Float(_) => match value.num::<$t>() {
                        Some(n) => {
                            *self = n;
                            Ok(())
                        }
                        None => Err(Error::new(format!(
                            "{} out of range for {}",
                            value.val,
                            type_name::<$t>()
                        ))),
                    },
                    ref other => Err(Error::mismatch("a number", other)),
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
    ($( $t:ident => $inner:ty ),* $(,)?) => {$(
        impl Initial for std::num::$t {
            // zero is unrepresentable for this type; clamp to the minimum
            fn initial() -> Self {
                std::num::$t::MIN
            }
        }

        impl Decode for std::num::$t {
            fn decode_value(&mut self, value: &Scalar) -> Res {
                let raw: $inner = value.decode()?;
                match std::num::$t::new(raw) {
                    Some(v) => {
                        *self = v;
                        Ok(())
                    }
                    None => Err(Error::new(concat!(
                        stringify!($t),
                        " cannot hold zero"
                    ))),
                }
            }
        }
    )*};
}

nonzero!(
    NonZeroUsize => usize,
    NonZeroU8 => u8,
    NonZeroU16 => u16,
    NonZeroU32 => u32,
    NonZeroU64 => u64,
    NonZeroU128 => u128,
    NonZeroIsize => isize,
    NonZeroI8 => i8,
    NonZeroI16 => i16,
    NonZeroI32 => i32,
    NonZeroI64 => i64,
    NonZeroI128 => i128,
);

impl Initial for bool {
    fn initial() -> Self {
        false
    }
}

impl Decode for bool {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        match value.val {
            Value::Bool(b) => {
                *self = b;
                Ok(())
            }
            ref other => Err(Error::mismatch("boolean", other)),
        }
    }
}

impl Initial for char {
    fn initial() -> Self {
        '\0'
    }
}

impl Decode for char {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        let s = value
            .str()
            .ok_or_else(|| Error::mismatch("string", &value.val))?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                *self = c;
                Ok(())
            }
            _ => Err(Error::new(format!(
                "expected a single code point, found \"{}\"",
                s
            ))),
        }
    }
}

impl Initial for String {
    fn initial() -> Self {
        String::new()
    }
}

impl Decode for String {
    // total over every scalar kind
    fn decode_value(&mut self, value: &Scalar) -> Res {
        *self = value.as_string();
        Ok(())
    }
}

impl Initial for CString {
    fn initial() -> Self {
        CString::default()
    }
}

impl Decode for CString {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        let rendered = match &value.val {
            Value::Str(s) => s.clone(),
            // no null reference to hand out; null reads as the empty string
            Value::Null => String::new(),
            other => return Err(Error::mismatch("string or null", other)),
        };
        *self = CString::new(rendered)
            .map_err(|_| Error::new("string contains an interior nul byte"))?;
        Ok(())
    }
}

impl Initial for () {
    fn initial() -> Self {}
}

impl Decode for () {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        if value.empty() {
            Ok(())
        } else {
            Err(Error::mismatch("empty", &value.val))
        }
    }
}

// ********************* OPTIONALS ********************************************

impl<T> Initial for Option<T> {
    fn initial() -> Self {
        None
    }
}

impl<T: Decode> Decode for Option<T> {
    /// Strict: only an explicit null reads as absent; any other failure of
    /// the wrapped decode propagates.
    fn decode_value(&mut self, value: &Scalar) -> Res {
        if value.null() {
            *self = None;
            Ok(())
        } else {
            *self = Some(value.decode()?);
            Ok(())
        }
    }

    /// Lenient: a failure of the wrapped decode reads as absent.
    fn decode_node(&mut self, node: &Node) -> Res {
        *self = node.decode().ok();
        Ok(())
    }

    /// Lenient, as for nodes.
    fn decode_document(&mut self, doc: &Document) -> Res {
        *self = doc.decode().ok();
        Ok(())
    }
}

// ********************* SEQUENCES ********************************************

enum Elem<'a> {
    Arg(&'a Scalar),
    Child(&'a Node),
}

impl Elem<'_> {
    fn decode<T: Decode>(&self) -> Result<T, Error> {
        match self {
            Elem::Arg(value) => value.decode(),
            Elem::Child(node) => node.decode(),
        }
    }
}

/// List elements of a node: positional arguments first, then children.
fn elems(node: &Node) -> impl Iterator<Item = Elem<'_>> {
    node.args()
        .iter()
        .map(Elem::Arg)
        .chain(node.children().iter().map(Elem::Child))
}

impl<T> Initial for Vec<T> {
    fn initial() -> Self {
        Vec::new()
    }
}

impl<T: Decode> Decode for Vec<T> {
    // mirror of the single-element encode unwrap
    fn decode_value(&mut self, value: &Scalar) -> Res {
        *self = vec![value.decode()?];
        Ok(())
    }

    fn decode_node(&mut self, node: &Node) -> Res {
        self.clear();
        for elem in elems(node) {
            self.push(elem.decode()?);
        }
        Ok(())
    }

    fn decode_document(&mut self, doc: &Document) -> Res {
        self.clear();
        for node in doc.nodes() {
            self.push(node.decode()?);
        }
        Ok(())
    }
}

impl<T: Initial, const N: usize> Initial for [T; N] {
    fn initial() -> Self {
        std::array::from_fn(|_| T::initial())
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        if N == 1 {
            self[0] = value.decode()?;
            Ok(())
        } else {
            Err(Error::new(format!(
                "cannot decode a scalar into an array of length {}",
                N
            )))
        }
    }

    /// Fills positionally, stopping at the array length; extra elements are
    /// silently ignored, missing trailing elements keep their default.
    fn decode_node(&mut self, node: &Node) -> Res {
        for (slot, elem) in self.iter_mut().zip(elems(node)) {
            *slot = elem.decode()?;
        }
        Ok(())
    }

    fn decode_document(&mut self, doc: &Document) -> Res {
        for (slot, node) in self.iter_mut().zip(doc.nodes()) {
            *slot = node.decode()?;
        }
        Ok(())
    }
}

// ********************* SETS AND MAPS ****************************************

impl<T> Initial for HashSet<T> {
    fn initial() -> Self {
        HashSet::new()
    }
}

impl<T: Decode + Eq + Hash> Decode for HashSet<T> {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        self.clear();
        self.insert(value.decode()?);
        Ok(())
    }

    fn decode_node(&mut self, node: &Node) -> Res {
        self.clear();
        for elem in elems(node) {
            self.insert(elem.decode()?);
        }
        Ok(())
    }

    fn decode_document(&mut self, doc: &Document) -> Res {
        self.clear();
        for node in doc.nodes() {
            self.insert(node.decode()?);
        }
        Ok(())
    }
}

impl<T> Initial for BTreeSet<T> {
    fn initial() -> Self {
        BTreeSet::new()
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        self.clear();
        self.insert(value.decode()?);
        Ok(())
    }

    fn decode_node(&mut self, node: &Node) -> Res {
        self.clear();
        for elem in elems(node) {
            self.insert(elem.decode()?);
        }
        Ok(())
    }

    fn decode_document(&mut self, doc: &Document) -> Res {
        self.clear();
        for node in doc.nodes() {
            self.insert(node.decode()?);
        }
        Ok(())
    }
}

impl<V> Initial for HashMap<String, V> {
    fn initial() -> Self {
        HashMap::new()
    }
}

impl<V: Decode> Decode for HashMap<String, V> {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        let _ = value;
        Err(Error::new("cannot decode a scalar into a map"))
    }

    /// Cleared then repopulated from properties and children; a child
    /// overrides a property under the same key.
    fn decode_node(&mut self, node: &Node) -> Res {
        self.clear();
        for (key, value) in node.props() {
            self.insert(key.to_string(), value.decode()?);
        }
        for child in node.children() {
            self.insert(child.name().to_string(), child.decode()?);
        }
        Ok(())
    }

    fn decode_document(&mut self, doc: &Document) -> Res {
        self.clear();
        for node in doc.nodes() {
            self.insert(node.name().to_string(), node.decode()?);
        }
        Ok(())
    }
}

impl<V> Initial for BTreeMap<String, V> {
    fn initial() -> Self {
        BTreeMap::new()
    }
}

impl<V: Decode> Decode for BTreeMap<String, V> {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        let _ = value;
        Err(Error::new("cannot decode a scalar into a map"))
    }

    fn decode_node(&mut self, node: &Node) -> Res {
        self.clear();
        for (key, value) in node.props() {
            self.insert(key.to_string(), value.decode()?);
        }
        for child in node.children() {
            self.insert(child.name().to_string(), child.decode()?);
        }
        Ok(())
    }

    fn decode_document(&mut self, doc: &Document) -> Res {
        self.clear();
        for node in doc.nodes() {
            self.insert(node.name().to_string(), node.decode()?);
        }
        Ok(())
    }
}

// ********************* UNNAMED RECORDS **************************************

macro_rules! tuples {
    ($( $element:ident | $idx:tt ),+) => {
        impl<$( $element: Initial, )+> Initial for ($( $element, )+) {
            fn initial() -> Self {
                ($( $element::initial(), )+)
            }
        }

        impl<$( $element: Decode, )+> Decode for ($( $element, )+) {
            fn decode_value(&mut self, value: &Scalar) -> Res {
                let _ = value;
                Err(Error::new("cannot decode a scalar into an unnamed record"))
            }

            /// Positional from the node's arguments; fewer arguments than
            /// fields is out of range, extra arguments are ignored.
            fn decode_node(&mut self, node: &Node) -> Res {
                let args = node.args();
                $(
                    self.$idx = args
                        .get($idx)
                        .ok_or_else(|| Error::out_of_range($idx, args.len()))?
                        .decode()?;
                )+
                Ok(())
            }

            fn decode_document(&mut self, doc: &Document) -> Res {
                let nodes = doc.nodes();
                $(
                    self.$idx = nodes
                        .get($idx)
                        .ok_or_else(|| Error::out_of_range($idx, nodes.len()))?
                        .decode()?;
                )+
                Ok(())
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

impl<T: Initial> Initial for Box<T> {
    fn initial() -> Self {
        Box::new(T::initial())
    }
}

/// Transparent: decodes as the pointee.
impl<T: Decode> Decode for Box<T> {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        (**self).decode_value(value)
    }

    fn decode_node(&mut self, node: &Node) -> Res {
        (**self).decode_node(node)
    }

    fn decode_document(&mut self, doc: &Document) -> Res {
        (**self).decode_document(doc)
    }

    fn post_decode(&mut self) -> Res {
        (**self).post_decode()
    }

    fn rename_field(field: &'static str) -> &'static str {
        T::rename_field(field)
    }
}

// ********************* DYNAMIC TARGETS **************************************

impl Initial for Scalar {
    fn initial() -> Self {
        Scalar::null()
    }
}

/// Identity: keeps the scalar as-is, enabling partially typed decoding.
impl Decode for Scalar {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        *self = value.clone();
        Ok(())
    }
}

impl Initial for Node {
    fn initial() -> Self {
        Node::new("")
    }
}

impl Decode for Node {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        let _ = value;
        Err(Error::new("cannot decode a scalar into a node"))
    }

    fn decode_node(&mut self, node: &Node) -> Res {
        *self = node.clone();
        Ok(())
    }
}

impl Initial for Document {
    fn initial() -> Self {
        Document::new()
    }
}

impl Decode for Document {
    fn decode_value(&mut self, value: &Scalar) -> Res {
        let _ = value;
        Err(Error::new("cannot decode a scalar into a document"))
    }

    /// A node reads as the document formed by its children.
    fn decode_node(&mut self, node: &Node) -> Res {
        *self = node.children().iter().cloned().collect();
        Ok(())
    }

    fn decode_document(&mut self, doc: &Document) -> Res {
        *self = doc.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_arg_contract() {
        let mut node = Node::new("n");
        assert_eq!(one_arg(&node), Err(Error::arg_count(0)));
        node.push_arg(1i64);
        assert!(one_arg(&node).is_ok());
        node.push_arg(2i64);
        assert_eq!(one_arg(&node), Err(Error::arg_count(2)));
    }

    #[test]
    fn default_node_rule_unwraps_single_argument() {
        let mut node = Node::new("n");
        node.push_arg(7i64);
        assert_eq!(node.decode::<u8>(), Ok(7));

        node.push_arg(8i64);
        assert!(node.decode::<u8>().is_err());
    }

    #[test]
    fn nonzero_clamps_to_minimum() {
        use std::num::{NonZeroI8, NonZeroU32};
        assert_eq!(NonZeroU32::initial(), NonZeroU32::MIN);
        assert_eq!(NonZeroI8::initial().get(), i8::MIN);

        assert!(Scalar::new_int(0).decode::<NonZeroU32>().is_err());
        assert_eq!(
            Scalar::new_int(5).decode::<NonZeroU32>().map(|n| n.get()),
            Ok(5)
        );
    }

    #[test]
    fn string_decode_is_total() {
        assert_eq!(Scalar::new_int(3).decode::<String>(), Ok("3".to_string()));
        assert_eq!(Scalar::null().decode::<String>(), Ok("null".to_string()));
        assert_eq!(Scalar::empty().decode::<String>(), Ok("empty".to_string()));
        assert_eq!(
            Scalar::new_bool(true).decode::<String>(),
            Ok("true".to_string())
        );
    }

    #[test]
    fn char_requires_one_code_point() {
        assert_eq!(Scalar::new_str("é").decode::<char>(), Ok('é'));
        assert!(Scalar::new_str("").decode::<char>().is_err());
        assert!(Scalar::new_str("ab").decode::<char>().is_err());
        assert!(Scalar::new_int(97).decode::<char>().is_err());
    }

    #[test]
    fn cstring_accepts_string_or_null() {
        let c: CString = Scalar::new_str("lib").decode().unwrap();
        assert_eq!(c.as_bytes(), b"lib");
        let c: CString = Scalar::null().decode().unwrap();
        assert_eq!(c.as_bytes(), b"");
        assert!(Scalar::new_int(0).decode::<CString>().is_err());
        assert!(Scalar::new_str("a\0b").decode::<CString>().is_err());
    }

    struct Renamed {
        kind: String,
    }

    impl Initial for Renamed {
        fn initial() -> Self {
            Renamed {
                kind: String::initial(),
            }
        }
    }

    impl Decode for Renamed {
        fn decode_value(&mut self, _: &Scalar) -> Res {
            Err(Error::new("scalar source unsupported"))
        }

        fn decode_node(&mut self, node: &Node) -> Res {
            let name = Self::rename_field("kind");
            for (key, value) in node.props() {
                if eq_ident(key, name) {
                    self.kind = value.decode()?;
                }
            }
            Ok(())
        }

        fn rename_field(field: &'static str) -> &'static str {
            match field {
                "kind" => "type",
                other => other,
            }
        }
    }

    #[test]
    fn rename_hook_applies_before_matching() {
        let mut node = Node::new("entry");
        node.set_prop("type", "file");
        node.set_prop("kind", "ignored");

        let renamed: Renamed = node.decode().unwrap();
        assert_eq!(renamed.kind, "file");
    }

    #[derive(Debug, PartialEq, Clone, Copy)]
    enum Holey {
        A,
        B,
        D,
    }

    impl Initial for Holey {
        fn initial() -> Self {
            Holey::A
        }
    }

    impl Enumeration for Holey {
        const NAMES: &'static [&'static str] = &["A", "B", "D"];
        const ORDINALS: &'static [i64] = &[0, 1, 3];

        fn from_index(index: usize) -> Self {
            [Holey::A, Holey::B, Holey::D][index]
        }

        fn index(&self) -> usize {
            match self {
                Holey::A => 0,
                Holey::B => 1,
                Holey::D => 2,
            }
        }
    }

    #[test]
    fn enum_hooks() {
        assert_eq!(Holey::from_name("b"), Ok(Holey::B));
        assert_eq!(Holey::from_name("a-"), Ok(Holey::A));
        assert!(Holey::from_name("C").is_err());

        assert!(Holey::sparse());
        assert!(Holey::from_int(1).is_err()); // sparse set rejected outright
        assert_eq!(Holey::A.name(), "A");
        assert_eq!(Holey::D.ordinal(), 3);
    }

    #[test]
    fn dynamic_targets() {
        let mut node = Node::new("outer");
        node.push_child(Node::new("inner"));

        let doc: Document = node.decode().unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.nodes()[0].name(), "inner");

        let copy: Node = node.decode().unwrap();
        assert_eq!(copy, node);

        let tagged = Scalar::with_tag("u8", Value::Int(3));
        let copy: Scalar = tagged.decode().unwrap();
        assert_eq!(copy.tag(), Some("u8"));
    }
}
