//! Macro front-ends for defining record, tagged-union, and enumeration
//! types together with their engine impls.
//!
//! Each macro defines the item as written and derives the
//! [`Initial`](crate::Initial), [`Decode`](crate::Decode), and
//! [`Encode`](crate::Encode) impls (plus [`Enumeration`](crate::Enumeration)
//! for [`enumeration!`]) so the type participates in the engine without a
//! hand-written impl. Hand-written impls remain the escape hatch when a type
//! needs conversion behavior the macros cannot express.

/// Define a named record: a struct whose fields are addressed by name.
///
/// Decoding scans a node's properties then children (a later source wins)
/// or a document's nodes in order (the last matching node wins), matching
/// names under [`eq_ident`](crate::eq_ident) equivalence; unmatched fields
/// keep their [`Initial`](crate::Initial) default. Encoding emits one
/// node/child per field, the field name becoming the node name.
///
/// Optional trailing entries, in this order:
/// - `init: <fn() -> Self>;` replaces the field-wise initialize default,
/// - `rename: <fn(&'static str) -> &'static str>;` installs the rename
///   hook, applied to every field name before matching,
/// - `post: <fn(&mut Self) -> Result<(), Error>>;` installs the
///   post-process hook.
///
/// # Examples
/// ```rust
/// use doctree::*;
///
/// record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Package {
///         name: String,
///         authors: Vec<String>,
///         license_file: Option<String>,
///     }
/// }
///
/// let mut doc = Document::new();
/// let mut name = Node::new("name");
/// name.push_arg("doctree");
/// doc.push(name);
/// let mut authors = Node::new("authors");
/// authors.push_arg("kurt");
/// doc.push(authors);
///
/// let package: Package = doc.decode().unwrap();
/// assert_eq!(package.name, "doctree");
/// assert_eq!(package.authors, vec!["kurt".to_string()]);
/// assert_eq!(package.license_file, None); // unmatched: initialize default
/// ```
///
/// With hooks:
/// ```rust
/// use doctree::*;
///
/// record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Span {
///         start: u32,
///         end: u32,
///     }
///     post: |span: &mut Span| {
///         if span.end < span.start {
///             return Err(Error::new("span ends before it starts"));
///         }
///         Ok(())
///     };
/// }
///
/// let mut node = Node::new("span");
/// node.set_prop("start", 4i64);
/// node.set_prop("end", 2i64);
/// assert!(node.decode::<Span>().is_err());
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fattr:meta])* $fvis:vis $field:ident : $ty:ty ),+ $(,)?
        }
        $( init: $init:expr; )?
        $( rename: $rename:expr; )?
        $( post: $post:expr; )?
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $( $(#[$fattr])* $fvis $field : $ty, )+
        }

        impl $crate::Initial for $name {
            fn initial() -> Self {
                $crate::record!(@init $( ($init) )? {
                    $name {
                        $( $field: $crate::Initial::initial() ),+
                    }
                })
            }
        }

        impl $crate::Decode for $name {
            fn decode_value(&mut self, value: &$crate::Scalar) -> Result<(), $crate::Error> {
                let _ = value;
                Err($crate::Error::new(concat!(
                    "cannot decode a scalar into ",
                    stringify!($name)
                )))
            }

            fn decode_node(&mut self, node: &$crate::Node) -> Result<(), $crate::Error> {
                $(
                    let name = <Self as $crate::Decode>::rename_field(stringify!($field));
                    for (key, value) in node.props() {
                        if $crate::eq_ident(key, name) {
                            self.$field = value.decode()?;
                        }
                    }
                    for child in node.children() {
                        if $crate::eq_ident(child.name(), name) {
                            self.$field = child.decode()?;
                        }
                    }
                )+
                Ok(())
            }

            fn decode_document(&mut self, doc: &$crate::Document) -> Result<(), $crate::Error> {
                for node in doc.nodes() {
                    $(
                        if $crate::eq_ident(
                            node.name(),
                            <Self as $crate::Decode>::rename_field(stringify!($field)),
                        ) {
                            self.$field = node.decode()?;
                        }
                    )+
                }
                Ok(())
            }

            $(
                fn rename_field(field: &'static str) -> &'static str {
                    ($rename)(field)
                }
            )?

            $(
                fn post_decode(&mut self) -> Result<(), $crate::Error> {
                    ($post)(self)
                }
            )?
        }

        impl $crate::Encode for $name {
            fn encode_value(&self) -> Result<$crate::Scalar, $crate::Error> {
                Err($crate::Error::new(concat!(
                    "cannot encode ",
                    stringify!($name),
                    " to a scalar"
                )))
            }

            fn encode_node(&self, name: &str) -> Result<$crate::Node, $crate::Error> {
                let mut node = $crate::Node::new(name);
                $(
                    node.push_child($crate::Encode::encode_node(
                        &self.$field,
                        <Self as $crate::Decode>::rename_field(stringify!($field)),
                    )?);
                )+
                Ok(node)
            }

            fn encode_document(&self) -> Result<$crate::Document, $crate::Error> {
                let mut doc = $crate::Document::new();
                $(
                    doc.push($crate::Encode::encode_node(
                        &self.$field,
                        <Self as $crate::Decode>::rename_field(stringify!($field)),
                    )?);
                )+
                Ok(doc)
            }
        }
    };

    (@init ($init:expr) $fallback:block) => {
        ($init)()
    };
    (@init $fallback:block) => {
        $fallback
    };
}

/// Define a tagged union: a record with a designated discriminator field
/// whose value selects which field subset is active.
///
/// The discriminator is resolved before anything else: children are
/// scanned, then properties, the later source winning, so a property takes
/// priority at node level; at document level the dedicated last-declared
/// node lookup is used. The variant is then constructed atomically from the
/// resolved value (absent means the first declared variant), and the
/// remaining fields decode exactly as named-record fields. The constructed
/// value exposes no discriminator setter; reconstruction is the only way to
/// change shape.
///
/// Encoding writes the discriminator as a property (node level) or as its
/// own node (document level), with the fields alongside.
///
/// Optional trailing entries, in this order: `init:`, `rename:`, and
/// `post:`, as for [`record!`].
///
/// # Example
/// ```rust
/// use doctree::*;
///
/// tagged! {
///     #[derive(Debug, PartialEq)]
///     pub enum Shape by kind {
///         Circle { radius: f64 },
///         Rect { width: f64, height: f64 },
///     }
/// }
///
/// let mut node = Node::new("shape");
/// node.set_prop("kind", "circle");
/// let mut radius = Node::new("radius");
/// radius.push_arg(2.0);
/// node.push_child(radius);
///
/// let shape: Shape = node.decode().unwrap();
/// assert_eq!(shape, Shape::Circle { radius: 2.0 });
/// ```
#[macro_export]
macro_rules! tagged {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident by $disc:ident {
            $( $(#[$vattr:meta])* $variant:ident { $( $vfield:ident : $vty:ty ),* $(,)? } ),+ $(,)?
        }
        $( init: $init:expr; )?
        $( rename: $rename:expr; )?
        $( post: $post:expr; )?
    ) => {
        $(#[$attr])*
        $vis enum $name {
            $( $(#[$vattr])* $variant { $( $vfield : $vty ),* } ),+
        }

        impl $crate::Initial for $name {
            fn initial() -> Self {
                $crate::tagged!(@init $( ($init) )? {
                    $crate::tagged!(@first $name; $( $variant { $( $vfield ),* } ),+)
                })
            }
        }

        impl $crate::Decode for $name {
            fn decode_value(&mut self, value: &$crate::Scalar) -> Result<(), $crate::Error> {
                let _ = value;
                Err($crate::Error::new(concat!(
                    "cannot decode a scalar into ",
                    stringify!($name)
                )))
            }

            fn decode_node(&mut self, node: &$crate::Node) -> Result<(), $crate::Error> {
                let disc_name = <Self as $crate::Decode>::rename_field(stringify!($disc));

                // children first, then properties: the later source wins
                let mut disc: Option<String> = None;
                for child in node.children() {
                    if $crate::eq_ident(child.name(), disc_name) {
                        disc = Some(child.decode()?);
                    }
                }
                for (key, value) in node.props() {
                    if $crate::eq_ident(key, disc_name) {
                        disc = Some(value.decode()?);
                    }
                }

                if let Some(selected) = disc {
                    *self = $crate::tagged!(@select $name, selected;
                        $( $variant { $( $vfield ),* } ),+);
                }

                match self {
                    $(
                        $name::$variant { $( $vfield ),* } => {
                            $(
                                let name = <Self as $crate::Decode>::rename_field(
                                    stringify!($vfield),
                                );
                                for (key, value) in node.props() {
                                    if $crate::eq_ident(key, name) {
                                        *$vfield = value.decode()?;
                                    }
                                }
                                for child in node.children() {
                                    if $crate::eq_ident(child.name(), name) {
                                        *$vfield = child.decode()?;
                                    }
                                }
                            )*
                        }
                    )+
                }
                Ok(())
            }

            fn decode_document(&mut self, doc: &$crate::Document) -> Result<(), $crate::Error> {
                let disc_name = <Self as $crate::Decode>::rename_field(stringify!($disc));

                if let Some(node) = doc.get(disc_name) {
                    let selected: String = node.decode()?;
                    *self = $crate::tagged!(@select $name, selected;
                        $( $variant { $( $vfield ),* } ),+);
                }

                match self {
                    $(
                        $name::$variant { $( $vfield ),* } => {
                            for _node in doc.nodes() {
                                $(
                                    if $crate::eq_ident(
                                        _node.name(),
                                        <Self as $crate::Decode>::rename_field(
                                            stringify!($vfield),
                                        ),
                                    ) {
                                        *$vfield = _node.decode()?;
                                    }
                                )*
                            }
                        }
                    )+
                }
                Ok(())
            }

            $(
                fn rename_field(field: &'static str) -> &'static str {
                    ($rename)(field)
                }
            )?

            $(
                fn post_decode(&mut self) -> Result<(), $crate::Error> {
                    ($post)(self)
                }
            )?
        }

        impl $crate::Encode for $name {
            fn encode_value(&self) -> Result<$crate::Scalar, $crate::Error> {
                Err($crate::Error::new(concat!(
                    "cannot encode ",
                    stringify!($name),
                    " to a scalar"
                )))
            }

            fn encode_node(&self, name: &str) -> Result<$crate::Node, $crate::Error> {
                let mut node = $crate::Node::new(name);
                match self {
                    $(
                        $name::$variant { $( $vfield ),* } => {
                            node.set_prop(
                                <Self as $crate::Decode>::rename_field(stringify!($disc)),
                                $crate::Scalar::new_str(stringify!($variant)),
                            );
                            $(
                                node.push_child($crate::Encode::encode_node(
                                    $vfield,
                                    <Self as $crate::Decode>::rename_field(
                                        stringify!($vfield),
                                    ),
                                )?);
                            )*
                        }
                    )+
                }
                Ok(node)
            }

            fn encode_document(&self) -> Result<$crate::Document, $crate::Error> {
                let mut doc = $crate::Document::new();
                match self {
                    $(
                        $name::$variant { $( $vfield ),* } => {
                            let mut disc_node = $crate::Node::new(
                                <Self as $crate::Decode>::rename_field(stringify!($disc)),
                            );
                            disc_node.push_arg($crate::Scalar::new_str(stringify!($variant)));
                            doc.push(disc_node);
                            $(
                                doc.push($crate::Encode::encode_node(
                                    $vfield,
                                    <Self as $crate::Decode>::rename_field(
                                        stringify!($vfield),
                                    ),
                                )?);
                            )*
                        }
                    )+
                }
                Ok(doc)
            }
        }
    };

    (@init ($init:expr) $fallback:block) => {
        ($init)()
    };
    (@init $fallback:block) => {
        $fallback
    };

    (@first $name:ident; $variant:ident { $( $vfield:ident ),* } $(, $($rest:tt)+)?) => {
        $name::$variant { $( $vfield: $crate::Initial::initial() ),* }
    };

    (@select $name:ident, $disc:expr; $( $variant:ident { $( $vfield:ident ),* } ),+) => {{
        let disc = $disc;
        $(
            if $crate::eq_ident(disc.as_str(), stringify!($variant)) {
                $name::$variant { $( $vfield: $crate::Initial::initial() ),* }
            } else
        )+
        {
            return Err($crate::Error::new(format!(
                "no variant matching \"{}\" in {}",
                disc,
                stringify!($name)
            )));
        }
    }};
}

/// Define an enumeration: a C-like enum over named constants with explicit
/// integer ordinals.
///
/// Decoding accepts a string (matched against constant names under
/// [`eq_ident`](crate::eq_ident) equivalence) or an integer ordinal;
/// integer decoding of a sparse ordinal set (one not contiguous from
/// zero) is rejected unless the declaration ends with the `sparse`
/// marker. Encoding emits the string form of the constant's name.
///
/// # Examples
/// ```rust
/// use doctree::*;
///
/// enumeration! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Level {
///         Debug = 0,
///         Info = 1,
///         Warn = 2,
///     }
/// }
///
/// assert_eq!(Scalar::new_str("info").decode::<Level>(), Ok(Level::Info));
/// assert_eq!(Scalar::new_int(2).decode::<Level>(), Ok(Level::Warn));
/// assert_eq!(Scalar::encode(&Level::Debug), Ok(Scalar::new_str("Debug")));
/// ```
///
/// Opting a sparse ordinal set into integer decoding:
/// ```rust
/// use doctree::*;
///
/// enumeration! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     enum Prio {
///         Low = 0,
///         High = 4,
///     }
///     sparse
/// }
///
/// assert_eq!(Scalar::new_int(4).decode::<Prio>(), Ok(Prio::High));
/// assert!(Scalar::new_int(2).decode::<Prio>().is_err()); // undeclared
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vattr:meta])* $variant:ident = $ord:expr ),+ $(,)?
        }
        $( $sparse:ident )?
    ) => {
        $(#[$attr])*
        $vis enum $name {
            $( $(#[$vattr])* $variant = $ord, )+
        }

        impl $crate::Enumeration for $name {
            const NAMES: &'static [&'static str] = &[ $( stringify!($variant) ),+ ];
            const ORDINALS: &'static [i64] = &[ $( $ord ),+ ];
            $( const INT_DECODE_SPARSE: bool = $crate::enumeration!(@sparse $sparse); )?

            fn from_index(index: usize) -> Self {
                let mut counter = 0usize;
                $(
                    if index == counter {
                        return $name::$variant;
                    }
                    counter += 1;
                )+
                let _ = (index, counter);
                // positions come from NAMES/ORDINALS, which are in range
                $crate::Initial::initial()
            }

            fn index(&self) -> usize {
                let mut counter = 0usize;
                $(
                    if let $name::$variant = self {
                        return counter;
                    }
                    counter += 1;
                )+
                counter
            }
        }

        impl $crate::Initial for $name {
            fn initial() -> Self {
                <$name as $crate::Enumeration>::from_index(0)
            }
        }

        impl $crate::Decode for $name {
            fn decode_value(&mut self, value: &$crate::Scalar) -> Result<(), $crate::Error> {
                match &value.val {
                    $crate::Value::Str(s) => {
                        *self = <Self as $crate::Enumeration>::from_name(s)?;
                        Ok(())
                    }
                    $crate::Value::Int(i) => {
                        *self = <Self as $crate::Enumeration>::from_int(*i)?;
                        Ok(())
                    }
                    other => Err($crate::Error::new(format!(
                        "invalid kind: {}, expected an enumeration name or ordinal",
                        other.kind()
                    ))),
                }
            }
        }

        impl $crate::Encode for $name {
            fn encode_value(&self) -> Result<$crate::Scalar, $crate::Error> {
                Ok($crate::Scalar::new_str($crate::Enumeration::name(self)))
            }
        }
    };

    (@sparse sparse) => {
        true
    };
}
