use super::val::Value;
use std::{
    fmt,
    ops::{Deref, DerefMut},
};

/// A leaf datum of the document tree: a [`Value`] with an optional type tag.
///
/// The tag is a free-form string annotation (a semantic type hint such as
/// `date-time` or `uuid`). It can be ignored for self-explanatory data; the
/// engines use it to annotate encodings and it is available to custom hooks
/// on decode.
///
/// `Scalar` dereferences mutably to [`Value`], so all reading methods on
/// [`Value`] can be used directly. Equality is done **only on the value**,
/// the tag is ignored.
///
/// # Example
/// ```rust
/// # use doctree::*;
/// let scalar = Scalar::with_tag("date", Value::Str("2020-01-01".into()));
/// assert_eq!(scalar.tag(), Some("date"));
/// assert_eq!(scalar.str(), Some("2020-01-01"));
/// // equality ignores the tag
/// assert_eq!(scalar, Scalar::new_str("2020-01-01"));
/// ```
#[derive(Clone, Debug)]
pub struct Scalar {
    /// The optional type annotation.
    pub tag: Option<String>,
    /// The value payload.
    pub val: Value,
}

impl Scalar {
    /// A new untagged scalar with the specified [`Value`].
    ///
    /// # Example
    /// ```rust
    /// # use doctree::*;
    /// let scalar = Scalar::new(Value::Bool(true));
    /// assert_eq!(scalar.tag, None);
    /// assert_eq!(scalar.val, Value::Bool(true));
    /// ```
    pub fn new(value: Value) -> Self {
        Self {
            tag: None,
            val: value,
        }
    }

    /// A new scalar carrying a type tag.
    pub fn with_tag<S: Into<String>>(tag: S, value: Value) -> Self {
        Self {
            tag: Some(tag.into()),
            val: value,
        }
    }

    /// A new string scalar.
    pub fn new_str(string: &str) -> Self {
        Scalar::new(Value::Str(string.to_string()))
    }

    /// A new string scalar, taking ownership of the string.
    pub fn new_string(string: String) -> Self {
        Scalar::new(Value::Str(string))
    }

    /// A new integer scalar.
    pub fn new_int(int: i64) -> Self {
        Scalar::new(Value::Int(int))
    }

    /// A new float scalar.
    pub fn new_float(float: f64) -> Self {
        Scalar::new(Value::Float(float))
    }

    /// A new boolean scalar.
    pub fn new_bool(boolean: bool) -> Self {
        Scalar::new(Value::Bool(boolean))
    }

    /// The null scalar.
    pub fn null() -> Self {
        Scalar::new(Value::Null)
    }

    /// The empty-marker scalar.
    pub fn empty() -> Self {
        Scalar::new(Value::Empty)
    }

    /// The type tag. Same as the `.tag` field but mapped as a `&str`.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl Deref for Scalar {
    type Target = Value;
    fn deref(&self) -> &Value {
        &self.val
    }
}

impl DerefMut for Scalar {
    fn deref_mut(&mut self) -> &mut Value {
        &mut self.val
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.val == other.val // equality ignores the tag, only value based
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.val)
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        Scalar::new(value)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::new_str(s)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::new_string(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::new_int(i)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::new_float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::new_bool(b)
    }
}
