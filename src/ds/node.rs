use super::{eq_ident, Scalar};
use std::collections::BTreeMap;

/// A named unit of the document tree.
///
/// A node carries an optional type tag, a name, an ordered sequence of
/// positional [`Scalar`] arguments, a mapping of named properties (unique
/// keys, insertion order irrelevant), and an ordered sequence of child
/// nodes. A node is fully nestable: it can hold arguments, properties, and
/// children simultaneously.
///
/// A node exclusively owns its arguments, properties, and children;
/// ownership of a tree is strictly tree-shaped.
///
/// # Example
/// ```rust
/// # use doctree::*;
/// let mut node = Node::new("package");
/// node.push_arg("doctree");
/// node.set_prop("version", "0.3.1");
/// node.push_child(Node::new("authors"));
///
/// assert_eq!(node.name(), "package");
/// assert_eq!(node.args()[0].str(), Some("doctree"));
/// assert_eq!(node.prop("version").and_then(|v| v.str()), Some("0.3.1"));
/// assert!(node.child("authors").is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Node {
    /// The optional type annotation.
    pub tag: Option<String>,
    /// The node name.
    pub name: String,
    /// The ordered positional arguments.
    pub args: Vec<Scalar>,
    /// The named properties. Keys are unique; ordering carries no meaning.
    pub props: BTreeMap<String, Scalar>,
    /// The ordered child nodes.
    pub children: Vec<Node>,
}

impl Node {
    /// A new node with the given name and nothing else.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A new node carrying a type tag.
    pub fn with_tag<T: Into<String>, S: Into<String>>(tag: T, name: S) -> Self {
        Self {
            tag: Some(tag.into()),
            name: name.into(),
            ..Self::default()
        }
    }

    /// The node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type tag, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// The positional arguments, in order.
    pub fn args(&self) -> &[Scalar] {
        &self.args
    }

    /// The child nodes, in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The named properties.
    pub fn props(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Append a positional argument.
    pub fn push_arg<V: Into<Scalar>>(&mut self, value: V) {
        self.args.push(value.into());
    }

    /// Set a property, replacing any previous value under the same key.
    pub fn set_prop<S: Into<String>, V: Into<Scalar>>(&mut self, name: S, value: V) {
        self.props.insert(name.into(), value.into());
    }

    /// Append a child node.
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// The sole positional argument, if the node carries exactly one.
    ///
    /// Scalar-target node decoding is defined only for single-argument
    /// nodes; this is the accessor behind that contract.
    ///
    /// # Example
    /// ```rust
    /// # use doctree::*;
    /// let mut node = Node::new("port");
    /// assert!(node.single_arg().is_none());
    /// node.push_arg(8080i64);
    /// assert_eq!(node.single_arg().and_then(|a| a.int()), Some(8080));
    /// node.push_arg(8081i64);
    /// assert!(node.single_arg().is_none());
    /// ```
    pub fn single_arg(&self) -> Option<&Scalar> {
        match self.args.as_slice() {
            [arg] => Some(arg),
            _ => None,
        }
    }

    /// Look up a property by [identifier-equivalent](crate::eq_ident) name.
    ///
    /// The **last** equivalent key wins when several fold to the same
    /// identifier (key order is the map's, which is deterministic).
    pub fn prop(&self, name: &str) -> Option<&Scalar> {
        self.props()
            .filter(|(key, _)| eq_ident(key, name))
            .map(|(_, value)| value)
            .last()
    }

    /// Look up a child by [identifier-equivalent](crate::eq_ident) name.
    ///
    /// The **last** matching child wins, consistent with later entries
    /// overriding earlier ones throughout the decode engine.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .filter(|child| eq_ident(child.name(), name))
            .last()
    }
}
