//! The document tree data structures.
//!
//! Leaves first: a [`Value`] is the closed scalar union, a [`Scalar`] pairs
//! a value with an optional type tag, a [`Node`] is a named unit carrying
//! arguments, properties, and children, and a [`Document`] is an ordered
//! sequence of sibling nodes. [`eq_ident`] is the name-matching relation
//! used by every lookup, and [`Numeric`] is the explicit numeric coercion
//! used by [`Value::num`].

mod doc;
mod ident;
mod node;
mod num;
mod scalar;
mod val;

pub use self::doc::Document;
pub use self::ident::eq_ident;
pub use self::node::Node;
pub use self::num::Numeric;
pub use self::scalar::Scalar;
pub use self::val::Value;
