//! Nullability-consistency checks for generic type instantiations.
//!
//! The core works over two representations of the same source construct:
//! the resolved semantic type and the raw syntax-tree node. Both implement
//! [`probe::TypeSource`], so the instantiation walker and the shape
//! extractor are written once and the caller picks whichever representation
//! is faithful for a given expression kind.

pub(crate) mod bounds;
pub(crate) mod probe;
pub(crate) mod shape;
pub(crate) mod validate;
pub(crate) mod walk;
