//! Core data model for rowtype: struct type descriptors for query result
//! rows, their stable wire encoding, and the row-derivation boundary.

pub mod element;
pub mod error;
pub mod row;
pub mod serialize;
pub mod struct_type;
pub mod wire;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, codecs, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        element::ElementType,
        row::RowValue,
        struct_type::{StructKind, StructType},
    };
}
