use crate::struct_type::StructType;
use std::sync::Arc;

///
/// RowValue
///
/// Capability trait for values that can report their own struct type.
/// Concrete result rows that already hold a shared descriptor override
/// `shared_struct_type` so derivation can reuse it by reference instead
/// of copying the sequences.
///

pub trait RowValue {
    /// The descriptor for this row's shape.
    fn struct_type(&self) -> &StructType;

    /// Shared descriptor handle, when this row owns one.
    fn shared_struct_type(&self) -> Option<&Arc<StructType>> {
        None
    }
}

/// Derive a shareable descriptor from a row value.
///
/// Reuses the row's own descriptor when it offers a shared handle
/// (identity reuse, an aliasing optimization, not a semantic
/// difference); otherwise copies the exposed name/type sequences into a
/// fresh instance. The shared instance is never mutated, since sharing
/// presumes immutability.
#[must_use]
pub fn type_from_row(row: &dyn RowValue) -> Arc<StructType> {
    if let Some(shared) = row.shared_struct_type() {
        return Arc::clone(shared);
    }

    let ty = row.struct_type();

    Arc::new(StructType::from_parts(
        ty.kind(),
        ty.field_names().to_vec(),
        ty.field_types().to_vec(),
    ))
}

///
/// TESTS
///
