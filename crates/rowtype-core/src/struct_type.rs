use crate::{element::ElementType, error::StructTypeError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

// Fingerprint format version; bump on any change to the fed byte layout.
const HASH_VERSION: u8 = 1;

///
/// StructKind
///
/// Host shape a descriptor stands for. `Entry` marks a key/value entry
/// row whose host additionally exposes entry-level metadata; it does
/// not change field semantics here.
///
/// IMPORTANT:
/// Tag values are part of the wire contract and must remain fixed.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum StructKind {
    #[default]
    Tuple = 1,
    Entry = 2,
}

impl StructKind {
    /// Stable wire byte for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Reverse lookup used by wire decoders.
    #[must_use]
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Tuple),
            2 => Some(Self::Entry),
            _ => None,
        }
    }
}

///
/// StructType
///
/// Describes the shape of one struct-like result row: ordered field
/// names plus the declared element type at each position. Names need
/// not be unique; order defines the positional field index.
///
/// Immutable once constructed. Holds no external resources, so one
/// instance is safely shared across concurrent readers (typically
/// behind an `Arc`) without synchronization.
///

#[derive(Clone, Debug, Serialize)]
pub struct StructType {
    kind: StructKind,
    field_names: Vec<String>,
    field_types: Vec<ElementType>,

    /// Equality-only alias set used when the same logical shape is
    /// reached via an index-backed entry view. Never consulted by
    /// positional lookup and never serialized.
    #[serde(skip)]
    index_alternative_field_names: Option<Vec<String>>,
}

impl StructType {
    /// Create a descriptor with every field type unconstrained.
    #[must_use]
    pub fn new(field_names: Vec<String>) -> Self {
        let field_types = vec![ElementType::Any; field_names.len()];

        Self {
            kind: StructKind::Tuple,
            field_names,
            field_types,
            index_alternative_field_names: None,
        }
    }

    /// Create a plain-tuple descriptor from explicit name/type sequences.
    ///
    /// Each `None` slot normalizes to [`ElementType::Any`]. A slot count
    /// that does not match the name count is a fatal construction error,
    /// never a silent truncation.
    pub fn with_types(
        field_names: Vec<String>,
        field_types: Vec<Option<ElementType>>,
    ) -> Result<Self, StructTypeError> {
        Self::for_kind(StructKind::Tuple, field_names, field_types)
    }

    /// Create a plain-tuple descriptor that additionally carries an
    /// alternative name set for equality comparison.
    pub fn with_alternatives(
        field_names: Vec<String>,
        alternative_names: Vec<String>,
        field_types: Vec<Option<ElementType>>,
    ) -> Result<Self, StructTypeError> {
        let mut ty = Self::for_kind(StructKind::Tuple, field_names, field_types)?;
        ty.index_alternative_field_names = Some(alternative_names);

        Ok(ty)
    }

    /// General construction form; every other constructor delegates here.
    pub fn for_kind(
        kind: StructKind,
        field_names: Vec<String>,
        field_types: Vec<Option<ElementType>>,
    ) -> Result<Self, StructTypeError> {
        if field_types.len() != field_names.len() {
            return Err(StructTypeError::FieldCountMismatch {
                names: field_names.len(),
                types: field_types.len(),
            });
        }

        let field_types = field_types
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();

        Ok(Self {
            kind,
            field_names,
            field_types,
            index_alternative_field_names: None,
        })
    }

    /// Internal constructor for sequences already known to be
    /// length-matched (wire decode, row derivation).
    pub(crate) fn from_parts(
        kind: StructKind,
        field_names: Vec<String>,
        field_types: Vec<ElementType>,
    ) -> Self {
        debug_assert_eq!(field_names.len(), field_types.len());

        Self {
            kind,
            field_names,
            field_types,
            index_alternative_field_names: None,
        }
    }

    /// Ordered field names. Callers must not rely on uniqueness.
    #[must_use]
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Ordered field types; always length-matched to the names.
    #[must_use]
    pub fn field_types(&self) -> &[ElementType] {
        &self.field_types
    }

    /// Alternative name set, if this descriptor carries one.
    #[must_use]
    pub fn alternative_field_names(&self) -> Option<&[String]> {
        self.index_alternative_field_names.as_deref()
    }

    #[must_use]
    pub const fn kind(&self) -> StructKind {
        self.kind
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.field_names.len()
    }

    /// 0-based position of the first field whose name matches exactly.
    ///
    /// Alternative names are never consulted here.
    pub fn field_index(&self, name: &str) -> Result<usize, StructTypeError> {
        self.field_names
            .iter()
            .position(|candidate| candidate == name)
            .ok_or_else(|| StructTypeError::NoSuchField {
                name: name.to_string(),
            })
    }

    /// Shape equality across both of this descriptor's name sets.
    ///
    /// The other descriptor's primary names are checked against this
    /// descriptor's primary names and against its alternative set, so
    /// the relation is intentionally not symmetric. That is why this is
    /// a named method and not a `PartialEq` impl: std collections
    /// require symmetric equality.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        let names_match = self.field_names == other.field_names
            || self.index_alternative_field_names.as_deref() == Some(other.field_names.as_slice());

        names_match && self.field_types == other.field_types
    }

    /// Canonical, deterministic 128-bit fingerprint of this shape.
    ///
    /// Names and types are fed order-sensitively through one seeded
    /// XXH3 hasher (count-prefixed, each name length-prefixed) rather
    /// than hashed independently and summed, so permuting fields or
    /// swapping the two sequences cannot collide. Alternative names do
    /// not participate, matching [`equals`](Self::equals) on its
    /// primary-name branch. The represented kind does not participate
    /// either, matching equality.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn hash_type(&self) -> [u8; 16] {
        let mut h = Xxh3::with_seed(0);
        h.update(&[HASH_VERSION]);

        h.update(&(self.field_names.len() as u32).to_be_bytes());
        for name in &self.field_names {
            h.update(&(name.len() as u32).to_be_bytes());
            h.update(name.as_bytes());
        }

        h.update(&(self.field_types.len() as u32).to_be_bytes());
        for ty in &self.field_types {
            h.update(&[ty.tag().to_u8()]);
        }

        h.digest128().to_be_bytes()
    }

    // fixed capability tags for this kind

    #[must_use]
    pub const fn is_struct_type(&self) -> bool {
        true
    }

    #[must_use]
    pub const fn is_collection_type(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn is_map_type(&self) -> bool {
        false
    }
}

impl fmt::Display for StructType {
    /// Canonical textual form: `struct<name1:Type1,name2:Type2,...>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct<")?;
        for (i, (name, ty)) in self.field_names.iter().zip(&self.field_types).enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{name}:{ty}")?;
        }
        write!(f, ">")
    }
}

///
/// StructTypeWire
///
/// Serde decode shape used to re-check the length-matching invariant
/// during deserialization. Alternative names are not part of any
/// serialized form, so a round trip erases them.
///

#[derive(Deserialize)]
struct StructTypeWire {
    kind: StructKind,
    field_names: Vec<String>,
    field_types: Vec<ElementType>,
}

impl StructTypeWire {
    fn into_struct_type(self) -> Result<StructType, StructTypeError> {
        let slots = self.field_types.into_iter().map(Some).collect();

        StructType::for_kind(self.kind, self.field_names, slots)
    }
}

impl<'de> Deserialize<'de> for StructType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = StructTypeWire::deserialize(deserializer)?;
        wire.into_struct_type().map_err(serde::de::Error::custom)
    }
}

///
/// TESTS
///
