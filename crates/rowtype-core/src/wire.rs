use crate::{
    element::{ElementTag, ElementType},
    struct_type::{StructKind, StructType},
};
use thiserror::Error as ThisError;

///
/// Stable wire codec for struct type descriptors.
///
/// Layout, in order: format version byte, represented-kind tag byte,
/// field names as a count-prefixed sequence of length-prefixed UTF-8
/// strings, field types as a count-prefixed sequence of element tags.
/// All counts and lengths are big-endian `u32`.
///
/// Alternative field names are a runtime-only equality aid and are
/// never written; a serialize/deserialize round trip erases them.
///

/// Format version byte leading every encoded descriptor.
pub const WIRE_VERSION: u8 = 1;

/// Registry identifier for struct type descriptors inside a host
/// polymorphic-object framing. The registry itself is the host's
/// concern; this value must never change once data has been persisted.
pub const WIRE_CLASS_ID: u8 = 41;

// Defensive decode bounds for untrusted descriptor input.
const MAX_WIRE_FIELDS: u32 = 4096;
const MAX_WIRE_NAME_BYTES: u32 = 64 * 1024;

///
/// WireError
///
/// Malformed wire data. Decoding aborts on the first inconsistency; a
/// partially built descriptor is never observable.
///

#[derive(Debug, Eq, ThisError, PartialEq)]
pub enum WireError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("unknown wire format version: {version}")]
    UnknownVersion { version: u8 },

    #[error("unknown struct kind tag: {tag}")]
    UnknownKindTag { tag: u8 },

    #[error("unknown element type tag: {tag}")]
    UnknownElementTag { tag: u8 },

    #[error("field count {count} exceeds decode limit {max}")]
    FieldCountExceedsLimit { count: u32, max: u32 },

    #[error("field name length {len} exceeds decode limit {max}")]
    NameLengthExceedsLimit { len: u32, max: u32 },

    #[error("field type count {types} does not match field name count {names}")]
    FieldCountMismatch { names: u32, types: u32 },

    #[error("field name at index {index} is not valid UTF-8")]
    InvalidUtf8 { index: usize },

    #[error("{remaining} trailing bytes after descriptor")]
    TrailingBytes { remaining: usize },
}

///
/// ByteReader
///
/// Positional reader over untrusted descriptor bytes.
///

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    const fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < len {
            return Err(WireError::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }

        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;

        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, WireError> {
        let raw = self.read_bytes(4)?;

        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }
}

impl StructType {
    /// Encode this descriptor into its stable wire form.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(10 + self.field_count() * 8);

        out.push(WIRE_VERSION);
        out.push(self.kind().to_u8());

        out.extend_from_slice(&(self.field_names().len() as u32).to_be_bytes());
        for name in self.field_names() {
            out.extend_from_slice(&(name.len() as u32).to_be_bytes());
            out.extend_from_slice(name.as_bytes());
        }

        out.extend_from_slice(&(self.field_types().len() as u32).to_be_bytes());
        for ty in self.field_types() {
            out.push(ty.tag().to_u8());
        }

        out
    }

    /// Decode a descriptor from its stable wire form.
    ///
    /// The whole reconstruction aborts on the first inconsistency, so
    /// the length-matching invariant holds for every value returned.
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let mut reader = ByteReader::new(bytes);

        let version = reader.read_u8()?;
        if version != WIRE_VERSION {
            return Err(WireError::UnknownVersion { version });
        }

        let kind_tag = reader.read_u8()?;
        let kind =
            StructKind::from_u8(kind_tag).ok_or(WireError::UnknownKindTag { tag: kind_tag })?;

        let name_count = reader.read_u32()?;
        if name_count > MAX_WIRE_FIELDS {
            return Err(WireError::FieldCountExceedsLimit {
                count: name_count,
                max: MAX_WIRE_FIELDS,
            });
        }

        let mut field_names = Vec::with_capacity(name_count as usize);
        for index in 0..name_count as usize {
            let len = reader.read_u32()?;
            if len > MAX_WIRE_NAME_BYTES {
                return Err(WireError::NameLengthExceedsLimit {
                    len,
                    max: MAX_WIRE_NAME_BYTES,
                });
            }

            let raw = reader.read_bytes(len as usize)?;
            let name =
                std::str::from_utf8(raw).map_err(|_| WireError::InvalidUtf8 { index })?;
            field_names.push(name.to_string());
        }

        let type_count = reader.read_u32()?;
        if type_count != name_count {
            return Err(WireError::FieldCountMismatch {
                names: name_count,
                types: type_count,
            });
        }

        let mut field_types = Vec::with_capacity(type_count as usize);
        for _ in 0..type_count {
            let tag_byte = reader.read_u8()?;
            let tag = ElementTag::from_u8(tag_byte)
                .ok_or(WireError::UnknownElementTag { tag: tag_byte })?;
            field_types.push(ElementType::from_tag(tag));
        }

        if reader.remaining() > 0 {
            return Err(WireError::TrailingBytes {
                remaining: reader.remaining(),
            });
        }

        Ok(Self::from_parts(kind, field_names, field_types))
    }
}

///
/// TESTS
///
