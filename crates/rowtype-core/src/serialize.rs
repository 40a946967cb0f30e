use serde::{Serialize, de::DeserializeOwned};
use serde_cbor::{from_slice, to_vec};
use thiserror::Error as ThisError;

/// Generic CBOR serialization infrastructure.
///
/// This module is format-level only:
/// - No descriptor-layer constants or policy limits are defined here.
/// - Callers that need bounded decode must pass explicit limits.

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("serialize error: {0}")]
    Serialize(String),

    #[error("deserialize error: {0}")]
    Deserialize(String),

    #[error("deserialize size limit exceeded: {len} bytes (limit {max_bytes})")]
    DeserializeSizeLimitExceeded { len: usize, max_bytes: usize },
}

/// Serialize a value into CBOR bytes.
pub fn serialize<T>(ty: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    to_vec(ty).map_err(|e| SerializeError::Serialize(e.to_string()))
}

/// Deserialize a value produced by [`serialize`].
pub fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    from_slice(bytes).map_err(|e| SerializeError::Deserialize(e.to_string()))
}

/// Deserialize a value produced by [`serialize`], with an explicit size limit.
///
/// Size limits are caller policy, not serialization-format policy.
pub fn deserialize_bounded<T>(bytes: &[u8], max_bytes: usize) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    if bytes.len() > max_bytes {
        return Err(SerializeError::DeserializeSizeLimitExceeded {
            len: bytes.len(),
            max_bytes,
        });
    }

    deserialize(bytes)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{SerializeError, deserialize, deserialize_bounded, serialize};
    use crate::{element::ElementType, struct_type::StructType};

    fn sample_type() -> StructType {
        StructType::with_types(
            vec!["x".to_string(), "y".to_string()],
            vec![Some(ElementType::Int), None],
        )
        .expect("sample descriptor should construct")
    }

    #[test]
    fn cbor_round_trip_preserves_descriptor_shape() {
        let ty = sample_type();

        let bytes = serialize(&ty).expect("descriptor should serialize");
        let back: StructType = deserialize(&bytes).expect("descriptor should deserialize");

        assert!(back.equals(&ty));
        assert_eq!(back.field_types(), &[ElementType::Int, ElementType::Any]);
    }

    #[test]
    fn bounded_decode_enforces_the_caller_limit() {
        let bytes = serialize(&sample_type()).expect("descriptor should serialize");

        let err = deserialize_bounded::<StructType>(&bytes, bytes.len() - 1)
            .expect_err("oversized payload should be rejected");
        assert!(matches!(
            err,
            SerializeError::DeserializeSizeLimitExceeded { .. }
        ));

        let back: StructType = deserialize_bounded(&bytes, bytes.len())
            .expect("payload at the limit should decode");
        assert!(back.equals(&sample_type()));
    }

    #[test]
    fn garbage_bytes_are_a_deserialize_error() {
        let err = deserialize::<StructType>(&[0xde, 0xad, 0xbe, 0xef])
            .expect_err("garbage should not decode");
        assert!(matches!(err, SerializeError::Deserialize(_)));
    }
}
