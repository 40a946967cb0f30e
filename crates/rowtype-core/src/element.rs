use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ElementType
///
/// Declared type of one field within a struct type. `Any` means no
/// narrower type is known; it is the default fill for positions left
/// unspecified at construction.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ElementType {
    #[default]
    Any,
    Bool,
    Int,
    Float,
    Text,
    Blob,
    Timestamp,
}

///
/// ElementTag
///
/// Stable wire tag for each element-type variant.
///
/// IMPORTANT:
/// Tag values are part of the wire contract and must remain fixed.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ElementTag {
    Any = 1,
    Bool = 2,
    Int = 3,
    Float = 4,
    Text = 5,
    Blob = 6,
    Timestamp = 7,
}

impl ElementTag {
    /// Stable wire byte for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Reverse lookup used by wire decoders; an unknown byte is a
    /// decode failure at the call site.
    #[must_use]
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Any),
            2 => Some(Self::Bool),
            3 => Some(Self::Int),
            4 => Some(Self::Float),
            5 => Some(Self::Text),
            6 => Some(Self::Blob),
            7 => Some(Self::Timestamp),
            _ => None,
        }
    }
}

impl ElementType {
    /// Stable wire tag for this element type.
    #[must_use]
    pub const fn tag(self) -> ElementTag {
        match self {
            Self::Any => ElementTag::Any,
            Self::Bool => ElementTag::Bool,
            Self::Int => ElementTag::Int,
            Self::Float => ElementTag::Float,
            Self::Text => ElementTag::Text,
            Self::Blob => ElementTag::Blob,
            Self::Timestamp => ElementTag::Timestamp,
        }
    }

    /// Exhaustive reverse of [`tag`](Self::tag).
    #[must_use]
    pub const fn from_tag(tag: ElementTag) -> Self {
        match tag {
            ElementTag::Any => Self::Any,
            ElementTag::Bool => Self::Bool,
            ElementTag::Int => Self::Int,
            ElementTag::Float => Self::Float,
            ElementTag::Text => Self::Text,
            ElementTag::Blob => Self::Blob,
            ElementTag::Timestamp => Self::Timestamp,
        }
    }

    /// Stable human-readable label used by `Display` surfaces.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Text => "Text",
            Self::Blob => "Blob",
            Self::Timestamp => "Timestamp",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// TESTS
///
