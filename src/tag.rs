use std::convert::TryFrom;

/// Type tags. Every encoded value starts with exactly one of these bytes.
///
/// Tag values are part of the wire format and never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Bool,
    Int,
    Int64,
    Int32,
    Int16,
    Int8,
    Uint,
    Uint64,
    Uint32,
    Uint16,
    Uint8,
    Float64,
    Float32,
    String,
    Bytes,
    /// Reserved for sequences. No encoder writes it and no decoder accepts it; it only exists so
    /// the code stays taken.
    Slice,
}

impl Tag {
    /// Every tag, in wire order.
    pub const ALL: [Tag; 16] = [
        Tag::Bool,
        Tag::Int,
        Tag::Int64,
        Tag::Int32,
        Tag::Int16,
        Tag::Int8,
        Tag::Uint,
        Tag::Uint64,
        Tag::Uint32,
        Tag::Uint16,
        Tag::Uint8,
        Tag::Float64,
        Tag::Float32,
        Tag::String,
        Tag::Bytes,
        Tag::Slice,
    ];

    /// Construct a tag from a single byte. Returns `None` if the byte isn't a known tag.
    pub fn from_u8(n: u8) -> Option<Tag> {
        Tag::ALL.get(n as usize).copied()
    }

    /// Converts a tag into its single-byte representation.
    pub fn into_u8(self) -> u8 {
        match self {
            Tag::Bool => 0x00,
            Tag::Int => 0x01,
            Tag::Int64 => 0x02,
            Tag::Int32 => 0x03,
            Tag::Int16 => 0x04,
            Tag::Int8 => 0x05,
            Tag::Uint => 0x06,
            Tag::Uint64 => 0x07,
            Tag::Uint32 => 0x08,
            Tag::Uint16 => 0x09,
            Tag::Uint8 => 0x0A,
            Tag::Float64 => 0x0B,
            Tag::Float32 => 0x0C,
            Tag::String => 0x0D,
            Tag::Bytes => 0x0E,
            Tag::Slice => 0x0F,
        }
    }

    pub fn name(&self) -> &'static str {
        use self::Tag::*;
        match self {
            Bool => "Bool",
            Int => "Int",
            Int64 => "Int64",
            Int32 => "Int32",
            Int16 => "Int16",
            Int8 => "Int8",
            Uint => "Uint",
            Uint64 => "Uint64",
            Uint32 => "Uint32",
            Uint16 => "Uint16",
            Uint8 => "Uint8",
            Float64 => "Float64",
            Float32 => "Float32",
            String => "String",
            Bytes => "Bytes",
            Slice => "Slice",
        }
    }

    /// Fixed varint window following the tag, in bytes. Integer kinds use it for the value
    /// itself, strings and byte blobs for their length prefix. Bool, float, and the reserved
    /// slice tag have no window.
    pub fn window(&self) -> Option<usize> {
        use self::Tag::*;
        match self {
            Int | Int64 | Uint | Uint64 | String | Bytes => Some(8),
            Int32 | Uint32 => Some(4),
            Int16 | Uint16 => Some(2),
            Int8 | Uint8 => Some(1),
            Bool | Float64 | Float32 | Slice => None,
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, Tag::Slice)
    }
}

impl From<Tag> for u8 {
    fn from(val: Tag) -> u8 {
        val.into_u8()
    }
}

impl TryFrom<u8> for Tag {
    type Error = u8;
    fn try_from(val: u8) -> Result<Tag, u8> {
        Tag::from_u8(val).ok_or(val)
    }
}
