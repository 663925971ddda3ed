//! Decoding.
//!
//! A [`Decoder`] reads tagged values back in the order they were encoded. Each `decode_*` call
//! checks the next tag first. On a tag mismatch the cursor is left on the tag byte, so a caller
//! can try a different kind at the same position:
//!
//! ```
//! use tagpack::{Decoder, Encoder};
//!
//! let mut enc = Encoder::new();
//! enc.encode_i32(-7);
//! let data = enc.data();
//!
//! let mut dec = Decoder::new(&data);
//! let err = dec.decode_i64().unwrap_err();
//! assert!(err.is_type_mismatch());
//! assert_eq!(dec.decode_i32().unwrap(), -7);
//! ```
//!
//! Failures after the tag matched (a short payload, a bad length) make no such promise; the
//! cursor may have moved past the tag.

use std::borrow::Cow;
use std::convert::TryFrom;

use crate::compress::inflate;
use crate::error::{Error, Result};
use crate::tag::Tag;
use crate::trailer::verify_trailer;
use crate::varint::{read_uvarint, read_uvarint_window, read_varint_window, MAX_LEN};

/// Sequential value decoder over a byte buffer.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    data: Cow<'a, [u8]>,
    offset: usize,
}

impl<'a> Decoder<'a> {
    /// Create a decoder that borrows `data`. The cursor starts at the first byte.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data: Cow::Borrowed(data),
            offset: 0,
        }
    }

    /// Create a decoder that owns `data`.
    pub fn from_vec(data: Vec<u8>) -> Decoder<'static> {
        Decoder {
            data: Cow::Owned(data),
            offset: 0,
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left after the cursor, including any trailer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The whole buffer being decoded, regardless of cursor position.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Look at the tag under the cursor without moving it. Returns `None` at the end of the
    /// buffer, and `Some(Err(byte))` if the byte isn't a known tag.
    pub fn peek_tag(&self) -> Option<Result<Tag, u8>> {
        self.data.get(self.offset).map(|&n| Tag::try_from(n))
    }

    /// Decode a bool. Any payload byte other than `0x01` reads as `false`.
    pub fn decode_bool(&mut self) -> Result<bool> {
        self.check_tag(Tag::Bool)?;
        let byte = *self.data.get(self.offset).ok_or(Error::EndOfBuffer {
            step: "decode Bool",
            actual: 0,
            expected: 1,
        })?;
        self.offset += 1;
        Ok(byte == 1)
    }

    /// Decode a platform-width signed integer.
    pub fn decode_int(&mut self) -> Result<isize> {
        let v = self.signed(Tag::Int)?;
        narrow(Tag::Int, v)
    }

    /// Decode an `i64`.
    pub fn decode_i64(&mut self) -> Result<i64> {
        self.signed(Tag::Int64)
    }

    /// Decode an `i32`, failing with [`Error::OutOfRange`] if the stored value doesn't fit.
    pub fn decode_i32(&mut self) -> Result<i32> {
        let v = self.signed(Tag::Int32)?;
        narrow(Tag::Int32, v)
    }

    /// Decode an `i16`, failing with [`Error::OutOfRange`] if the stored value doesn't fit.
    pub fn decode_i16(&mut self) -> Result<i16> {
        let v = self.signed(Tag::Int16)?;
        narrow(Tag::Int16, v)
    }

    /// Decode an `i8`, failing with [`Error::OutOfRange`] if the stored value doesn't fit.
    pub fn decode_i8(&mut self) -> Result<i8> {
        let v = self.signed(Tag::Int8)?;
        narrow(Tag::Int8, v)
    }

    /// Decode a platform-width unsigned integer.
    pub fn decode_uint(&mut self) -> Result<usize> {
        let v = self.unsigned(Tag::Uint)?;
        narrow(Tag::Uint, v)
    }

    /// Decode a `u64`.
    pub fn decode_u64(&mut self) -> Result<u64> {
        self.unsigned(Tag::Uint64)
    }

    /// Decode a `u32`, failing with [`Error::OutOfRange`] if the stored value doesn't fit.
    pub fn decode_u32(&mut self) -> Result<u32> {
        let v = self.unsigned(Tag::Uint32)?;
        narrow(Tag::Uint32, v)
    }

    /// Decode a `u16`, failing with [`Error::OutOfRange`] if the stored value doesn't fit.
    pub fn decode_u16(&mut self) -> Result<u16> {
        let v = self.unsigned(Tag::Uint16)?;
        narrow(Tag::Uint16, v)
    }

    /// Decode a `u8`, failing with [`Error::OutOfRange`] if the stored value doesn't fit.
    pub fn decode_u8(&mut self) -> Result<u8> {
        let v = self.unsigned(Tag::Uint8)?;
        narrow(Tag::Uint8, v)
    }

    /// Decode an `f64`.
    pub fn decode_f64(&mut self) -> Result<f64> {
        let bits = self.float(Tag::Float64)?;
        Ok(f64::from_bits(bits))
    }

    /// Decode an `f32`.
    pub fn decode_f32(&mut self) -> Result<f32> {
        let bits = self.float(Tag::Float32)?;
        let bits = u32::try_from(bits).map_err(|_| Error::BadVarint("Float32 wider than 32 bits"))?;
        Ok(f32::from_bits(bits))
    }

    /// Decode a string, failing with [`Error::InvalidUtf8`] if it isn't valid UTF-8.
    pub fn decode_string(&mut self) -> Result<String> {
        let bytes = self.blob(Tag::String)?;
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }

    /// Decode a byte blob.
    pub fn decode_bytes(&mut self) -> Result<Vec<u8>> {
        Ok(self.blob(Tag::Bytes)?.to_vec())
    }

    /// Check the checksum trailer at the end of the buffer. Doesn't move the cursor, and may be
    /// called any number of times.
    pub fn validate(&self) -> Result<()> {
        let _span = tracing::debug_span!("validate", bytes = self.data.len()).entered();
        match verify_trailer(&self.data) {
            Ok(payload_len) => {
                tracing::debug!(payload_len, "checksum verified");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "checksum verification failed");
                Err(e)
            }
        }
    }

    /// Replace the buffer with the result of inflating it as a zlib stream.
    ///
    /// Must happen before anything is decoded: once the cursor has moved this fails with
    /// [`Error::DecompressAfterRead`] and leaves the decoder untouched.
    pub fn decompress(&mut self) -> Result<()> {
        self.decompress_inner(None)
    }

    /// Like [`decompress`](Self::decompress), but fails with [`Error::ExceededSize`] instead of
    /// producing more than `max_size` bytes.
    pub fn decompress_limited(&mut self, max_size: usize) -> Result<()> {
        self.decompress_inner(Some(max_size))
    }

    fn decompress_inner(&mut self, max_size: Option<usize>) -> Result<()> {
        if self.offset != 0 {
            return Err(Error::DecompressAfterRead {
                offset: self.offset,
            });
        }
        let inflated = inflate(&self.data, max_size)?;
        self.data = Cow::Owned(inflated);
        Ok(())
    }

    // Consume the tag byte if it matches `expected`. On mismatch the cursor is left on the tag.
    fn check_tag(&mut self, expected: Tag) -> Result<()> {
        let actual = *self.data.get(self.offset).ok_or(Error::EndOfBuffer {
            step: "read tag",
            actual: 0,
            expected: 1,
        })?;
        if actual != u8::from(expected) {
            tracing::trace!(
                offset = self.offset,
                expected = expected.name(),
                actual,
                "tag mismatch"
            );
            return Err(Error::TypeMismatch { expected, actual });
        }
        self.offset += 1;
        Ok(())
    }

    fn signed(&mut self, tag: Tag) -> Result<i64> {
        self.check_tag(tag)?;
        read_varint_window(&self.data, &mut self.offset, window_of(tag), tag.name())
    }

    fn unsigned(&mut self, tag: Tag) -> Result<u64> {
        self.check_tag(tag)?;
        read_uvarint_window(&self.data, &mut self.offset, window_of(tag), tag.name())
    }

    fn float(&mut self, tag: Tag) -> Result<u64> {
        self.check_tag(tag)?;
        let len = *self.data.get(self.offset).ok_or(Error::EndOfBuffer {
            step: "decode float length",
            actual: 0,
            expected: 1,
        })? as usize;
        self.offset += 1;
        if len == 0 || len > MAX_LEN {
            return Err(Error::BadVarint("float length out of range"));
        }
        let bytes = self.take(len, "decode float bits")?;
        let (bits, _) = read_uvarint(bytes)?;
        Ok(bits)
    }

    fn blob(&mut self, tag: Tag) -> Result<&[u8]> {
        self.check_tag(tag)?;
        let len = read_varint_window(
            &self.data,
            &mut self.offset,
            window_of(tag),
            "decode length prefix",
        )?;
        let len = usize::try_from(len).map_err(|_| Error::InvalidLength(len))?;
        if len == 0 {
            return Ok(&[]);
        }
        self.take(len, "get content")
    }

    fn take(&mut self, len: usize, step: &'static str) -> Result<&[u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(Error::EndOfBuffer {
                step,
                actual: remaining,
                expected: len,
            });
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.data[start..self.offset])
    }
}

fn window_of(tag: Tag) -> usize {
    tag.window().unwrap_or(0)
}

fn narrow<T, V>(tag: Tag, v: V) -> Result<T>
where
    T: TryFrom<V>,
    V: Copy + Into<i128>,
{
    T::try_from(v).map_err(|_| Error::OutOfRange {
        tag,
        value: v.into(),
    })
}
