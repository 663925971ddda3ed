//! Encoding.
//!
//! An [`Encoder`] appends tagged values to an internal buffer, one after another. Nothing about
//! the sequence is recorded beyond each value's tag, so a decoder must ask for the same kinds in
//! the same order.

use crate::compress::{deflate, Compress};
use crate::error::Result;
use crate::tag::Tag;
use crate::trailer::append_trailer;
use crate::varint::{put_uvarint, put_uvarint_window, put_varint_window};

/// Sequential value encoder.
///
/// ```
/// use tagpack::{Decoder, Encoder};
///
/// let mut enc = Encoder::new();
/// enc.encode_str("answer");
/// enc.encode_u8(42);
///
/// let data = enc.data();
/// let mut dec = Decoder::new(&data);
/// dec.validate().unwrap();
/// assert_eq!(dec.decode_string().unwrap(), "answer");
/// assert_eq!(dec.decode_u8().unwrap(), 42);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
    compress: Compress,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with room for `capacity` bytes before it needs to reallocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            compress: Compress::default(),
        }
    }

    /// Create an encoder whose [`compress`](Self::compress) uses the given settings.
    pub fn with_compression(compress: Compress) -> Self {
        Self {
            buf: Vec::new(),
            compress,
        }
    }

    pub fn compression(&self) -> Compress {
        self.compress
    }

    /// Encode a bool as a single `0x00`/`0x01` byte.
    pub fn encode_bool(&mut self, v: bool) {
        self.buf.push(Tag::Bool.into());
        self.buf.push(v as u8);
    }

    /// Encode a platform-width signed integer in an 8-byte window.
    pub fn encode_int(&mut self, v: isize) {
        self.signed(Tag::Int, v as i64);
    }

    /// Encode an `i64` as a zigzag varint in an 8-byte window.
    pub fn encode_i64(&mut self, v: i64) {
        self.signed(Tag::Int64, v);
    }

    /// Encode an `i32` as a zigzag varint in a 4-byte window.
    pub fn encode_i32(&mut self, v: i32) {
        self.signed(Tag::Int32, v as i64);
    }

    /// Encode an `i16` as a zigzag varint in a 2-byte window.
    pub fn encode_i16(&mut self, v: i16) {
        self.signed(Tag::Int16, v as i64);
    }

    /// Encode an `i8` as a zigzag varint in a 1-byte window.
    pub fn encode_i8(&mut self, v: i8) {
        self.signed(Tag::Int8, v as i64);
    }

    /// Encode a platform-width unsigned integer in an 8-byte window.
    pub fn encode_uint(&mut self, v: usize) {
        self.unsigned(Tag::Uint, v as u64);
    }

    /// Encode a `u64` as a varint in an 8-byte window.
    pub fn encode_u64(&mut self, v: u64) {
        self.unsigned(Tag::Uint64, v);
    }

    /// Encode a `u32` as a varint in a 4-byte window.
    pub fn encode_u32(&mut self, v: u32) {
        self.unsigned(Tag::Uint32, v as u64);
    }

    /// Encode a `u16` as a varint in a 2-byte window.
    pub fn encode_u16(&mut self, v: u16) {
        self.unsigned(Tag::Uint16, v as u64);
    }

    /// Encode a `u8` as a varint in a 1-byte window.
    pub fn encode_u8(&mut self, v: u8) {
        self.unsigned(Tag::Uint8, v as u64);
    }

    /// Encode an `f64` as its IEEE-754 bits, length-prefixed.
    pub fn encode_f64(&mut self, v: f64) {
        self.float(Tag::Float64, v.to_bits());
    }

    /// Encode an `f32` as its IEEE-754 bits, length-prefixed.
    pub fn encode_f32(&mut self, v: f32) {
        self.float(Tag::Float32, v.to_bits() as u64);
    }

    /// Encode a UTF-8 string behind a length prefix.
    pub fn encode_str(&mut self, v: &str) {
        self.blob(Tag::String, v.as_bytes());
    }

    /// Encode a byte blob behind a length prefix.
    pub fn encode_bytes(&mut self, v: &[u8]) {
        self.blob(Tag::Bytes, v);
    }

    /// Returns a copy of everything encoded so far, with the checksum trailer appended.
    ///
    /// The trailer is computed fresh on every call and never kept in the encoder, so encoding
    /// may continue afterwards.
    pub fn data(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.buf.len() + 6);
        out.extend_from_slice(&self.buf);
        append_trailer(&mut out);
        out
    }

    /// Discard everything encoded so far. Buffers previously returned by [`data`](Self::data)
    /// or [`compress`](Self::compress) are unaffected.
    pub fn flush(&mut self) {
        self.buf.clear();
    }

    /// Returns a zlib-compressed copy of [`data`](Self::data), so the checksum trailer ends up
    /// inside the compressed stream.
    pub fn compress(&self) -> Result<Vec<u8>> {
        deflate(&self.data(), self.compress)
    }

    /// Encoded bytes so far, without a trailer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Length of the encoded bytes so far, without a trailer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn signed(&mut self, tag: Tag, v: i64) {
        self.buf.push(tag.into());
        put_varint_window(&mut self.buf, v, window_of(tag));
    }

    fn unsigned(&mut self, tag: Tag, v: u64) {
        self.buf.push(tag.into());
        put_uvarint_window(&mut self.buf, v, window_of(tag));
    }

    // Floats carry their own length byte instead of a fixed window
    fn float(&mut self, tag: Tag, bits: u64) {
        self.buf.push(tag.into());
        let len_pos = self.buf.len();
        self.buf.push(0);
        let len = put_uvarint(&mut self.buf, bits);
        self.buf[len_pos] = len as u8;
    }

    fn blob(&mut self, tag: Tag, v: &[u8]) {
        self.buf.push(tag.into());
        put_varint_window(&mut self.buf, v.len() as i64, window_of(tag));
        self.buf.extend_from_slice(v);
    }
}

fn window_of(tag: Tag) -> usize {
    tag.window().unwrap_or(0)
}
