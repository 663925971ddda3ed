//! tagpack is a small sequential binary format. An [`Encoder`] appends typed values to a buffer,
//! and a [`Decoder`] reads them back in the same order, checking each value's type tag and
//! every length against the bytes actually available.
//!
//! Beyond one tag byte per value the format describes nothing: there are no field names, no
//! nesting, and no schema. Reading values in a different order or as different kinds gives a
//! typed error rather than a wrong value.
//!
//! On top of the values it provides:
//!
//! - A checksum trailer. [`Encoder::data`] appends the CRC32 (IEEE) of the buffer, and
//! 	[`Decoder::validate`] recomputes and compares it.
//! - Optional compression. [`Encoder::compress`] wraps the trailer-bearing buffer in a zlib
//! 	stream, and [`Decoder::decompress`] unwraps it again.
//!
//! # Wire format
//!
//! Each value is a tag byte followed by a payload:
//!
//! | Kind | Tag | Payload |
//! |---|---|---|
//! | bool | `0x00` | one byte, `0x00` or `0x01` |
//! | int, int64, int32, int16, int8 | `0x01`..=`0x05` | zigzag varint in an 8/8/4/2/1 byte window |
//! | uint, uint64, uint32, uint16, uint8 | `0x06`..=`0x0A` | unsigned varint in an 8/8/4/2/1 byte window |
//! | float64, float32 | `0x0B`, `0x0C` | length byte `n`, then `n` bytes of unsigned varint holding the IEEE-754 bits |
//! | string, bytes | `0x0D`, `0x0E` | zigzag varint length in an 8 byte window, then that many raw bytes |
//! | (reserved) | `0x0F` | never written, never accepted |
//!
//! A varint is written at its natural LEB128 length and zero-padded to fill its window. A value
//! too large for its window is written in full, and the window grows to hold it.
//!
//! The trailer is the unsigned varint of the CRC32 of every preceding byte, followed by one byte
//! holding that varint's length.
//!
//! # Example
//!
//! ```
//! use tagpack::{Decoder, Encoder};
//!
//! let mut enc = Encoder::new();
//! enc.encode_str("{ \"name\": \"pi\" }");
//! enc.encode_f64(std::f64::consts::PI);
//! let packed = enc.compress().unwrap();
//!
//! let mut dec = Decoder::new(&packed);
//! dec.decompress().unwrap();
//! dec.validate().unwrap();
//! assert_eq!(dec.decode_string().unwrap(), "{ \"name\": \"pi\" }");
//! assert_eq!(dec.decode_f64().unwrap(), std::f64::consts::PI);
//! ```

mod compress;
mod error;
mod tag;
mod trailer;

pub mod decode;
pub mod encode;
pub mod varint;

pub use compress::{Compress, MAX_LEVEL};
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{Error, Result};
pub use tag::Tag;
pub use trailer::checksum;
