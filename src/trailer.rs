//! The integrity trailer: an unsigned varint holding the CRC32 (IEEE) of everything before it,
//! followed by a single byte giving that varint's length.

use crate::error::{Error, Result};
use crate::varint::{put_uvarint, read_uvarint};

/// CRC32 over `data`, using the IEEE polynomial.
pub fn checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Append the trailer for everything currently in `buf`.
pub fn append_trailer(buf: &mut Vec<u8>) {
    let crc = checksum(buf);
    let len = put_uvarint(buf, crc as u64);
    buf.push(len as u8);
}

/// Check the trailer at the end of `data`. On success, returns the length of the payload that
/// precedes the trailer.
pub fn verify_trailer(data: &[u8]) -> Result<usize> {
    let (&len, rest) = data
        .split_last()
        .ok_or(Error::MalformedTrailer("buffer is empty"))?;
    let len = len as usize;
    if len > rest.len() {
        return Err(Error::MalformedTrailer(
            "trailer length byte points past the start of the buffer",
        ));
    }
    let payload_len = rest.len() - len;
    let (payload, crc_bytes) = rest.split_at(payload_len);
    let stored = match read_uvarint(crc_bytes) {
        Ok((stored, _)) => stored,
        Err(Error::BadVarint(msg)) => return Err(Error::MalformedTrailer(msg)),
        Err(_) => return Err(Error::MalformedTrailer("checksum varint is truncated")),
    };
    let computed = checksum(payload);
    if stored != computed as u64 {
        return Err(Error::ChecksumMismatch { stored, computed });
    }
    Ok(payload_len)
}
