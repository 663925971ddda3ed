//! LEB128 variable-length integers, zigzag signed mapping, and the fixed-window forms used by
//! tagged integer payloads.
//!
//! A window is the number of bytes a payload reserves on the wire. The natural varint is written
//! first and zero-padded out to the window. A value whose natural encoding is longer than its
//! window is written in full, so the window grows to fit it: nothing is truncated or saturated,
//! and every value of every width round-trips. Values that fit produce exactly `window` bytes.
//!
//! The fixed-window wire format only ever held values that fit their window, and wider ones
//! couldn't be encoded at all. Growing the window extends that format. On the read side it is
//! kept tight: a slot may only extend as far as the natural length of the widest value its width
//! can hold (2, 3, 5 or 10 bytes for 8, 16, 32 or 64 bits), and an extended varint must be
//! minimal. A stray continuation bit therefore can't swallow the value that follows.

use crate::error::{Error, Result};

/// Longest possible encoding of a `u64`.
pub const MAX_LEN: usize = 10;

/// Zigzag-encode a signed i64 into an unsigned u64.
/// Maps: 0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, ...
#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Zigzag-decode an unsigned u64 back to a signed i64.
#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ (-((value & 1) as i64))
}

/// Append the natural LEB128 encoding of `value` to `buf`, returning how many bytes it took.
pub fn put_uvarint(buf: &mut Vec<u8>, mut value: u64) -> usize {
    let start = buf.len();
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
    buf.len() - start
}

/// Append `value` to `buf` as an unsigned varint occupying at least `window` bytes.
pub fn put_uvarint_window(buf: &mut Vec<u8>, value: u64, window: usize) {
    let len = put_uvarint(buf, value);
    if len < window {
        buf.resize(buf.len() + (window - len), 0);
    }
}

/// Append `value` to `buf` as a zigzag varint occupying at least `window` bytes.
pub fn put_varint_window(buf: &mut Vec<u8>, value: i64, window: usize) {
    put_uvarint_window(buf, zigzag_encode(value), window)
}

/// Decode an unsigned varint from the start of `data`, returning the value and the number of
/// bytes it used. Trailing bytes after the varint are ignored.
pub fn read_uvarint(data: &[u8]) -> Result<(u64, usize)> {
    let mut result: u64 = 0;
    for (i, &byte) in data.iter().enumerate() {
        if i == MAX_LEN {
            return Err(Error::BadVarint("longer than 10 bytes"));
        }
        let payload = (byte & 0x7F) as u64;
        if i == MAX_LEN - 1 && payload > 1 {
            return Err(Error::BadVarint("overflows 64 bits"));
        }
        result |= payload << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
    }
    Err(Error::EndOfBuffer {
        step: "decode varint continuation",
        actual: data.len(),
        expected: data.len() + 1,
    })
}

/// Longest encoding a value stored in a `window`-byte slot may grow to: the natural length of
/// the largest value of the matching integer width.
pub fn max_window_len(window: usize) -> usize {
    match window {
        0 | 1 => 2,
        2 => 3,
        3 | 4 => 5,
        _ => MAX_LEN,
    }
}

/// Decode an unsigned varint stored in a `window`-byte slot of `data` starting at `*pos`, and
/// advance `*pos` past the slot. Fails without moving `*pos` if fewer than `window` bytes
/// remain, or if the varint runs past [`max_window_len`] or is padded out beyond the window.
pub fn read_uvarint_window(
    data: &[u8],
    pos: &mut usize,
    window: usize,
    step: &'static str,
) -> Result<u64> {
    let remaining = data.len().saturating_sub(*pos);
    if remaining < window {
        return Err(Error::EndOfBuffer {
            step,
            actual: remaining,
            expected: window,
        });
    }
    let limit = remaining.min(max_window_len(window));
    let (value, len) = match read_uvarint(&data[*pos..*pos + limit]) {
        Ok(v) => v,
        Err(e) if e.is_end_of_buffer() && limit < remaining => {
            return Err(Error::BadVarint("runs past the end of its window"))
        }
        Err(e) => return Err(e),
    };
    // Only a value too large for the window extends it, and such a varint never ends in zero
    if len > window && data[*pos + len - 1] == 0 {
        return Err(Error::BadVarint("overlong encoding past its window"));
    }
    *pos += len.max(window);
    Ok(value)
}

/// Signed counterpart of [`read_uvarint_window`].
pub fn read_varint_window(
    data: &[u8],
    pos: &mut usize,
    window: usize,
    step: &'static str,
) -> Result<i64> {
    read_uvarint_window(data, pos, window, step).map(zigzag_decode)
}
