use crate::error::{Error, Result};
use flate2::{read::ZlibDecoder, write::ZlibEncoder};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::io::{Read, Write};

/// Highest zlib compression level.
pub const MAX_LEVEL: u8 = 9;

/// Compression settings used by an [`Encoder`](crate::Encoder) when producing a compressed
/// envelope.
///
/// The envelope is always a zlib stream (DEFLATE with the standard two-byte header and adler32
/// footer); only the effort spent on it is configurable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CompressSerde", into = "CompressSerde")]
pub struct Compress {
    level: u8,
}

impl Compress {
    /// Create a setting with the given zlib level, from 0 (store only) to 9 (smallest output).
    /// Returns `None` for anything above 9.
    pub fn new(level: u8) -> Option<Self> {
        (level <= MAX_LEVEL).then_some(Self { level })
    }

    /// Fastest compression (level 1).
    pub fn fast() -> Self {
        Self { level: 1 }
    }

    /// Smallest output (level 9).
    pub fn best() -> Self {
        Self { level: MAX_LEVEL }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    fn as_flate2(&self) -> flate2::Compression {
        flate2::Compression::new(self.level as u32)
    }
}

impl std::default::Default for Compress {
    fn default() -> Self {
        Self { level: 6 }
    }
}

// Struct used solely for serialization/deserialization
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CompressSerde {
    level: u8,
}

impl TryFrom<CompressSerde> for Compress {
    type Error = &'static str;
    fn try_from(value: CompressSerde) -> Result<Self, Self::Error> {
        Compress::new(value.level).ok_or("zlib compression level must be between 0 and 9")
    }
}

impl From<Compress> for CompressSerde {
    fn from(value: Compress) -> Self {
        Self { level: value.level }
    }
}

/// Compress `src` into a fresh zlib stream.
pub(crate) fn deflate(src: &[u8], compress: Compress) -> Result<Vec<u8>> {
    let _span = tracing::debug_span!("deflate", raw_bytes = src.len(), level = compress.level)
        .entered();
    let mut enc = ZlibEncoder::new(Vec::with_capacity(src.len() / 2 + 16), compress.as_flate2());
    enc.write_all(src)?;
    let out = enc.finish()?;
    tracing::debug!(
        raw = src.len(),
        compressed = out.len(),
        "data compressed"
    );
    Ok(out)
}

/// Inflate a complete zlib stream. Fails if the stream is corrupt or ends early, or if the
/// output would grow past `max_size` bytes.
pub(crate) fn inflate(src: &[u8], max_size: Option<usize>) -> Result<Vec<u8>> {
    let _span = tracing::debug_span!("inflate", compressed_bytes = src.len()).entered();
    let mut out = Vec::with_capacity(src.len().saturating_mul(2));
    let mut dec = ZlibDecoder::new(src);
    match max_size {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded
            dec.by_ref().take((max as u64).saturating_add(1)).read_to_end(&mut out)?;
            if out.len() > max {
                return Err(Error::ExceededSize {
                    max,
                    actual: out.len(),
                });
            }
        }
        None => {
            dec.read_to_end(&mut out)?;
        }
    }
    tracing::debug!(
        compressed = src.len(),
        decompressed = out.len(),
        "data decompressed"
    );
    Ok(out)
}
