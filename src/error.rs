use crate::tag::Tag;
use std::{fmt, io, str::Utf8Error};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum Error {
    /// Not enough bytes remain for the requested read.
    EndOfBuffer {
        step: &'static str,
        actual: usize,
        expected: usize,
    },
    /// The next tag byte isn't the one the caller asked for. The decoder's cursor is left pointing
    /// at the tag byte, so a different decode may be attempted at the same position.
    TypeMismatch { expected: Tag, actual: u8 },
    /// Buffer is too short or too inconsistent to hold a checksum trailer.
    MalformedTrailer(&'static str),
    /// The CRC32 recomputed over the payload disagrees with the one stored in the trailer.
    ChecksumMismatch { stored: u64, computed: u32 },
    /// The zlib stream couldn't be finalized on compression, or couldn't be parsed on
    /// decompression.
    CompressionFailure(io::Error),
    /// Decompressed data would be larger than the allowed maximum.
    ExceededSize { max: usize, actual: usize },
    /// Decompression was requested after values were already read from the decoder.
    DecompressAfterRead { offset: usize },
    /// A varint payload was malformed: overlong, overflowing, or zero-length.
    BadVarint(&'static str),
    /// A well-formed varint didn't fit the width of the requested kind.
    OutOfRange { tag: Tag, value: i128 },
    /// A string or byte length prefix was negative.
    InvalidLength(i64),
    /// A string payload wasn't valid UTF-8.
    InvalidUtf8(Utf8Error),
}

impl Error {
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    pub fn is_end_of_buffer(&self) -> bool {
        matches!(self, Error::EndOfBuffer { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::EndOfBuffer {
                step,
                actual,
                expected,
            } => write!(
                f,
                "End of buffer: needed {} bytes, but only {} remain on step [{}]",
                expected, actual, step
            ),
            Error::TypeMismatch { expected, actual } => match Tag::try_from(actual) {
                Ok(actual) => write!(
                    f,
                    "Incorrect type: expected {}, found {}",
                    expected.name(),
                    actual.name()
                ),
                Err(actual) => write!(
                    f,
                    "Incorrect type: expected {}, found unknown tag 0x{:02x}",
                    expected.name(),
                    actual
                ),
            },
            Error::MalformedTrailer(msg) => write!(f, "Incorrect trailer byte length: {}", msg),
            Error::ChecksumMismatch { stored, computed } => write!(
                f,
                "CRC check failed: trailer holds 0x{:08x}, data hashes to 0x{:08x}",
                stored, computed
            ),
            Error::CompressionFailure(ref err) => write!(f, "Compression failure: {}", err),
            Error::ExceededSize { max, actual } => write!(
                f,
                "Decompressed size is at least {} bytes, larger than max of {} bytes",
                actual, max
            ),
            Error::DecompressAfterRead { offset } => write!(
                f,
                "Can't decompress after reading: cursor already at byte {}",
                offset
            ),
            Error::BadVarint(msg) => write!(f, "Bad varint: {}", msg),
            Error::OutOfRange { tag, value } => {
                write!(f, "Value {} doesn't fit in {}", value, tag.name())
            }
            Error::InvalidLength(len) => write!(f, "Invalid length prefix: {}", len),
            Error::InvalidUtf8(ref err) => write!(f, "String isn't valid UTF-8: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::CompressionFailure(ref err) => Some(err),
            Error::InvalidUtf8(ref err) => Some(err),
            _ => None,
        }
    }
}

impl std::convert::From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::CompressionFailure(e)
    }
}

impl std::convert::From<Utf8Error> for Error {
    fn from(e: Utf8Error) -> Self {
        Self::InvalidUtf8(e)
    }
}
