//! Binary codec shared by the request, response, and document types.
//!
//! Messages are serde values encoded with `bincode` using the standard
//! configuration. A buffer holds exactly one message: decoding fails if the
//! value does not consume every byte, and no message may claim more than
//! [`MAX_MESSAGE_BYTES`].

use bincode::config::Config;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Upper bound on the bytes a single message may claim while decoding.
///
/// Length prefixes are checked against this before anything is allocated, so
/// a corrupt or hostile prefix fails as a decode error.
pub const MAX_MESSAGE_BYTES: usize = 64 * 1024 * 1024;

const fn config() -> impl Config {
    bincode::config::standard().with_limit::<MAX_MESSAGE_BYTES>()
}

/// Errors raised by [`encode`] and [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Serialisation failed.
    #[error("encoding failed: {message}")]
    Encode {
        /// Encoder failure description.
        message: String,
    },
    /// The bytes do not describe a value of the requested type.
    #[error("decoding failed: {message}")]
    Decode {
        /// Decoder failure description.
        message: String,
    },
    /// A value decoded but bytes were left over.
    #[error("{remaining} trailing bytes after a {consumed}-byte message")]
    TrailingBytes {
        /// Bytes consumed by the decoded value.
        consumed: usize,
        /// Bytes left unread.
        remaining: usize,
    },
}

/// Encodes a value into a standalone message buffer.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if the value cannot be serialised.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    bincode::serde::encode_to_vec(value, config()).map_err(|error| {
        CodecError::Encode {
            message: error.to_string(),
        }
    })
}

/// Decodes a value that must span the whole buffer.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed input, including length
/// prefixes beyond [`MAX_MESSAGE_BYTES`], and
/// [`CodecError::TrailingBytes`] when the buffer holds more than one value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    let (value, consumed) =
        bincode::serde::decode_from_slice::<T, _>(bytes, config()).map_err(|error| {
            CodecError::Decode {
                message: error.to_string(),
            }
        })?;

    let remaining = bytes.len().saturating_sub(consumed);
    if remaining > 0 {
        return Err(CodecError::TrailingBytes {
            consumed,
            remaining,
        });
    }
    Ok(value)
}
