use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::ZlibDecoder;

use crate::error::DecodeError;

/// Text-to-binary transform applied to a layer payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Payload text bytes are used as-is
    #[default]
    Plain,
    Base64,
}

impl Encoding {
    /// Map an `encoding` attribute to a transform. Unknown or empty tags fall
    /// back to `Plain`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("base64") => Encoding::Base64,
            None | Some("") => Encoding::Plain,
            Some(other) => {
                tracing::debug!(
                    encoding = other,
                    "unsupported payload encoding, treating as plain"
                );
                Encoding::Plain
            }
        }
    }
}

/// Stream compression applied after encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Zlib,
}

impl Compression {
    /// Map a `compression` attribute to a transform. Unknown or empty tags
    /// fall back to `None`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("zlib") => Compression::Zlib,
            None | Some("") => Compression::None,
            Some(other) => {
                tracing::debug!(
                    compression = other,
                    "unsupported payload compression, passing through"
                );
                Compression::None
            }
        }
    }
}

/// Raw contents of a layer's `<data>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    pub text: String,
    pub encoding: Encoding,
    pub compression: Compression,
}

impl Payload {
    pub fn new(text: impl Into<String>, encoding: Encoding, compression: Compression) -> Self {
        Self {
            text: text.into(),
            encoding,
            compression,
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        decode(self)
    }

    pub fn decode_at_most(&self, limit: usize) -> Result<Vec<u8>, DecodeError> {
        decode_at_most(self, limit)
    }
}

/// Reverse a payload's encoding and compression into a flat byte buffer.
pub fn decode(payload: &Payload) -> Result<Vec<u8>, DecodeError> {
    decode_at_most(payload, usize::MAX)
}

/// Like [`decode`], but stops inflating one byte past `limit`, so an
/// oversized stream shows up as a too-long buffer instead of exhausting memory.
pub fn decode_at_most(payload: &Payload, limit: usize) -> Result<Vec<u8>, DecodeError> {
    let text = payload.text.trim();

    let encoded = match payload.encoding {
        Encoding::Base64 => STANDARD.decode(text)?,
        Encoding::Plain => text.as_bytes().to_vec(),
    };

    match payload.compression {
        Compression::Zlib => decompress_zlib(&encoded, limit),
        Compression::None => Ok(encoded),
    }
}

fn decompress_zlib(data: &[u8], limit: usize) -> Result<Vec<u8>, DecodeError> {
    let cap = u64::try_from(limit.saturating_add(1)).unwrap_or(u64::MAX);
    let mut decoder = ZlibDecoder::new(data).take(cap);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(DecodeError::InvalidCompression)?;
    Ok(out)
}
