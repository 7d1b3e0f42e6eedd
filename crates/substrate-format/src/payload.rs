//! Compressed secondary payload.
//!
//! Everything after the primary block run is one deflate-family stream. Its
//! inflated bytes are framed like the primary stream (magic + blocks) and
//! hold the genome stream.

use std::io::Read;

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use tracing::debug;

use crate::error::{DecodeError, Result};

/// Container detected from the first bytes of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Zlib,
    /// Headerless deflate.
    Raw,
}

impl Compression {
    /// Detect the container from its header bytes.
    #[must_use]
    pub fn detect(data: &[u8]) -> Self {
        match data {
            [0x1F, 0x8B, ..] => Self::Gzip,
            // zlib: CM = 8 and the header checksum holds.
            [cmf, flg, ..]
                if (cmf & 0x0F) == 8 && ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0 =>
            {
                Self::Zlib
            }
            _ => Self::Raw,
        }
    }
}

/// Bytes following the primary block run.
pub fn compressed_tail(file: &[u8], offset: usize) -> Result<&[u8]> {
    match file.get(offset..) {
        Some(tail) if !tail.is_empty() => Ok(tail),
        _ => Err(DecodeError::decompression(format!(
            "no compressed payload after offset {offset}"
        ))),
    }
}

/// Inflate a deflate-family stream.
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    let compression = Compression::detect(compressed);
    let mut inflated = Vec::new();
    let outcome = match compression {
        Compression::Gzip => GzDecoder::new(compressed).read_to_end(&mut inflated),
        Compression::Zlib => ZlibDecoder::new(compressed).read_to_end(&mut inflated),
        Compression::Raw => DeflateDecoder::new(compressed).read_to_end(&mut inflated),
    };
    outcome.map_err(|e| DecodeError::decompression(format!("{compression:?}: {e}")))?;
    debug!(
        ?compression,
        compressed = compressed.len(),
        inflated = inflated.len(),
        "inflated payload"
    );
    Ok(inflated)
}

/// Locate the payload after `offset` and inflate it.
pub fn extract_payload(file: &[u8], offset: usize) -> Result<Vec<u8>> {
    inflate(compressed_tail(file, offset)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::{GzEncoder, ZlibEncoder};

    use super::*;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_detect() {
        assert_eq!(Compression::detect(&gzip(b"x")), Compression::Gzip);
        assert_eq!(Compression::detect(&[0x78, 0x9C, 0]), Compression::Zlib);
        assert_eq!(Compression::detect(&[0x78, 0x00]), Compression::Raw);
        assert_eq!(Compression::detect(&[]), Compression::Raw);
    }

    #[test]
    fn test_inflate_gzip_and_zlib() {
        let body = b"genome stream bytes".repeat(10);
        assert_eq!(inflate(&gzip(&body)).unwrap(), body);

        let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::best());
        encoder.write_all(&body).unwrap();
        assert_eq!(inflate(&encoder.finish().unwrap()).unwrap(), body);
    }

    #[test]
    fn test_extract_after_offset() {
        let mut file = vec![1, 2, 3];
        file.extend(gzip(b"payload"));
        assert_eq!(Compression::detect(&file[3..]), Compression::Gzip);
        assert_eq!(extract_payload(&file, 3).unwrap(), b"payload");
    }

    #[test]
    fn test_empty_tail_fails() {
        let err = extract_payload(&[1, 2, 3], 3).unwrap_err();
        assert!(matches!(err, DecodeError::DecompressionFailure { .. }));
        assert!(extract_payload(&[1, 2, 3], 10).is_err());
    }

    #[test]
    fn test_truncated_gzip_fails() {
        let compressed = gzip(&[7u8; 512]);
        let truncated = &compressed[..compressed.len() / 2];
        assert!(matches!(
            inflate(truncated),
            Err(DecodeError::DecompressionFailure { .. })
        ));
    }
}
