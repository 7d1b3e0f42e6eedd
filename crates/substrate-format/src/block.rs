//! Block-data framing of the object stream.
//!
//! # Structure
//!
//! | Bytes       | Meaning                                  |
//! |-------------|------------------------------------------|
//! | `AC ED 00 05` | stream magic                           |
//! | `77 LL ...` | short block, 1-byte length, payload      |
//! | `7A LLLLLLLL ...` | long block, 4-byte length, payload |
//!
//! Blocks repeat until the end of the stream or until a byte that is not a
//! block tag. The payloads of consecutive blocks form one logical buffer.

use tracing::{debug, trace};

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Result};

/// Object-stream magic.
pub const STREAM_MAGIC: [u8; 4] = [0xAC, 0xED, 0x00, 0x05];

/// Tag of a block with a 1-byte length.
pub const TC_BLOCKDATA: u8 = 0x77;

/// Tag of a block with a 4-byte length.
pub const TC_BLOCKDATALONG: u8 = 0x7A;

/// What to do with a byte that is not a block tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagPolicy {
    /// Stop before the byte; it and everything after it are left unconsumed.
    #[default]
    Tolerant,
    /// Fail with [`DecodeError::UnexpectedTag`].
    Strict,
}

/// Result of one reassembly pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassembled {
    /// Concatenated block payloads in stream order.
    pub payload: Vec<u8>,
    /// Bytes consumed from the input, magic included.
    pub consumed: usize,
    /// Number of blocks read.
    pub blocks: usize,
}

/// Strip the magic and block framing from `data`.
pub fn reassemble(data: &[u8], policy: TagPolicy) -> Result<Reassembled> {
    let mut cursor = ByteCursor::new(data);
    read_magic(&mut cursor)?;

    let mut payload = Vec::new();
    let mut blocks = 0usize;
    while let Some(tag) = cursor.peek_u8() {
        let offset = cursor.position();
        let len = match tag {
            TC_BLOCKDATA => {
                cursor.read_u8()?;
                usize::from(cursor.read_u8()?)
            }
            TC_BLOCKDATALONG => {
                cursor.read_u8()?;
                cursor.read_u32()? as usize
            }
            other => match policy {
                TagPolicy::Tolerant => {
                    debug!(tag = other, offset, "block run ended at non-block tag");
                    break;
                }
                TagPolicy::Strict => {
                    return Err(DecodeError::UnexpectedTag { tag: other, offset });
                }
            },
        };
        trace!(tag, offset, len, "block");
        payload.extend_from_slice(cursor.take(len)?);
        blocks += 1;
    }

    debug!(
        blocks,
        consumed = cursor.position(),
        payload_len = payload.len(),
        "reassembled block stream"
    );
    Ok(Reassembled {
        payload,
        consumed: cursor.position(),
        blocks,
    })
}

fn read_magic(cursor: &mut ByteCursor<'_>) -> Result<()> {
    let found = cursor.rest().get(..STREAM_MAGIC.len());
    if found != Some(&STREAM_MAGIC[..]) {
        let found = cursor
            .rest()
            .iter()
            .take(STREAM_MAGIC.len())
            .copied()
            .collect();
        return Err(DecodeError::MissingMagic { found });
    }
    cursor.take(STREAM_MAGIC.len())?;
    Ok(())
}
