use tracing::{debug, trace};

use super::{
    errors::{MIDILoadError, Warning, WarningSink},
    readers::bytes_to_val,
};

/// Upper bound on the number of chunks kept from one buffer.
pub const MAX_CHUNKS: usize = 300;

/// How far back the scanner looks for a chunk tag after finding garbage.
const RESYNC_REWIND: usize = 7;

const CHUNK_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Header,
    Track,
}

impl ChunkKind {
    fn from_tag(tag: &[u8]) -> Option<ChunkKind> {
        match tag {
            b"MThd" => Some(ChunkKind::Header),
            b"MTrk" => Some(ChunkKind::Track),
            _ => None,
        }
    }
}

/// A typed region of the buffer. `start..end` covers the payload only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub kind: ChunkKind,
    pub start: usize,
    pub end: usize,
    /// Distance between where the chunk was expected and where it was found.
    pub alignment: isize,
}

impl Chunk {
    pub fn data<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Reads the chunk header at `pos`, if it is a recognized tag with a plausible length.
fn read_chunk_header(bytes: &[u8], pos: usize) -> Option<(ChunkKind, usize)> {
    let header = bytes.get(pos..pos + CHUNK_HEADER_LEN)?;
    let (tag, len) = header.split_at(4);
    let kind = ChunkKind::from_tag(tag)?;
    if len[0] != 0 {
        return None;
    }
    Some((kind, bytes_to_val(&len[1..]) as usize))
}

fn find_next_chunk(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&pos| read_chunk_header(bytes, pos).is_some())
}

/// Splits `bytes` into header and track chunks.
///
/// The only fatal condition is a buffer that does not open with an `MThd` chunk header. Anything
/// else (garbage between chunks, truncated chunks, trailing data) is reported to `warnings` and
/// skipped over.
pub fn scan_chunks<W: WarningSink>(
    bytes: &[u8],
    mut warnings: W,
) -> Result<Vec<Chunk>, MIDILoadError> {
    match bytes.get(0..CHUNK_HEADER_LEN) {
        Some(header) if &header[0..4] == b"MThd" && header[4..7] == [0u8, 0, 0] => {}
        _ => return Err(MIDILoadError::InvalidHeader),
    }

    let mut chunks = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if chunks.len() == MAX_CHUNKS {
            warnings.warn(Warning::TooManyChunks { position: pos });
            break;
        }

        let (kind, declared, found) = match read_chunk_header(bytes, pos) {
            Some((kind, len)) => (kind, len, pos),
            None => {
                if let Some(header) = bytes.get(pos..pos + CHUNK_HEADER_LEN) {
                    if ChunkKind::from_tag(&header[0..4]).is_some() {
                        warnings.warn(Warning::ChunkTooLarge {
                            position: pos,
                            length: bytes_to_val(&header[4..]),
                        });
                    }
                }

                let from = pos.saturating_sub(RESYNC_REWIND);
                match find_next_chunk(bytes, from) {
                    Some(found) => {
                        let (kind, len) = match read_chunk_header(bytes, found) {
                            Some(header) => header,
                            None => break,
                        };
                        trace!("Resynchronized chunk scan from {pos:#06x} to {found:#06x}");
                        (kind, len, found)
                    }
                    None => {
                        warnings.warn(Warning::TrailingData {
                            position: pos,
                            length: bytes.len() - pos,
                        });
                        break;
                    }
                }
            }
        };

        let alignment = found as isize - pos as isize;
        if alignment != 0 {
            warnings.warn(Warning::ChunkMisaligned {
                expected: pos,
                found,
                offset: alignment,
            });
        }

        let start = found + CHUNK_HEADER_LEN;
        let mut end = start + declared;
        if end > bytes.len() {
            warnings.warn(Warning::ChunkTruncated {
                position: found,
                declared,
                available: bytes.len() - start,
            });
            end = bytes.len();
        }

        chunks.push(Chunk {
            kind,
            start,
            end,
            alignment,
        });
        pos = end;
    }

    debug!("Scanned {} chunks from {} bytes", chunks.len(), bytes.len());
    Ok(chunks)
}
