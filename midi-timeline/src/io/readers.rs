/// Longest variable length quantity accepted, in encoded bytes (28 bits of payload).
pub const MAX_VAR_LENGTH_BYTES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarLengthError {
    /// The data ended before the final byte (high bit clear) was reached.
    Truncated,
    /// More than [`MAX_VAR_LENGTH_BYTES`] bytes had the continuation bit set.
    TooLong,
}

/// Decodes a MIDI variable length quantity from the start of `bytes`.
///
/// Returns the value and the number of bytes it occupied.
pub fn read_var_length(bytes: &[u8]) -> Result<(u32, usize), VarLengthError> {
    let mut n: u32 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        if i == MAX_VAR_LENGTH_BYTES {
            return Err(VarLengthError::TooLong);
        }
        n = (n << 7) | (byte & 0x7F) as u32;
        if (byte & 0x80) == 0 {
            return Ok((n, i + 1));
        }
    }
    if bytes.len() >= MAX_VAR_LENGTH_BYTES {
        Err(VarLengthError::TooLong)
    } else {
        Err(VarLengthError::Truncated)
    }
}

/// Reads a big endian integer of up to 4 bytes.
pub(crate) fn bytes_to_val(bytes: &[u8]) -> u32 {
    debug_assert!(bytes.len() <= 4);
    let mut num: u32 = 0;
    for b in bytes {
        num = (num << 8) | *b as u32;
    }
    num
}

/// A cursor over the bytes of a single track chunk.
#[derive(Debug, Clone)]
pub struct TrackReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    start: usize,
}

impl<'a> TrackReader<'a> {
    /// `start` is the offset of `bytes` inside the whole file, used for diagnostics only.
    pub fn new(bytes: &'a [u8], start: usize) -> TrackReader<'a> {
        TrackReader {
            bytes,
            pos: 0,
            start,
        }
    }

    /// The unread part of the track.
    #[inline(always)]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Absolute position of the cursor in the file.
    pub fn file_pos(&self) -> usize {
        self.start + self.pos
    }

    #[inline(always)]
    pub fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.bytes.len());
    }

    pub fn read_var_length(&mut self) -> Result<u32, VarLengthError> {
        let (value, len) = read_var_length(self.remaining())?;
        self.advance(len);
        Ok(value)
    }
}
