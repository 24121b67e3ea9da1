//! Append-only bit cursor over a growable byte buffer.
//!
//! Bits are packed least-significant first: the first bit written lands in
//! bit 0 of byte 0. The buffer always holds exactly `ceil(bit_len / 8)`
//! bytes, and the unwritten bits of a partial trailing byte are zero.

use crate::EncodeError;

use super::char6;
use super::constants::BLOB_LEN_VBR;

/// Bit-level writer producing a little-endian bitstream.
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the bytes already in `buf`.
    pub fn with_buffer(buf: Vec<u8>) -> Self {
        let bit_len = buf.len() * 8;
        Self { buf, bit_len }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn is_aligned32(&self) -> bool {
        self.bit_len.is_multiple_of(32)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Write the low `width` bits of `value`.
    pub fn write_fixed(&mut self, width: u32, value: u64) {
        assert!(width <= 64, "fixed width overflow: {width} > 64");

        let mut value = if width < 64 {
            value & ((1u64 << width) - 1)
        } else {
            value
        };
        let mut remaining = width;

        while remaining > 0 {
            let used = (self.bit_len % 8) as u32;
            if used == 0 {
                self.buf.push(0);
            }
            let take = remaining.min(8 - used);
            let last = self.buf.len() - 1;
            self.buf[last] |= ((value & ((1u64 << take) - 1)) as u8) << used;

            value >>= take;
            remaining -= take;
            self.bit_len += take as usize;
        }
    }

    pub fn write_bool(&mut self, b: bool) {
        self.write_fixed(1, u64::from(b));
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.write_fixed(8, u64::from(byte));
    }

    /// Write raw bytes; a straight copy when the cursor sits on a byte boundary.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.bit_len.is_multiple_of(8) {
            self.buf.extend_from_slice(bytes);
            self.bit_len += bytes.len() * 8;
        } else {
            for &byte in bytes {
                self.write_byte(byte);
            }
        }
    }

    /// Write `value` in `width`-bit chunks, low chunk first.
    ///
    /// Each chunk carries `width - 1` payload bits; its top bit is set when
    /// more chunks follow.
    pub fn write_vbr(&mut self, width: u32, value: u64) {
        assert!(
            (2..=64).contains(&width),
            "vbr chunk width out of range: {width}"
        );

        let flag = 1u64 << (width - 1);
        let mut value = value;
        while value >= flag {
            self.write_fixed(width, (value & (flag - 1)) | flag);
            value >>= width - 1;
        }
        self.write_fixed(width, value);
    }

    pub fn write_signed_vbr(&mut self, width: u32, value: i64) {
        self.write_vbr(width, encode_signed_vbr(value));
    }

    /// Write one character of the char6 alphabet.
    pub fn write_char6(&mut self, ch: char) -> Result<(), EncodeError> {
        let code = char6::encode(ch).ok_or(EncodeError::InvalidChar6(ch))?;
        self.write_fixed(6, u64::from(code));
        Ok(())
    }

    /// Pad with zero bits up to the next 32-bit boundary.
    pub fn align32(&mut self) {
        let pad = (32 - self.bit_len % 32) % 32;
        self.write_fixed(pad as u32, 0);
    }

    /// Length as VBR6, then the bytes between two 32-bit alignments.
    pub fn write_blob(&mut self, bytes: &[u8]) {
        self.write_vbr(BLOB_LEN_VBR, bytes.len() as u64);
        self.align32();
        self.write_bytes(bytes);
        self.align32();
    }

    /// Current position in whole bytes. The cursor must be byte-aligned.
    pub fn byte_offset(&self) -> usize {
        assert!(
            self.bit_len.is_multiple_of(8),
            "byte offset requested at bit {}",
            self.bit_len
        );
        self.bit_len / 8
    }

    /// Overwrite the little-endian word at `offset` without moving the cursor.
    pub fn patch_word(&mut self, offset: usize, value: u32) {
        assert!(
            offset + 4 <= self.buf.len(),
            "patch at byte {offset} out of bounds (len {})",
            self.buf.len()
        );
        self.buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

/// Fold the sign into the low bit: `x >= 0` maps to `x << 1`, `x < 0` to
/// `(|x| << 1) | 1`.
///
/// `i64::MIN` has no representable magnitude and maps to `1`.
pub fn encode_signed_vbr(value: i64) -> u64 {
    if value >= 0 {
        (value as u64) << 1
    } else {
        (value.unsigned_abs() << 1) | 1
    }
}
