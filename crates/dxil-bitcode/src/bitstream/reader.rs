//! Bit cursor over a borrowed bitstream, the mirror of [`BitWriter`](super::BitWriter).

use crate::DecodeError;

use super::char6;
use super::constants::BLOB_LEN_VBR;

/// Bit-level reader over a little-endian bitstream.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, bit_pos: 0 }
    }

    pub fn bit_pos(&self) -> usize {
        self.bit_pos
    }

    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn at_end(&self) -> bool {
        self.bit_pos >= self.bit_len()
    }

    /// Current position in whole bytes. The cursor must be byte-aligned.
    pub fn byte_offset(&self) -> usize {
        assert!(
            self.bit_pos.is_multiple_of(8),
            "byte offset requested at bit {}",
            self.bit_pos
        );
        self.bit_pos / 8
    }

    /// Read `width` bits, least-significant first.
    pub fn read_fixed(&mut self, width: u32) -> Result<u64, DecodeError> {
        assert!(width <= 64, "fixed width overflow: {width} > 64");
        self.ensure(width as usize)?;

        let mut result = 0u64;
        let mut read = 0u32;
        while read < width {
            let byte = self.bytes[self.bit_pos / 8];
            let used = (self.bit_pos % 8) as u32;
            let take = (width - read).min(8 - used);
            let chunk = (u64::from(byte) >> used) & ((1u64 << take) - 1);
            result |= chunk << read;

            read += take;
            self.bit_pos += take as usize;
        }

        Ok(result)
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_fixed(1)? != 0)
    }

    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_fixed(8)? as u8)
    }

    pub fn read_vbr(&mut self, width: u32) -> Result<u64, DecodeError> {
        assert!(
            (2..=64).contains(&width),
            "vbr chunk width out of range: {width}"
        );

        let start = self.bit_pos;
        let flag = 1u64 << (width - 1);
        let mut result = 0u64;
        let mut shift = 0u32;
        loop {
            let piece = self.read_fixed(width)?;
            let payload = piece & (flag - 1);
            // Payload bits shifted past bit 63 would be lost.
            if shift >= 64 || (shift > 0 && payload >> (64 - shift) != 0) {
                return Err(DecodeError::VbrOverflow { bit: start });
            }
            result |= payload << shift;
            if piece & flag == 0 {
                return Ok(result);
            }
            shift += width - 1;
        }
    }

    pub fn read_signed_vbr(&mut self, width: u32) -> Result<i64, DecodeError> {
        Ok(decode_signed_vbr(self.read_vbr(width)?))
    }

    pub fn read_char6(&mut self) -> Result<char, DecodeError> {
        Ok(char6::decode(self.read_fixed(6)? as u8))
    }

    /// Skip padding up to the next 32-bit boundary.
    pub fn align32(&mut self) -> Result<(), DecodeError> {
        let pad = (32 - self.bit_pos % 32) % 32;
        self.ensure(pad)?;
        self.bit_pos += pad;
        Ok(())
    }

    /// Read a blob written by [`BitWriter::write_blob`](super::BitWriter::write_blob).
    pub fn read_blob(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_vbr(BLOB_LEN_VBR)?;
        self.align32()?;

        let start = self.byte_offset();
        let end = usize::try_from(len)
            .ok()
            .and_then(|len| start.checked_add(len))
            .filter(|&end| end <= self.bytes.len())
            .ok_or(DecodeError::UnexpectedEnd { bit: self.bit_pos })?;
        self.bit_pos = end * 8;
        self.align32()?;

        Ok(&self.bytes[start..end])
    }

    fn ensure(&self, bits: usize) -> Result<(), DecodeError> {
        if self.bit_pos + bits > self.bit_len() {
            return Err(DecodeError::UnexpectedEnd { bit: self.bit_pos });
        }
        Ok(())
    }
}

/// Inverse of [`encode_signed_vbr`](super::encode_signed_vbr).
pub fn decode_signed_vbr(value: u64) -> i64 {
    let magnitude = (value >> 1) as i64;
    if value & 1 == 0 {
        magnitude
    } else if magnitude == 0 {
        i64::MIN
    } else {
        -magnitude
    }
}
