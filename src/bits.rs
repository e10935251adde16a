//! Bit-level reader and writer over byte buffers.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.

use crate::errors::ReadError;

/// Mask covering the low `n` bits (`n <= 64`).
fn low_mask(n: usize) -> u64 {
    if n >= 64 { u64::MAX } else { (1u64 << n) - 1 }
}

/// Cursor over a borrowed byte slice.
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.bit_pos
    }

    /// Reads `n` bits as an unsigned value (max 64 bits). MSB-first.
    pub fn read_bits(&mut self, n: usize) -> Result<u64, ReadError> {
        if n > 64 {
            return Err(ReadError::TooManyBitsRead);
        }

        if self
            .bit_pos
            .checked_add(n)
            .is_none_or(|end| end > self.data.len() * 8)
        {
            return Err(ReadError::OutOfBounds);
        }

        let mut value = 0u64;
        let mut remaining = n;

        while remaining > 0 {
            let byte = self.data[self.bit_pos / 8];
            let used = self.bit_pos % 8;
            let take = (8 - used).min(remaining);
            let chunk = (byte >> (8 - used - take)) as u64 & low_mask(take);

            value = (value << take) | chunk;
            self.bit_pos += take;
            remaining -= take;
        }

        Ok(value)
    }

    /// Reads `n` bits into `ceil(n / 8)` bytes, zero-filling the low end of the last byte.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, ReadError> {
        let mut writer = BitWriter::with_capacity(n);
        let mut remaining = n;

        while remaining > 0 {
            let take = remaining.min(8);
            writer.write_bits(self.read_bits(take)?, take);
            remaining -= take;
        }

        Ok(writer.into_bytes())
    }

    pub fn skip_bits(&mut self, n: usize) -> Result<(), ReadError> {
        match self.bit_pos.checked_add(n) {
            Some(end) if end <= self.data.len() * 8 => {
                self.bit_pos = end;
                Ok(())
            }
            _ => Err(ReadError::OutOfBounds),
        }
    }
}

/// Append-only bit cursor over an owned, zero-initialized byte buffer.
///
/// Writes are OR-merged into partially filled bytes, so bits already written
/// are never disturbed.
#[derive(Debug, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_pos: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            bit_pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.bit_pos
    }

    /// Writes the low `n` bits of `value` (max 64 bits), MSB-first.
    pub fn write_bits(&mut self, value: u64, n: usize) {
        debug_assert!(n <= 64);

        let mut remaining = n;
        let value = value & low_mask(n);

        while remaining > 0 {
            let index = self.bit_pos / 8;
            if index == self.data.len() {
                self.data.push(0);
            }

            let used = self.bit_pos % 8;
            let take = (8 - used).min(remaining);
            let chunk = (value >> (remaining - take)) & low_mask(take);

            self.data[index] |= (chunk << (8 - used - take)) as u8;
            self.bit_pos += take;
            remaining -= take;
        }
    }

    /// Writes the leading `n` bits of `bytes`. The caller guarantees `bytes` holds at least `n` bits.
    pub fn write_bytes(&mut self, bytes: &[u8], n: usize) {
        let whole = n / 8;

        for &byte in &bytes[..whole] {
            self.write_bits(byte as u64, 8);
        }

        let rest = n % 8;
        if rest > 0 {
            self.write_bits((bytes[whole] >> (8 - rest)) as u64, rest);
        }
    }

    /// Writes `n` copies of `bit`.
    pub fn fill(&mut self, bit: bool, n: usize) {
        let pattern = if bit { u64::MAX } else { 0 };
        let mut remaining = n;

        while remaining > 0 {
            let take = remaining.min(64);
            self.write_bits(pattern, take);
            remaining -= take;
        }
    }

    /// Returns the buffer; unused bits of the final byte are zero.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: usize) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Reads `n` bits (max 64) starting at `bit_pos`. The caller guarantees the range is in bounds.
fn bits_at(data: &[u8], bit_pos: usize, n: usize) -> u64 {
    let mut value = 0u64;

    for pos in bit_pos..bit_pos + n {
        let bit = (data[pos / 8] >> (7 - pos % 8)) & 1;
        value = (value << 1) | bit as u64;
    }

    value
}

/// Converts an MSB-first field encoding of `n` bits into LSB-first byte order.
///
/// The encoding is split into a leading partial chunk of `n % 8` bits followed
/// by whole bytes; the chunk order is reversed. `data` must hold at least `n` bits.
pub fn to_lsb_first(data: &[u8], n: usize) -> Vec<u8> {
    let head_bits = n % 8;
    let mut writer = BitWriter::with_capacity(n);

    for i in (0..n / 8).rev() {
        writer.write_bits(bits_at(data, head_bits + i * 8, 8), 8);
    }
    writer.write_bits(bits_at(data, 0, head_bits), head_bits);

    writer.into_bytes()
}

/// Inverse of [`to_lsb_first`]. `data` must hold at least `n` bits.
pub fn to_msb_first(data: &[u8], n: usize) -> Vec<u8> {
    let whole = n / 8;
    let mut writer = BitWriter::with_capacity(n);

    writer.write_bits(bits_at(data, whole * 8, n % 8), n % 8);
    for i in (0..whole).rev() {
        writer.write_bits(bits_at(data, i * 8, 8), 8);
    }

    writer.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits() {
        let mut reader = BitReader::new(&[0b11111111]);
        assert_eq!(reader.read_bits(8).unwrap(), 0b11111111);
    }

    #[test]
    fn test_read_bits_across_bytes() {
        let mut reader = BitReader::new(&[0b1010_1100, 0b0101_0011]);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(10).unwrap(), 0b01100_01010);
        assert_eq!(reader.read_bits(3).unwrap(), 0b011);
        assert_eq!(reader.position(), 16);
    }

    #[test]
    fn test_read_bits_out_of_bounds() {
        let mut reader = BitReader::new(&[0b11111111]);
        assert_eq!(reader.read_bits(9).unwrap_err(), ReadError::OutOfBounds);
    }

    #[test]
    fn test_read_bits_more_than_64() {
        let mut reader = BitReader::new(&[0u8; 16]);
        assert_eq!(reader.read_bits(65).unwrap_err(), ReadError::TooManyBitsRead);
    }

    #[test]
    fn test_read_bytes_pads_low_end() {
        let mut reader = BitReader::new(&[0xff, 0xff]);
        assert_eq!(reader.read_bytes(13).unwrap(), vec![0xff, 0xf8]);
    }

    #[test]
    fn test_skip_bits() {
        let mut reader = BitReader::new(&[0b0000_0001]);
        reader.skip_bits(7).unwrap();
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.skip_bits(1).unwrap_err(), ReadError::OutOfBounds);
    }

    #[test]
    fn test_write_bits_merges_partial_bytes() {
        let mut writer = BitWriter::new();
        writer.write_bits(1, 1);
        writer.write_bits(2, 3);
        writer.write_bits(3, 4);
        writer.write_bits(0xfffc, 16);
        assert_eq!(writer.position(), 24);
        assert_eq!(writer.into_bytes(), vec![0xa3, 0xff, 0xfc]);
    }

    #[test]
    fn test_write_bits_64() {
        let mut writer = BitWriter::new();
        writer.write_bits(0, 4);
        writer.write_bits(u64::MAX, 64);
        assert_eq!(
            writer.into_bytes(),
            vec![0x0f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xf0]
        );
    }

    #[test]
    fn test_write_bytes_takes_leading_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0, 2);
        writer.write_bytes(&[0xff, 0xff], 13);
        assert_eq!(writer.into_bytes(), vec![0x3f, 0xfe]);
    }

    #[test]
    fn test_fill() {
        let mut writer = BitWriter::new();
        writer.fill(false, 1);
        writer.fill(true, 70);
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 9);
        assert_eq!(bytes[0], 0x7f);
        assert_eq!(bytes[8], 0xfe);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0b11111111, 8), -1);
        assert_eq!(sign_extend(0b0111, 4), 7);
        assert_eq!(sign_extend(u64::MAX, 64), -1);
    }

    #[test]
    fn test_lsb_first_partial_chunk() {
        // 1111111101 -> 1111110111
        let big = [0b1111_1111, 0b0100_0000];
        let little = to_lsb_first(&big, 10);
        assert_eq!(little, vec![0b1111_1101, 0b1100_0000]);
        assert_eq!(to_msb_first(&little, 10), big.to_vec());
    }

    #[test]
    fn test_lsb_first_whole_bytes() {
        let little = to_lsb_first(&[0x12, 0x34, 0x56], 24);
        assert_eq!(little, vec![0x56, 0x34, 0x12]);
    }
}
