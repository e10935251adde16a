//! Byte-group swapping for endianness conversion.
//!
//! A swap pattern is a string of digits, each giving the size in bytes of one
//! group. Bytes are reversed within every group. The pattern repeats over the
//! whole buffer, whose length must be a multiple of the pattern's total size:
//! `"2"` swaps every pair of bytes, `"12"` leaves every third byte in place
//! and swaps the two bytes after it.

use crate::errors::FormatError;

/// Parses a swap pattern into group sizes.
fn parse_groups(groups: &str) -> Result<Vec<usize>, FormatError> {
    if groups.is_empty() {
        return Err(FormatError::Empty);
    }

    groups
        .char_indices()
        .map(|(offset, ch)| match ch.to_digit(10) {
            Some(size) if size > 0 => Ok(size as usize),
            _ => Err(FormatError::InvalidGroupSize { ch, offset }),
        })
        .collect()
}

/// Reverses the bytes of `data` within each group of `groups`, in place.
///
/// To start swapping at an offset, pass the tail of the buffer:
/// `byteswap_in_place("2", &mut buf[offset..])` leaves `buf[..offset]` untouched.
pub fn byteswap_in_place(groups: &str, data: &mut [u8]) -> Result<(), FormatError> {
    let sizes = parse_groups(groups)?;
    let period: usize = sizes.iter().sum();

    if data.len() % period != 0 {
        return Err(FormatError::SwapCoverage {
            period,
            len: data.len(),
        });
    }

    for chunk in data.chunks_exact_mut(period) {
        let mut start = 0;
        for &size in &sizes {
            chunk[start..start + size].reverse();
            start += size;
        }
    }

    Ok(())
}

/// Returns a copy of `data` with the bytes of each group of `groups` reversed.
pub fn byteswap(groups: &str, data: &[u8]) -> Result<Vec<u8>, FormatError> {
    let mut swapped = data.to_vec();
    byteswap_in_place(groups, &mut swapped)?;
    Ok(swapped)
}
