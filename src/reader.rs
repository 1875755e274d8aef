// Copyright 2025 The bitcursor Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bit-granular input stream.

use std::io::SeekFrom;

use super::error::BitstreamError;
use super::error::Result;
use super::field;

/// Ownership of the immutable input buffer.
enum Buffer<'a> {
    Borrowed(&'a [u8]),
    Owned(Box<[u8]>),
}

/// Read-only bit cursor over an immutable byte buffer of fixed capacity.
///
/// Read operations mirror the writer's field operations and must agree with
/// the writer on each field's width and signed encoding; the codec does not
/// validate that contract. A read past the end of the buffer fails with
/// [`BitstreamError::InsufficientData`] and leaves the cursor where it was.
///
/// # Examples
///
/// ```
/// # fn main() -> bitcursor::error::Result<()> {
/// use bitcursor::BitReader;
///
/// let mut reader = BitReader::from_slice(&[0xAB, 0xCD]);
/// assert_eq!(reader.read_uint(4)?, 0xA);
/// assert_eq!(reader.read_uint(12)?, 0xBCD);
/// assert!(reader.read_bit().is_err());
/// # Ok(())}
/// ```
pub struct BitReader<'a> {
    buf: Buffer<'a>,
    pos: u64,
    /// Capacity in bits; always the byte length times 8.
    capacity: u64,
}

impl<'a> BitReader<'a> {
    /// Wraps an externally owned buffer; the borrow keeps it alive for the
    /// reader's lifetime.
    pub fn from_slice(buf: &'a [u8]) -> Self {
        let capacity = buf.len() as u64 * 8;
        Self {
            buf: Buffer::Borrowed(buf),
            pos: 0,
            capacity,
        }
    }

    /// Takes ownership of a buffer, released when the reader is dropped.
    pub fn from_owned(buf: impl Into<Box<[u8]>>) -> BitReader<'static> {
        let buf = buf.into();
        let capacity = buf.len() as u64 * 8;
        BitReader {
            buf: Buffer::Owned(buf),
            pos: 0,
            capacity,
        }
    }

    /// Repositions the cursor with no range validation; reads at an
    /// out-of-range cursor fail instead of the seek.
    pub fn seek(&mut self, from: SeekFrom) -> u64 {
        self.pos = match from {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(offset) => self.pos.wrapping_add_signed(offset),
            SeekFrom::End(offset) => self.capacity.wrapping_add_signed(offset),
        };
        self.pos
    }

    /// Returns the cursor as a bit offset from the start of the buffer.
    pub fn tell(&self) -> u64 {
        self.pos
    }

    /// Returns the capacity in bits; always a multiple of 8.
    pub fn capacity_bits(&self) -> u64 {
        self.capacity
    }

    fn demand(&self, nbits: usize) -> Result<()> {
        if self
            .pos
            .checked_add(nbits as u64)
            .map_or(false, |end| end <= self.capacity)
        {
            Ok(())
        } else {
            Err(BitstreamError::InsufficientData {
                pos: self.pos,
                requested: nbits,
                capacity: self.capacity,
            })
        }
    }

    /// Splits the borrow so raw field reads can advance the cursor while
    /// holding the byte slice.
    fn parts(&mut self) -> (&[u8], &mut u64) {
        let bytes = match &self.buf {
            Buffer::Borrowed(buf) => *buf,
            Buffer::Owned(buf) => buf,
        };
        (bytes, &mut self.pos)
    }

    /// Reads the bit at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`BitstreamError::InsufficientData`] if the cursor is at or
    /// past the end of the buffer; the cursor does not move.
    pub fn read_bit(&mut self) -> Result<bool> {
        self.demand(1)?;
        let (bytes, pos) = self.parts();
        Ok(field::read_bit_raw(bytes, pos))
    }

    /// Reads `nbits` bits MSB-first into an unsigned value.
    ///
    /// `nbits` may be 0 to 64; a zero-width read returns 0.
    ///
    /// # Errors
    ///
    /// Returns [`BitstreamError::InsufficientData`] if fewer than `nbits`
    /// bits remain; the cursor does not move.
    pub fn read_uint(&mut self, nbits: usize) -> Result<u64> {
        debug_assert!(nbits <= 64);
        self.demand(nbits)?;
        let (bytes, pos) = self.parts();
        Ok(field::read_field_raw(bytes, pos, nbits))
    }

    /// Reads an `nbits`-wide truncated two's-complement field, the inverse
    /// of [`BitWriter::write_twoc`].
    ///
    /// The field's top bit is the sign; a set sign bit extends into the high
    /// bits of the result.
    ///
    /// [`BitWriter::write_twoc`]: crate::writer::BitWriter::write_twoc
    ///
    /// # Errors
    ///
    /// Returns [`BitstreamError::InsufficientData`] if fewer than `nbits`
    /// bits remain; the cursor does not move, and no bit of the field is
    /// consumed.
    pub fn read_twoc(&mut self, nbits: usize) -> Result<i64> {
        debug_assert!((1..=64).contains(&nbits));
        self.demand(nbits)?;
        let (bytes, pos) = self.parts();
        let negative = field::read_bit_raw(bytes, pos);
        let magnitude = field::read_field_raw(bytes, pos, nbits - 1);
        let value = if negative {
            ((-1i64) << (nbits - 1)) | magnitude as i64
        } else {
            magnitude as i64
        };
        Ok(value)
    }

    /// Reads an `nbits`-wide sign-magnitude field, the inverse of
    /// [`BitWriter::write_signmag`]: one sign bit, then `nbits - 1` magnitude
    /// bits.
    ///
    /// A negative zero on the wire reads back as plain 0.
    ///
    /// [`BitWriter::write_signmag`]: crate::writer::BitWriter::write_signmag
    ///
    /// # Errors
    ///
    /// Returns [`BitstreamError::InsufficientData`] if fewer than `nbits`
    /// bits remain; the cursor does not move, and no bit of the field is
    /// consumed.
    pub fn read_signmag(&mut self, nbits: usize) -> Result<i64> {
        debug_assert!((1..=64).contains(&nbits));
        self.demand(nbits)?;
        let (bytes, pos) = self.parts();
        let negative = field::read_bit_raw(bytes, pos);
        let magnitude = field::read_field_raw(bytes, pos, nbits - 1) as i64;
        Ok(if negative { -magnitude } else { magnitude })
    }

    /// Renders the bits remaining after the cursor as a string of `'0'` and
    /// `'1'` characters, then restores the cursor.
    ///
    /// Purely diagnostic; the output is not part of the wire format. The
    /// cursor is restored on every exit path, so the reader can keep being
    /// used afterwards as if this had never been called.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> bitcursor::error::Result<()> {
    /// use bitcursor::BitReader;
    ///
    /// let mut reader = BitReader::from_slice(&[0b1010_0110]);
    /// reader.read_uint(3)?;
    /// assert_eq!(reader.to_bitstring(), "00110");
    /// assert_eq!(reader.tell(), 3);
    /// # Ok(())}
    /// ```
    pub fn to_bitstring(&mut self) -> String {
        struct PosGuard<'g, 'a> {
            reader: &'g mut BitReader<'a>,
            pos: u64,
        }

        impl Drop for PosGuard<'_, '_> {
            fn drop(&mut self) {
                self.reader.pos = self.pos;
            }
        }

        let guard = PosGuard {
            pos: self.tell(),
            reader: self,
        };
        let mut ret = String::new();
        // Running out of data is the termination signal here, not an error.
        while let Ok(bit) = guard.reader.read_bit() {
            ret.push(if bit { '1' } else { '0' });
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_read_msb_first() {
        let mut reader = BitReader::from_slice(&[0b1011_0101]);
        let expected = [true, false, true, true, false, true, false, true];
        for bit in expected {
            assert_eq!(reader.read_bit().unwrap(), bit);
        }
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn uint_fields_cross_byte_boundaries() {
        let mut reader = BitReader::from_slice(&[0xFF, 0x00, 0xFF]);
        assert_eq!(reader.read_uint(4).unwrap(), 0xF);
        assert_eq!(reader.read_uint(8).unwrap(), 0xF0);
        assert_eq!(reader.read_uint(12).unwrap(), 0x0FF);
    }

    #[test]
    fn failed_read_leaves_cursor_in_place() {
        let mut reader = BitReader::from_slice(&[0xAA]);
        reader.seek(SeekFrom::Start(5));
        let err = reader.read_uint(4).unwrap_err();
        assert_eq!(
            err,
            BitstreamError::InsufficientData {
                pos: 5,
                requested: 4,
                capacity: 8,
            }
        );
        assert_eq!(reader.tell(), 5);
        assert_eq!(reader.read_uint(3).unwrap(), 0b010);
    }

    #[test]
    fn signed_reads_consume_nothing_on_failure() {
        // One bit of headroom: the sign bit alone would fit, the field does
        // not. The cursor must not move.
        let mut reader = BitReader::from_slice(&[0xFF]);
        reader.seek(SeekFrom::Start(7));
        assert!(reader.read_twoc(2).is_err());
        assert_eq!(reader.tell(), 7);
        assert!(reader.read_signmag(2).is_err());
        assert_eq!(reader.tell(), 7);
        assert!(reader.read_bit().unwrap());
    }

    #[test]
    fn twoc_sign_extension() {
        // 111 = -1, 010 = 2, 110 = -2 in 3-bit two's complement.
        let mut reader = BitReader::from_slice(&[0b1110_1011, 0b0000_0000]);
        assert_eq!(reader.read_twoc(3).unwrap(), -1);
        assert_eq!(reader.read_twoc(3).unwrap(), 2);
        assert_eq!(reader.read_twoc(3).unwrap(), -2);
    }

    #[test]
    fn twoc_one_bit_wide() {
        let mut reader = BitReader::from_slice(&[0b1000_0000]);
        assert_eq!(reader.read_twoc(1).unwrap(), -1);
    }

    #[test]
    fn signmag_negative_zero_reads_as_zero() {
        // 1 0000 is negative zero in 5-bit sign-magnitude.
        let mut reader = BitReader::from_slice(&[0b1000_0000]);
        assert_eq!(reader.read_signmag(5).unwrap(), 0);
    }

    #[test]
    fn out_of_range_seek_fails_on_next_read() {
        let mut reader = BitReader::from_slice(&[0x00; 2]);
        reader.seek(SeekFrom::End(8));
        assert!(reader.read_bit().is_err());
        reader.seek(SeekFrom::Current(-17));
        assert_eq!(reader.tell(), 7);
        assert!(reader.read_bit().is_ok());
    }

    #[test]
    fn owned_reader_reads_like_borrowed() {
        let mut reader = BitReader::from_owned(vec![0x12, 0x34]);
        assert_eq!(reader.read_uint(16).unwrap(), 0x1234);
    }

    #[test]
    fn bitstring_dump_restores_cursor() {
        let mut reader = BitReader::from_slice(&[0b1100_1010]);
        assert_eq!(reader.read_uint(2).unwrap(), 0b11);
        let dumped = reader.to_bitstring();
        assert_eq!(dumped, "001010");
        assert_eq!(reader.tell(), 2);
        // The reader keeps working from the restored position.
        assert_eq!(reader.read_uint(6).unwrap(), 0b00_1010);
    }

    #[test]
    fn bitstring_dump_of_exhausted_reader_is_empty() {
        let mut reader = BitReader::from_slice(&[0xFF]);
        reader.seek(SeekFrom::End(0));
        assert_eq!(reader.to_bitstring(), "");
        assert_eq!(reader.tell(), 8);
    }
}
