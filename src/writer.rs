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

//! Bit-granular output stream.

use std::io::SeekFrom;

use super::constant::DEFAULT_CAPACITY_BYTES;
use super::error::BitstreamError;
use super::error::Result;
use super::sink::BufferMut;
use super::sink::Sink;

/// Trait for the unsigned integers that can be written as bit fields.
///
/// This trait is sealed so a user cannot implement it. Currently, this trait
/// covers: [`u8`], [`u16`], [`u32`], and [`u64`].
pub trait Bits: seal_bits::Sealed {}

impl<T: seal_bits::Sealed> Bits for T {}

/// Trait for the signed integers that can be written as bit fields.
///
/// This trait is sealed so a user cannot implement it. Currently, this trait
/// covers: [`i8`], [`i16`], [`i32`], and [`i64`].
pub trait SignedBits: seal_signed_bits::Sealed {}

impl<T: seal_signed_bits::Sealed> SignedBits for T {}

/// Bit-granular output stream over a fixed or growable byte buffer.
///
/// Fields are packed contiguously, MSB-first, starting at the cursor; the
/// cursor advances by the width of each field written. Writes against a
/// fixed-capacity buffer fail with [`BitstreamError::InsufficientSpace`]
/// before mutating anything; a growable buffer expands instead.
///
/// # Examples
///
/// ```
/// # fn main() -> bitcursor::error::Result<()> {
/// use bitcursor::BitWriter;
///
/// let mut buf = [0u8; 2];
/// let mut writer = BitWriter::from_slice(&mut buf);
/// writer.write_uint(0xAu8, 4)?;
/// writer.write_uint(0xBu8, 4)?;
/// writer.write_uint(0xCDu8, 8)?;
/// assert_eq!(writer.as_slice(), &[0xAB, 0xCD]);
/// # Ok(())}
/// ```
pub struct BitWriter<'a> {
    sink: Sink<'a>,
}

impl<'a> BitWriter<'a> {
    /// Wraps an externally owned buffer of fixed capacity.
    ///
    /// The writer never releases the buffer; the borrow keeps it alive for
    /// the writer's lifetime.
    pub fn from_slice(buf: &'a mut [u8]) -> Self {
        Self {
            sink: Sink::fixed(BufferMut::Borrowed(buf)),
        }
    }

    /// Takes ownership of a buffer of fixed capacity.
    ///
    /// The buffer is released when the writer is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> bitcursor::error::Result<()> {
    /// use bitcursor::BitWriter;
    ///
    /// let mut writer = BitWriter::from_owned(vec![0u8; 4]);
    /// writer.write_uint(0x1234u16, 16)?;
    /// assert_eq!(writer.as_slice(), &[0x12, 0x34, 0x00, 0x00]);
    /// # Ok(())}
    /// ```
    pub fn from_owned(buf: impl Into<Box<[u8]>>) -> BitWriter<'static> {
        BitWriter {
            sink: Sink::fixed(BufferMut::Owned(buf.into())),
        }
    }

    /// Creates a writer with a self-allocated buffer that grows on demand.
    ///
    /// The initial allocation is [`DEFAULT_CAPACITY_BYTES`]; whenever a write
    /// would run past the end, the buffer doubles (preserving its contents)
    /// until the field fits, so writes to this variant never fail.
    pub fn new() -> BitWriter<'static> {
        Self::with_capacity(DEFAULT_CAPACITY_BYTES)
    }

    /// Creates a growable writer with the given initial capacity in bytes.
    pub fn with_capacity(nbytes: usize) -> BitWriter<'static> {
        BitWriter {
            sink: Sink::growable(nbytes),
        }
    }

    /// Repositions the cursor and returns the new bit offset.
    ///
    /// No range validation is performed: the cursor may be placed out of
    /// range, in which case the next write fails (fixed) or grows the buffer
    /// up to the cursor (growable).
    pub fn seek(&mut self, from: SeekFrom) -> u64 {
        self.sink.seek(from)
    }

    /// Returns the cursor as a bit offset from the start of the buffer.
    pub fn tell(&self) -> u64 {
        self.sink.tell()
    }

    /// Returns the current capacity in bits; always a multiple of 8.
    pub fn capacity_bits(&self) -> u64 {
        self.sink.capacity()
    }

    /// Returns the current buffer contents.
    ///
    /// Growth reallocates the backing store of a growable writer, so a slice
    /// must be re-fetched after further writes (the borrow rules enforce
    /// this).
    pub fn as_slice(&self) -> &[u8] {
        self.sink.as_slice()
    }

    fn reserve(&mut self, nbits: usize) -> Result<()> {
        if self.sink.ensure_capacity(nbits) {
            Ok(())
        } else {
            Err(BitstreamError::InsufficientSpace {
                pos: self.sink.tell(),
                requested: nbits,
                capacity: self.sink.capacity(),
            })
        }
    }

    /// Writes a single bit at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`BitstreamError::InsufficientSpace`] if the cursor is at the
    /// end of a fixed buffer.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.reserve(1)?;
        self.sink.write_bit_raw(bit);
        Ok(())
    }

    /// Writes the low `nbits` bits of an unsigned value, MSB-first.
    ///
    /// `nbits` may be 0 to 64; a zero-width write is a no-op. Bits of `value`
    /// above `nbits` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BitstreamError::InsufficientSpace`] if the field does not
    /// fit in a fixed buffer. Nothing is written in that case.
    pub fn write_uint<T: Bits>(&mut self, value: T, nbits: usize) -> Result<()> {
        debug_assert!(nbits <= 64);
        self.reserve(nbits)?;
        self.sink.write_field_raw(value.into(), nbits);
        Ok(())
    }

    /// Writes a signed value as the low `nbits` bits of its two's-complement
    /// representation; the top bit of the field is the sign.
    ///
    /// The matching read is [`BitReader::read_twoc`], which recovers the
    /// original value provided it fits in `nbits` bits including the sign.
    ///
    /// [`BitReader::read_twoc`]: crate::reader::BitReader::read_twoc
    ///
    /// # Errors
    ///
    /// Returns [`BitstreamError::InsufficientSpace`] if the field does not
    /// fit in a fixed buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> bitcursor::error::Result<()> {
    /// use bitcursor::BitWriter;
    ///
    /// let mut writer = BitWriter::from_owned(vec![0u8; 1]);
    /// writer.write_twoc(-3i32, 5)?;
    /// // two's complement of 00011 in 5 bits is 11101
    /// assert_eq!(writer.as_slice(), &[0b1110_1000]);
    /// # Ok(())}
    /// ```
    pub fn write_twoc<T: SignedBits>(&mut self, value: T, nbits: usize) -> Result<()> {
        debug_assert!((1..=64).contains(&nbits));
        self.reserve(nbits)?;
        let value: i64 = value.into();
        self.sink.write_field_raw(value as u64, nbits);
        Ok(())
    }

    /// Writes a signed value in sign-magnitude form: one sign bit (1 if
    /// negative) followed by `nbits - 1` magnitude bits of the absolute
    /// value.
    ///
    /// Not interchangeable with [`write_twoc`] on the wire; the reader must
    /// use [`BitReader::read_signmag`] for fields written this way.
    ///
    /// [`write_twoc`]: Self::write_twoc
    /// [`BitReader::read_signmag`]: crate::reader::BitReader::read_signmag
    ///
    /// # Errors
    ///
    /// Returns [`BitstreamError::InsufficientSpace`] if the field (sign bit
    /// included) does not fit in a fixed buffer. Nothing is written in that
    /// case.
    pub fn write_signmag<T: SignedBits>(&mut self, value: T, nbits: usize) -> Result<()> {
        debug_assert!((1..=64).contains(&nbits));
        self.reserve(nbits)?;
        let value: i64 = value.into();
        self.sink.write_bit_raw(value < 0);
        self.sink.write_field_raw(value.unsigned_abs(), nbits - 1);
        Ok(())
    }
}

impl Default for BitWriter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

mod seal_bits {
    use num_traits::PrimInt;

    pub trait Sealed: PrimInt + Into<u64> {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

mod seal_signed_bits {
    use num_traits::PrimInt;

    pub trait Sealed: PrimInt + Into<i64> {}

    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}
