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

//! Boundary-crossing bit-field packing and unpacking.
//!
//! A field is a contiguous run of up to 64 bits written MSB-first: bit 0 of
//! the stream is the most significant bit of byte 0. Fields may start at any
//! bit offset and span byte boundaries; bits outside the field are preserved.
//!
//! Capacity checks are the caller's responsibility. All functions here index
//! the slice directly and assume `*pos + nbits <= bytes.len() * 8`.

use super::constant::CLEAR_BIT_MASKS;
use super::constant::LOW_MASKS;
use super::constant::SET_BIT_MASKS;

/// Sets or clears the bit at `*pos` and advances the cursor by one.
#[inline]
pub fn write_bit_raw(bytes: &mut [u8], pos: &mut u64, bit: bool) {
    let p = (*pos >> 3) as usize;
    let off = (*pos & 0x7) as usize;
    if bit {
        bytes[p] |= SET_BIT_MASKS[off];
    } else {
        bytes[p] &= CLEAR_BIT_MASKS[off];
    }
    *pos += 1;
}

/// Reads the bit at `*pos` (MSB-first within its byte) and advances the
/// cursor by one.
#[inline]
pub fn read_bit_raw(bytes: &[u8], pos: &mut u64) -> bool {
    let bit = (bytes[(*pos >> 3) as usize] >> (7 - (*pos & 0x7))) & 0x1;
    *pos += 1;
    bit != 0
}

/// Packs the low `nbits` bits of `value`, MSB of the field first, starting
/// at `*pos`, and advances the cursor by `nbits`.
///
/// Bits of `value` above `nbits` are ignored, and bits of the buffer outside
/// the field keep their previous contents.
pub fn write_field_raw(bytes: &mut [u8], pos: &mut u64, value: u64, nbits: usize) {
    debug_assert!(nbits <= 64);
    let mut nbits = nbits;
    while nbits > 0 {
        if *pos & 0x7 == 0 {
            // Byte-aligned: store whole bytes directly, high bits first.
            while nbits >= 8 {
                nbits -= 8;
                bytes[(*pos >> 3) as usize] = (value >> nbits) as u8;
                *pos += 8;
            }
            if nbits > 0 {
                // Tail shorter than a byte goes into the high-order bits of
                // the next byte; its low-order bits are preserved.
                let p = (*pos >> 3) as usize;
                let keep = bytes[p] & LOW_MASKS[8 - nbits];
                bytes[p] = keep | ((value as u8 & LOW_MASKS[nbits]) << (8 - nbits));
                *pos += nbits as u64;
                nbits = 0;
            }
        } else {
            let p = (*pos >> 3) as usize;
            let boundary = (*pos & !0x7) + 8;
            if *pos + nbits as u64 >= boundary {
                // The field reaches (or crosses) the byte boundary: fill the
                // rest of this byte with the field's highest bits.
                let take = (boundary - *pos) as usize;
                let keep = bytes[p] & !LOW_MASKS[take];
                bytes[p] = keep | ((value >> (nbits - take)) as u8 & LOW_MASKS[take]);
                *pos += take as u64;
                nbits -= take;
            } else {
                // Whole remainder fits inside this byte: splice it between
                // the neighboring bit ranges.
                let shift = (boundary - (*pos + nbits as u64)) as usize;
                let keep = bytes[p] & !(LOW_MASKS[nbits] << shift);
                bytes[p] = keep | ((value as u8 & LOW_MASKS[nbits]) << shift);
                *pos += nbits as u64;
                nbits = 0;
            }
        }
    }
}

/// Accumulates `nbits` bits starting at `*pos`, MSB-first, into a `u64`, and
/// advances the cursor by `nbits`. Symmetric to [`write_field_raw`].
pub fn read_field_raw(bytes: &[u8], pos: &mut u64, nbits: usize) -> u64 {
    debug_assert!(nbits <= 64);
    let mut nbits = nbits;
    let mut acc = 0u64;
    while nbits > 0 {
        if *pos & 0x7 == 0 {
            while nbits >= 8 {
                acc = (acc << 8) | u64::from(bytes[(*pos >> 3) as usize]);
                *pos += 8;
                nbits -= 8;
            }
            if nbits > 0 {
                let b = bytes[(*pos >> 3) as usize];
                acc = (acc << nbits) | u64::from((b >> (8 - nbits)) & LOW_MASKS[nbits]);
                *pos += nbits as u64;
                nbits = 0;
            }
        } else {
            let p = (*pos >> 3) as usize;
            let boundary = (*pos & !0x7) + 8;
            if *pos + nbits as u64 >= boundary {
                let take = (boundary - *pos) as usize;
                acc = (acc << take) | u64::from(bytes[p] & LOW_MASKS[take]);
                *pos += take as u64;
                nbits -= take;
            } else {
                let shift = (boundary - (*pos + nbits as u64)) as usize;
                acc = (acc << nbits) | u64::from((bytes[p] >> shift) & LOW_MASKS[nbits]);
                *pos += nbits as u64;
                nbits = 0;
            }
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitstring(bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|b| format!("{b:08b}"))
            .collect::<Vec<_>>()
            .join("_")
    }

    #[test]
    fn single_bits_are_msb_first() {
        let mut bytes = [0u8; 2];
        let mut pos = 0;
        write_bit_raw(&mut bytes, &mut pos, true);
        write_bit_raw(&mut bytes, &mut pos, false);
        write_bit_raw(&mut bytes, &mut pos, true);
        assert_eq!(pos, 3);
        assert_eq!(bytes, [0b1010_0000, 0]);

        let mut pos = 0;
        assert!(read_bit_raw(&bytes, &mut pos));
        assert!(!read_bit_raw(&bytes, &mut pos));
        assert!(read_bit_raw(&bytes, &mut pos));
    }

    #[test]
    fn clearing_a_set_bit() {
        let mut bytes = [0xFFu8];
        let mut pos = 2;
        write_bit_raw(&mut bytes, &mut pos, false);
        assert_eq!(bytes, [0b1101_1111]);
    }

    #[test]
    fn aligned_whole_bytes() {
        let mut bytes = [0u8; 4];
        let mut pos = 0;
        write_field_raw(&mut bytes, &mut pos, 0x0012_3456, 24);
        assert_eq!(pos, 24);
        assert_eq!(bytes, [0x12, 0x34, 0x56, 0x00]);
    }

    #[test]
    fn aligned_tail_preserves_low_bits() {
        let mut bytes = [0b0000_0111u8];
        let mut pos = 0;
        write_field_raw(&mut bytes, &mut pos, 0b10110, 5);
        assert_eq!(bitstring(&bytes), "10110111");
        assert_eq!(pos, 5);
    }

    #[test]
    fn midbyte_field_within_one_byte() {
        // 3-bit field at offset 2 of an all-ones byte; neighbors keep theirs.
        let mut bytes = [0xFFu8];
        let mut pos = 2;
        write_field_raw(&mut bytes, &mut pos, 0b000, 3);
        assert_eq!(bitstring(&bytes), "11000111");
        assert_eq!(pos, 5);
    }

    #[test]
    fn midbyte_field_crossing_boundary() {
        let mut bytes = [0xFFu8, 0x00];
        let mut pos = 5;
        write_field_raw(&mut bytes, &mut pos, 0b01010, 5);
        assert_eq!(bitstring(&bytes), "11111010_10000000");
        assert_eq!(pos, 10);
    }

    #[test]
    fn long_field_spanning_many_bytes() {
        let mut bytes = [0u8; 10];
        let mut pos = 3;
        write_field_raw(&mut bytes, &mut pos, u64::MAX, 64);
        assert_eq!(pos, 67);
        assert_eq!(
            bitstring(&bytes),
            "00011111_11111111_11111111_11111111_11111111_11111111_11111111_11111111_11100000_00000000"
        );

        let mut pos = 3;
        assert_eq!(read_field_raw(&bytes, &mut pos, 64), u64::MAX);
        assert_eq!(pos, 67);
    }

    #[test]
    fn high_bits_of_value_are_ignored() {
        let mut bytes = [0u8; 2];
        let mut pos = 3;
        write_field_raw(&mut bytes, &mut pos, 0xFFFF_FFFF_FFFF_FFE5, 5);
        // Low 5 bits of the value are 0b00101.
        assert_eq!(bitstring(&bytes), "00000101_00000000");
    }

    #[test]
    fn packed_fields_round_trip_at_odd_offsets() {
        let mut bytes = [0u8; 8];
        let mut pos = 0;
        for v in 0..12u64 {
            write_field_raw(&mut bytes, &mut pos, v, 5);
        }
        assert_eq!(pos, 60);

        let mut pos = 0;
        for v in 0..12u64 {
            assert_eq!(read_field_raw(&bytes, &mut pos, 5), v);
        }
    }

    #[test]
    fn zero_width_field_is_a_noop() {
        let mut bytes = [0xA5u8];
        let mut pos = 4;
        write_field_raw(&mut bytes, &mut pos, 0xFFFF, 0);
        assert_eq!(bytes, [0xA5]);
        assert_eq!(pos, 4);
        assert_eq!(read_field_raw(&bytes, &mut pos, 0), 0);
        assert_eq!(pos, 4);
    }
}
