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

//! Write-sink variants backing [`BitWriter`].
//!
//! Only two buffer strategies exist, so the sink is a closed union rather
//! than an open trait: [`FixedSink`] writes into a caller-provided buffer of
//! immutable capacity, and [`GrowableSink`] owns a private buffer that
//! doubles on demand.
//!
//! [`BitWriter`]: crate::writer::BitWriter

use std::io::SeekFrom;

use super::field;

/// Ownership of a fixed-capacity byte buffer.
///
/// A borrowed buffer is kept alive by the caller and never released here; an
/// owned buffer is released by drop glue when the sink is dropped.
pub(crate) enum BufferMut<'a> {
    Borrowed(&'a mut [u8]),
    Owned(Box<[u8]>),
}

impl BufferMut<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Self::Borrowed(buf) => buf,
            Self::Owned(buf) => buf,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::Borrowed(buf) => buf,
            Self::Owned(buf) => buf,
        }
    }
}

/// Sink bound to a buffer whose capacity never changes.
pub(crate) struct FixedSink<'a> {
    buf: BufferMut<'a>,
    pos: u64,
    /// Capacity in bits; always `buf.len() * 8`.
    capacity: u64,
}

/// Sink owning a private buffer that doubles whenever a write would run past
/// its end. Existing bytes are preserved across growth and the backing store
/// never shrinks.
pub(crate) struct GrowableSink {
    buf: Vec<u8>,
    pos: u64,
    capacity: u64,
}

/// Closed union of the two buffer strategies.
pub(crate) enum Sink<'a> {
    Fixed(FixedSink<'a>),
    Growable(GrowableSink),
}

impl<'a> Sink<'a> {
    pub(crate) fn fixed(buf: BufferMut<'a>) -> Self {
        let capacity = buf.as_slice().len() as u64 * 8;
        Self::Fixed(FixedSink {
            buf,
            pos: 0,
            capacity,
        })
    }

    pub(crate) fn growable(initial_bytes: usize) -> Self {
        let nbytes = initial_bytes.max(1);
        Self::Growable(GrowableSink {
            buf: vec![0u8; nbytes],
            pos: 0,
            capacity: nbytes as u64 * 8,
        })
    }

    pub(crate) fn tell(&self) -> u64 {
        match self {
            Self::Fixed(sink) => sink.pos,
            Self::Growable(sink) => sink.pos,
        }
    }

    /// Repositions the cursor with no range validation; an out-of-range
    /// cursor makes the next capacity check fail instead.
    pub(crate) fn seek(&mut self, from: SeekFrom) -> u64 {
        let (pos, capacity) = match self {
            Self::Fixed(sink) => (&mut sink.pos, sink.capacity),
            Self::Growable(sink) => (&mut sink.pos, sink.capacity),
        };
        *pos = match from {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(offset) => pos.wrapping_add_signed(offset),
            SeekFrom::End(offset) => capacity.wrapping_add_signed(offset),
        };
        *pos
    }

    /// Current capacity in bits. Growth can change it for the growable
    /// variant, so callers must not cache it across writes.
    pub(crate) fn capacity(&self) -> u64 {
        match self {
            Self::Fixed(sink) => sink.capacity,
            Self::Growable(sink) => sink.capacity,
        }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Self::Fixed(sink) => sink.buf.as_slice(),
            Self::Growable(sink) => &sink.buf,
        }
    }

    /// Checks (fixed) or makes (growable) room for `nbits` more bits at the
    /// cursor. Returns whether the following raw write may proceed.
    pub(crate) fn ensure_capacity(&mut self, nbits: usize) -> bool {
        match self {
            Self::Fixed(sink) => sink
                .pos
                .checked_add(nbits as u64)
                .map_or(false, |end| end <= sink.capacity),
            Self::Growable(sink) => {
                let end = sink.pos.saturating_add(nbits as u64);
                while end > sink.capacity {
                    let nbytes = sink.buf.len() * 2;
                    sink.buf.resize(nbytes, 0);
                    sink.capacity = nbytes as u64 * 8;
                }
                true
            }
        }
    }

    /// Writes one bit at the cursor. Capacity must already be ensured.
    pub(crate) fn write_bit_raw(&mut self, bit: bool) {
        match self {
            Self::Fixed(sink) => field::write_bit_raw(sink.buf.as_mut_slice(), &mut sink.pos, bit),
            Self::Growable(sink) => field::write_bit_raw(&mut sink.buf, &mut sink.pos, bit),
        }
    }

    /// Packs the low `nbits` bits of `value` at the cursor. Capacity must
    /// already be ensured.
    pub(crate) fn write_field_raw(&mut self, value: u64, nbits: usize) {
        match self {
            Self::Fixed(sink) => {
                field::write_field_raw(sink.buf.as_mut_slice(), &mut sink.pos, value, nbits);
            }
            Self::Growable(sink) => {
                field::write_field_raw(&mut sink.buf, &mut sink.pos, value, nbits);
            }
        }
    }
}
