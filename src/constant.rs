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

//! Mask tables and buffer-policy constants.

/// Masks selecting the `k` low-order bits of a byte, indexed by `k`.
pub const LOW_MASKS: [u8; 9] = [
    0x00, 0x01, 0x03, 0x07, 0x0F, 0x1F, 0x3F, 0x7F, 0xFF,
];

/// Masks setting a single bit, indexed by its MSB-first position in a byte.
pub const SET_BIT_MASKS: [u8; 8] = [
    0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01,
];

/// Masks clearing a single bit, indexed by its MSB-first position in a byte.
pub const CLEAR_BIT_MASKS: [u8; 8] = [
    0x7F, 0xBF, 0xDF, 0xEF, 0xF7, 0xFB, 0xFD, 0xFE,
];

/// Initial allocation (in bytes) of a growable sink.
pub const DEFAULT_CAPACITY_BYTES: usize = 16;
