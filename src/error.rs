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

//! Error types for bit-stream I/O.

use std::error::Error;
use std::fmt;

/// Type alias of `Result` specialized for the crate error type.
pub type Result<T> = std::result::Result<T, BitstreamError>;

/// Enum of errors raised by bit-stream read/write operations.
///
/// Both variants are fatal to the single operation that raised them: the
/// cursor and the buffer contents are left exactly as they were before the
/// failing call.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum BitstreamError {
    /// A write against a fixed-capacity sink would run past its end.
    ///
    /// Never raised by a growable sink, which expands instead.
    InsufficientSpace {
        /// Cursor (bit offset) at the time of the failed write.
        pos: u64,
        /// Number of bits the operation requested.
        requested: usize,
        /// Total capacity of the sink in bits.
        capacity: u64,
    },
    /// A read would run past the end of the input buffer.
    InsufficientData {
        /// Cursor (bit offset) at the time of the failed read.
        pos: u64,
        /// Number of bits the operation requested.
        requested: usize,
        /// Total capacity of the buffer in bits.
        capacity: u64,
    },
}

impl Error for BitstreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl fmt::Display for BitstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientSpace {
                pos,
                requested,
                capacity,
            } => write!(
                f,
                "insufficient space: {requested} bits requested at bit {pos} (capacity={capacity})"
            ),
            Self::InsufficientData {
                pos,
                requested,
                capacity,
            } => write!(
                f,
                "insufficient data: {requested} bits requested at bit {pos} (capacity={capacity})"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_positions() {
        let err = BitstreamError::InsufficientSpace {
            pos: 2040,
            requested: 12,
            capacity: 2048,
        };
        assert_eq!(
            format!("{err}"),
            "insufficient space: 12 bits requested at bit 2040 (capacity=2048)"
        );

        let err = BitstreamError::InsufficientData {
            pos: 0,
            requested: 9,
            capacity: 8,
        };
        assert_eq!(
            format!("{err}"),
            "insufficient data: 9 bits requested at bit 0 (capacity=8)"
        );
    }
}
