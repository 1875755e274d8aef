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

//! Bit-granular binary codec.
//!
//! This crate packs and unpacks integer fields of arbitrary bit width (1 to
//! 64 bits) into flat byte buffers, with a cursor that advances in single-bit
//! increments and can be repositioned. It underlies wire and file formats
//! whose fields are not byte-aligned: packed headers, compact numeric
//! encodings, and similar bit-level layouts.
//!
//! Bit numbering is MSB-first: bit 0 of the stream is the most significant
//! bit of byte 0. Fields are packed contiguously with no padding and may span
//! byte boundaries. Two signed encodings are supported and are not
//! interchangeable on the wire: truncated two's-complement
//! ([`BitWriter::write_twoc`] / [`BitReader::read_twoc`]) and sign-magnitude
//! ([`BitWriter::write_signmag`] / [`BitReader::read_signmag`]). Writer and
//! reader must agree per field on width and encoding; the codec does not
//! check that contract.
//!
//! # Examples
//!
//! ```
//! # fn main() -> bitcursor::error::Result<()> {
//! use bitcursor::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(); // growable buffer
//! writer.write_bit(true)?;
//! writer.write_uint(21u8, 5)?;
//! writer.write_twoc(-300i16, 12)?;
//!
//! let mut reader = BitReader::from_slice(writer.as_slice());
//! assert!(reader.read_bit()?);
//! assert_eq!(reader.read_uint(5)?, 21);
//! assert_eq!(reader.read_twoc(12)?, -300);
//! # Ok(())}
//! ```
//!
//! Neither type is internally synchronized; use one instance per thread or
//! synchronize externally.

// Note that clippy attributes should be in sync with those declared in
// "main.rs" of any binary built on this crate.
#![warn(clippy::all, clippy::nursery, clippy::pedantic, clippy::cargo)]
// Some of clippy::pedantic rules are actually useful, so use it with a lot of
// ad-hoc exceptions.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]

pub mod constant;
pub mod error;
pub(crate) mod field;
pub mod reader;
pub(crate) mod sink;
pub mod writer;

pub use error::BitstreamError;
pub use reader::BitReader;
pub use writer::BitWriter;
pub use writer::Bits;
pub use writer::SignedBits;
