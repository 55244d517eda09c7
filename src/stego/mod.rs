// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding pipelines.
//!
//! Two stages, the first optional:
//!
//! - **Envelope** (`crypto`): with a password, the message is sealed as
//!   `base64(salt || iv || AES-256-CBC(plaintext))` under a PBKDF2-derived key.
//! - **Bit codec** (`frame` + `lsb`): the payload is serialized MSB-first,
//!   terminated by the `##END##` marker, and written one bit per R/G/B
//!   sample in scan order.
//!
//! `encode` / `decode` work on in-memory [`PixelGrid`](crate::raster::PixelGrid)s;
//! `encode_file` / `decode_file` add the image I/O around them.

pub mod error;
pub mod crypto;
pub mod frame;
pub mod capacity;
pub mod lsb;
mod pipeline;

pub use error::StegoError;
pub use pipeline::{decode, decode_file, encode, encode_file};
pub use capacity::{capacity_bits, estimate_capacity, max_message_bytes};
