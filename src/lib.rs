// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # lsbsteg-core
//!
//! Hides text messages in the least-significant bits of PNG/BMP pixels,
//! optionally encrypted with a password first.
//!
//! - Without a password the UTF-8 message bytes are embedded directly.
//! - With a password they are sealed with AES-256-CBC under a
//!   PBKDF2-HMAC-SHA256 key (100,000 rounds, random salt and IV) and the
//!   base64 envelope is embedded instead.
//!
//! The decoder needs no length field: the payload is followed by the
//! `##END##` marker and extraction stops at the first occurrence.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use lsbsteg_core::{encode, decode, PixelGrid};
//!
//! let cover = PixelGrid::open("photo.png").unwrap();
//! let stego = encode(&cover, "secret message", Some("passphrase")).unwrap();
//! stego.save("photo_stego.png").unwrap();
//! assert_eq!(decode(&stego, Some("passphrase")).unwrap(), "secret message");
//! ```

pub mod raster;
pub mod stego;

pub use raster::error::RasterError;
pub use raster::{OutputFormat, PixelGrid};
pub use stego::{decode, decode_file, encode, encode_file, StegoError};
pub use stego::{capacity_bits, estimate_capacity, max_message_bytes};
