// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Encode/decode pipeline.
//!
//! Encode: message -> (optional) password envelope -> framed bit stream ->
//! LSB embedding. Decode runs the same stages in reverse, stopping at the
//! end marker.

use std::path::Path;

use crate::raster::{OutputFormat, PixelGrid};
use crate::stego::capacity;
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::frame;
use crate::stego::lsb;

/// An empty password means "no password".
fn effective_password(password: Option<&str>) -> Option<&str> {
    password.filter(|p| !p.is_empty())
}

/// Hide `message` in a copy of `cover`.
///
/// With a password the message is sealed in an encrypted envelope first.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] if the framed payload does not fit. The
/// check runs before the key derivation and before any pixel is copied.
pub fn encode(cover: &PixelGrid, message: &str, password: Option<&str>) -> Result<PixelGrid, StegoError> {
    let password = effective_password(password);
    let payload_len = match password {
        Some(_) => capacity::sealed_len(message.len()),
        None => message.len(),
    };
    capacity::ensure_payload_fits(cover.pixel_count(), payload_len)?;

    let payload = match password {
        Some(pw) => crypto::seal(message.as_bytes(), pw),
        None => message.as_bytes().to_vec(),
    };
    debug_assert_eq!(payload.len(), payload_len);

    let bits = frame::to_bits(&payload);
    let stego = lsb::embed(cover, &bits)?;
    log::debug!(
        "embedded {} payload bytes ({} bits, encrypted: {}) into {} of {} pixels",
        payload.len(),
        bits.len(),
        password.is_some(),
        bits.len().div_ceil(lsb::LSB_CHANNELS),
        cover.pixel_count()
    );
    Ok(stego)
}

/// Recover the message hidden in `stego`.
///
/// # Errors
/// - [`StegoError::NoHiddenMessage`] if no end marker is present.
/// - [`StegoError::DecryptionFailed`] if a password is given and the envelope
///   does not open, or opens to something that is not UTF-8.
/// - [`StegoError::InvalidUtf8`] if no password is given and the payload is
///   not UTF-8.
pub fn decode(stego: &PixelGrid, password: Option<&str>) -> Result<String, StegoError> {
    let payload = lsb::extract(stego)?;
    log::debug!("extracted {} payload bytes", payload.len());

    match effective_password(password) {
        Some(pw) => {
            let plaintext = crypto::open(&payload, pw)?;
            String::from_utf8(plaintext).map_err(|_| StegoError::DecryptionFailed)
        }
        None => String::from_utf8(payload).map_err(|_| StegoError::InvalidUtf8),
    }
}

/// Read `input`, hide `message`, and write the result to `output`.
///
/// `output` must end in `.png` or `.bmp`; this is checked before the cover
/// is read.
pub fn encode_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    message: &str,
    password: Option<&str>,
) -> Result<(), StegoError> {
    let output = output.as_ref();
    OutputFormat::from_path(output)?;

    let cover = PixelGrid::open(input)?;
    let stego = encode(&cover, message, password)?;
    stego.save(output)?;
    Ok(())
}

/// Read `input` and recover its hidden message.
pub fn decode_file(input: impl AsRef<Path>, password: Option<&str>) -> Result<String, StegoError> {
    let stego = PixelGrid::open(input)?;
    decode(&stego, password)
}
