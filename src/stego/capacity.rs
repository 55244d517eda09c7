// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Capacity calculation.
//!
//! A grid of `n` pixels carries `3n` bits. The framed stream spends 56 of
//! them on the end marker, and an encrypted payload additionally pays for
//! salt, IV, block padding and base64 expansion.

use crate::raster::PixelGrid;
use crate::stego::crypto::{BLOCK_LEN, IV_LEN, SALT_LEN};
use crate::stego::error::StegoError;
use crate::stego::frame::{self, SENTINEL_BITS};
use crate::stego::lsb::LSB_CHANNELS;

/// Embeddable bits in a grid of `pixel_count` pixels.
pub fn capacity_bits(pixel_count: usize) -> usize {
    pixel_count.saturating_mul(LSB_CHANNELS)
}

/// Largest payload (in bytes) whose framed stream fits, marker excluded.
///
/// `None` when the grid cannot even hold the end marker, so not even an
/// empty payload fits.
pub fn max_payload_bytes(pixel_count: usize) -> Option<usize> {
    capacity_bits(pixel_count)
        .checked_sub(SENTINEL_BITS)
        .map(|bits| bits / 8)
}

/// Size in bytes of the base64 envelope produced for `plaintext_len` bytes.
pub fn sealed_len(plaintext_len: usize) -> usize {
    // PKCS#7 always adds between 1 and BLOCK_LEN bytes.
    let ciphertext = (plaintext_len / BLOCK_LEN + 1) * BLOCK_LEN;
    let raw = SALT_LEN + IV_LEN + ciphertext;
    raw.div_ceil(3) * 4
}

/// Largest message (in bytes) that fits in a grid of `pixel_count` pixels.
///
/// With `encrypted`, accounts for the envelope overhead. `None` when not even
/// an empty message fits (the marker, or with `encrypted` an empty envelope).
pub fn max_message_bytes(pixel_count: usize, encrypted: bool) -> Option<usize> {
    let payload = max_payload_bytes(pixel_count)?;
    if !encrypted {
        return Some(payload);
    }

    // base64 output is 4 * ceil(raw / 3), so raw <= 3 * floor(payload / 4).
    let raw = payload / 4 * 3;
    let blocks = raw.checked_sub(SALT_LEN + IV_LEN)? / BLOCK_LEN;
    if blocks == 0 {
        return None;
    }
    // The last block must hold at least one padding byte.
    Some(blocks * BLOCK_LEN - 1)
}

/// Largest message (in bytes) that fits in `grid`, `None` if the grid is too
/// small for any message.
pub fn estimate_capacity(grid: &PixelGrid, encrypted: bool) -> Option<usize> {
    max_message_bytes(grid.pixel_count(), encrypted)
}

/// Check that a stream of `bit_len` bits fits in `pixel_count` pixels.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] with the available and required byte
/// counts.
pub fn ensure_fits(pixel_count: usize, bit_len: usize) -> Result<(), StegoError> {
    let available = capacity_bits(pixel_count);
    if bit_len > available {
        return Err(StegoError::CapacityExceeded {
            available_bytes: available / 8,
            required_bytes: bit_len.div_ceil(8),
        });
    }
    Ok(())
}

/// Check that a payload of `payload_len` bytes fits once framed.
pub fn ensure_payload_fits(pixel_count: usize, payload_len: usize) -> Result<(), StegoError> {
    ensure_fits(pixel_count, frame::stream_len_bits(payload_len))
}
