// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! LSB embedding.

use super::LSB_CHANNELS;
use crate::raster::PixelGrid;
use crate::stego::capacity;
use crate::stego::error::StegoError;

/// Embed `bits` into a copy of `cover`.
///
/// The cover is left untouched; the returned grid differs from it only in
/// the low bit of channels 0-2 of the first `ceil(bits.len() / 3)` pixels.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] if the stream is longer than the cover's
/// capacity. Checked before the cover is copied.
pub fn embed(cover: &PixelGrid, bits: &[u8]) -> Result<PixelGrid, StegoError> {
    capacity::ensure_fits(cover.pixel_count(), bits.len())?;
    let mut stego = cover.clone();
    embed_in_place(&mut stego, bits)?;
    Ok(stego)
}

/// Embed `bits` directly into `grid`.
///
/// Returns the number of pixels that received at least one bit. On error the
/// grid is not modified.
pub fn embed_in_place(grid: &mut PixelGrid, bits: &[u8]) -> Result<usize, StegoError> {
    capacity::ensure_fits(grid.pixel_count(), bits.len())?;

    let mut touched = 0;
    for (pixel, group) in grid.pixels_mut().zip(bits.chunks(LSB_CHANNELS)) {
        // A short last group leaves the remaining channels of that pixel as-is.
        for (sample, &bit) in pixel[..LSB_CHANNELS].iter_mut().zip(group) {
            *sample = (*sample & !1) | (bit & 1);
        }
        touched += 1;
    }
    Ok(touched)
}
