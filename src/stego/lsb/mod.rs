// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Least-significant-bit embedding over a pixel grid.
//!
//! One bit per color sample, consumed R, G, B, R, G, B, ... across pixels in
//! scan order. A fourth (alpha) sample is never read or written.

pub mod embed;
pub mod extract;

pub use embed::{embed, embed_in_place};
pub use extract::{extract, extract_bits, Extractor, ScanState};

/// Number of samples per pixel that carry payload bits.
pub const LSB_CHANNELS: usize = 3;
