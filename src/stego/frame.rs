// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Bit stream framing.
//!
//! The embedded stream carries no length prefix. The payload is followed by
//! a fixed end marker and the decoder stops as soon as it has seen it:
//!
//! ```text
//! [8*N bits] payload bytes, MSB first
//! [56 bits ] "##END##", MSB first
//! ```
//!
//! Total stream length = 8 * (N + 7) bits.
//!
//! Note: the marker is a plain byte literal. If the payload itself contains
//! `##END##` the decoder stops early at that point. Encrypted payloads are
//! base64 text and can never contain `#`.

/// End-of-payload marker.
pub const SENTINEL: &[u8; 7] = b"##END##";

/// Length of the end marker in bits.
pub const SENTINEL_BITS: usize = SENTINEL.len() * 8;

/// Bit pattern of [`SENTINEL`], right-aligned in a `u64`.
const SENTINEL_PATTERN: u64 = {
    let mut pattern = 0u64;
    let mut i = 0;
    while i < SENTINEL.len() {
        pattern = (pattern << 8) | SENTINEL[i] as u64;
        i += 1;
    }
    pattern
};

const WINDOW_MASK: u64 = (1u64 << SENTINEL_BITS) - 1;

/// Serialize a payload into the embedded bit stream (payload bits followed by
/// the end marker bits).
pub fn to_bits(payload: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(stream_len_bits(payload.len()));
    push_bits(&mut bits, payload);
    push_bits(&mut bits, SENTINEL);
    bits
}

/// Length in bits of the framed stream for a payload of `payload_len` bytes.
pub fn stream_len_bits(payload_len: usize) -> usize {
    payload_len.saturating_add(SENTINEL.len()).saturating_mul(8)
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    push_bits(&mut bits, bytes);
    bits
}

fn push_bits(bits: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
}

/// Convert a bit vector (MSB first) back to bytes.
///
/// A trailing group of fewer than 8 bits is dropped, not zero-padded.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | (bit & 1)))
        .collect()
}

/// Rolling matcher for the end marker.
///
/// Keeps the last [`SENTINEL_BITS`] bits in a shift register so each pushed
/// bit costs one shift and one compare, independent of how many bits have
/// been seen.
#[derive(Debug, Clone, Default)]
pub struct SentinelScanner {
    window: u64,
    filled: usize,
}

impl SentinelScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one bit. Returns `true` when the most recent [`SENTINEL_BITS`]
    /// bits equal the marker.
    pub fn push(&mut self, bit: u8) -> bool {
        self.window = ((self.window << 1) | u64::from(bit & 1)) & WINDOW_MASK;
        if self.filled < SENTINEL_BITS {
            self.filled += 1;
        }
        self.filled == SENTINEL_BITS && self.window == SENTINEL_PATTERN
    }
}
