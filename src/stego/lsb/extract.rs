// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! LSB extraction with streaming end-marker detection.
//!
//! The extractor is a three-state machine:
//!
//! ```text
//! Scanning --bit--> Scanning      (no marker yet)
//! Scanning --bit--> Match         (last 56 bits == marker, terminal)
//! Scanning --end--> Exhausted     (grid consumed, terminal)
//! ```
//!
//! Extraction stops at the first match, so only the embedded prefix of the
//! image is ever read.

use super::LSB_CHANNELS;
use crate::raster::PixelGrid;
use crate::stego::error::StegoError;
use crate::stego::frame::{self, SentinelScanner, SENTINEL_BITS};

/// Extractor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Still looking for the end marker.
    Scanning,
    /// The end marker was just completed.
    Match,
    /// Input ran out without a marker.
    Exhausted,
}

/// Incremental bit collector. Feed bits with [`push`](Self::push), then call
/// [`into_payload`](Self::into_payload) or
/// [`into_payload_bits`](Self::into_payload_bits).
///
/// Bits are packed MSB-first as they arrive; only the trailing sub-byte
/// remainder is held unpacked.
#[derive(Debug, Clone)]
pub struct Extractor {
    bytes: Vec<u8>,
    acc: u8,
    bit_len: usize,
    scanner: SentinelScanner,
    state: ScanState,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            acc: 0,
            bit_len: 0,
            scanner: SentinelScanner::new(),
            state: ScanState::Scanning,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Append one bit. Ignored once a terminal state is reached.
    pub fn push(&mut self, bit: u8) -> ScanState {
        if self.state == ScanState::Scanning {
            self.acc = (self.acc << 1) | (bit & 1);
            self.bit_len += 1;
            if self.bit_len % 8 == 0 {
                self.bytes.push(self.acc);
                self.acc = 0;
            }
            if self.scanner.push(bit) {
                self.state = ScanState::Match;
            }
        }
        self.state
    }

    /// Signal end of input. Moves `Scanning` to `Exhausted`.
    pub fn exhaust(&mut self) -> ScanState {
        if self.state == ScanState::Scanning {
            self.state = ScanState::Exhausted;
        }
        self.state
    }

    fn payload_bit_len(&self) -> Result<usize, StegoError> {
        match self.state {
            ScanState::Match => Ok(self.bit_len - SENTINEL_BITS),
            ScanState::Scanning | ScanState::Exhausted => Err(StegoError::NoHiddenMessage),
        }
    }

    /// Payload bytes with the marker removed. A trailing group shorter than a
    /// byte is dropped.
    ///
    /// # Errors
    /// [`StegoError::NoHiddenMessage`] unless the extractor is in `Match`.
    pub fn into_payload(mut self) -> Result<Vec<u8>, StegoError> {
        let payload_bits = self.payload_bit_len()?;
        self.bytes.truncate(payload_bits / 8);
        Ok(self.bytes)
    }

    /// Payload bits with the marker removed.
    ///
    /// # Errors
    /// [`StegoError::NoHiddenMessage`] unless the extractor is in `Match`.
    pub fn into_payload_bits(self) -> Result<Vec<u8>, StegoError> {
        let payload_bits = self.payload_bit_len()?;
        let mut bits = frame::bytes_to_bits(&self.bytes);
        let remainder = self.bit_len % 8;
        bits.extend((0..remainder).rev().map(|i| (self.acc >> i) & 1));
        bits.truncate(payload_bits);
        Ok(bits)
    }
}

/// Feed LSBs from `grid` into an extractor until the end marker or the end
/// of the grid.
fn scan(grid: &PixelGrid) -> Extractor {
    let mut extractor = Extractor::new();

    'scan: for (idx, pixel) in grid.pixels().enumerate() {
        for &sample in &pixel[..LSB_CHANNELS] {
            if extractor.push(sample & 1) == ScanState::Match {
                log::trace!("end marker found in pixel {idx}");
                break 'scan;
            }
        }
    }

    if extractor.exhaust() == ScanState::Exhausted {
        log::trace!("scanned all {} pixels, no end marker", grid.pixel_count());
    }
    extractor
}

/// Read LSBs from `grid` until the end marker, returning the payload bits
/// that precede it.
///
/// # Errors
/// [`StegoError::NoHiddenMessage`] if the whole grid was read without a match.
pub fn extract_bits(grid: &PixelGrid) -> Result<Vec<u8>, StegoError> {
    scan(grid).into_payload_bits()
}

/// Read the embedded payload bytes from `grid`.
///
/// Payload bits are regrouped MSB-first; a trailing group shorter than a
/// byte is dropped.
pub fn extract(grid: &PixelGrid) -> Result<Vec<u8>, StegoError> {
    scan(grid).into_payload()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::frame::{bits_to_bytes, bytes_to_bits, to_bits, SENTINEL};
    use crate::stego::lsb::embed;

    fn cover(pixels: usize, channels: usize) -> PixelGrid {
        let data = (0..pixels * channels).map(|i| (i * 131 % 251) as u8).collect();
        PixelGrid::new(pixels as u32, 1, channels, data).unwrap()
    }

    #[test]
    fn state_machine_transitions() {
        let mut ex = Extractor::new();
        assert_eq!(ex.state(), ScanState::Scanning);
        for bit in bytes_to_bits(SENTINEL) {
            ex.push(bit);
        }
        assert_eq!(ex.state(), ScanState::Match);
        // Terminal: further input and exhaustion do not change the state.
        assert_eq!(ex.push(1), ScanState::Match);
        assert_eq!(ex.exhaust(), ScanState::Match);
        assert_eq!(ex.into_payload_bits().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn bits_are_packed_as_they_arrive() {
        let mut ex = Extractor::new();
        for _ in 0..3003 {
            ex.push(1);
        }
        assert_eq!(ex.bytes.len(), 375);
        assert_eq!(ex.bit_len, 3003);
        assert_eq!(ex.acc, 0b111);
    }

    #[test]
    fn packed_payload_matches_bit_payload() {
        for extra in 0..8 {
            let mut bits = bytes_to_bits(b"ok");
            bits.extend(std::iter::repeat(1).take(extra));
            bits.extend(bytes_to_bits(SENTINEL));
            let mut ex = Extractor::new();
            for &bit in &bits {
                ex.push(bit);
            }
            assert_eq!(ex.state(), ScanState::Match);
            let payload_bits = ex.clone().into_payload_bits().unwrap();
            assert_eq!(payload_bits, bits[..16 + extra].to_vec(), "{extra} extra bits");
            assert_eq!(ex.into_payload().unwrap(), bits_to_bytes(&payload_bits));
        }
    }

    #[test]
    fn exhausted_reports_no_message() {
        let mut ex = Extractor::new();
        for _ in 0..100 {
            ex.push(0);
        }
        assert_eq!(ex.exhaust(), ScanState::Exhausted);
        assert!(matches!(ex.into_payload_bits(), Err(StegoError::NoHiddenMessage)));
    }

    #[test]
    fn embed_then_extract_hi() {
        let g = cover(334, 3);
        let stego = embed(&g, &to_bits(b"hi")).unwrap();
        assert_eq!(extract(&stego).unwrap(), b"hi");
    }

    #[test]
    fn extract_with_alpha_channel() {
        let g = cover(200, 4);
        let stego = embed(&g, &to_bits(b"rgba cover")).unwrap();
        assert_eq!(extract(&stego).unwrap(), b"rgba cover");
    }

    #[test]
    fn stops_at_first_marker() {
        // Bytes after the first marker are never read.
        let mut payload = b"first".to_vec();
        payload.extend_from_slice(SENTINEL);
        payload.extend_from_slice(b"second");
        let g = cover(100, 3);
        let stego = embed(&g, &to_bits(&payload)).unwrap();
        assert_eq!(extract(&stego).unwrap(), b"first");
    }

    #[test]
    fn unembedded_grid_has_no_message() {
        let g = PixelGrid::new(50, 50, 3, vec![0u8; 50 * 50 * 3]).unwrap();
        assert!(matches!(extract(&g), Err(StegoError::NoHiddenMessage)));
    }

    #[test]
    fn empty_grid_has_no_message() {
        let g = PixelGrid::new(0, 0, 3, Vec::new()).unwrap();
        assert!(matches!(extract(&g), Err(StegoError::NoHiddenMessage)));
    }

    #[test]
    fn unaligned_marker_truncates_partial_byte() {
        // 11 payload bits followed by the marker: one whole byte survives.
        let mut bits = bytes_to_bits(&[0xC3]);
        bits.extend_from_slice(&[1, 0, 1]);
        bits.extend(bytes_to_bits(SENTINEL));
        let g = cover(40, 3);
        let stego = embed(&g, &bits).unwrap();
        assert_eq!(extract_bits(&stego).unwrap().len(), 11);
        assert_eq!(extract(&stego).unwrap(), vec![0xC3]);
    }
}
