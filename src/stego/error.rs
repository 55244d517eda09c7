// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from image loading through
//! embedding, extraction and envelope decryption.

use core::fmt;

use crate::raster::error::RasterError;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// The bit stream does not fit in the cover image. Raised before any
    /// pixel is modified.
    CapacityExceeded {
        /// Bytes the cover can hold (capacity bits / 8).
        available_bytes: usize,
        /// Bytes the framed payload needs, sentinel included.
        required_bytes: usize,
    },
    /// Envelope malformed, wrong password, or invalid padding. The causes are
    /// deliberately not distinguished.
    DecryptionFailed,
    /// A full scan of the image found no end marker.
    NoHiddenMessage,
    /// The image could not be read or written. Passed through unchanged.
    Image(RasterError),
    /// The extracted payload is not valid UTF-8.
    InvalidUtf8,
}

impl StegoError {
    /// `true` for the negative "nothing embedded here" result, which callers
    /// usually report as a warning rather than a failure.
    pub fn is_no_message(&self) -> bool {
        matches!(self, Self::NoHiddenMessage)
    }
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { available_bytes, required_bytes } => write!(
                f,
                "message too large for this image: need {required_bytes} bytes, only {available_bytes} available"
            ),
            Self::DecryptionFailed => write!(f, "incorrect password or corrupted data"),
            Self::NoHiddenMessage => write!(f, "no hidden message found"),
            Self::Image(e) => write!(f, "{e}"),
            Self::InvalidUtf8 => write!(f, "extracted text is not valid UTF-8"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RasterError> for StegoError {
    fn from(e: RasterError) -> Self {
        Self::Image(e)
    }
}
