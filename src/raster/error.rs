// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for pixel container decoding and encoding.

use std::fmt;

/// Errors raised while reading or writing a cover/stego image.
#[derive(Debug)]
pub enum RasterError {
    /// The input bytes could not be decoded as a supported image.
    Decode(String),
    /// The pixel grid could not be serialized to the requested format.
    Encode(String),
    /// Reading or writing the image file failed.
    Io(std::io::Error),
    /// The output path names a format that is lossy or not supported.
    /// Lossy recompression would destroy the embedded LSBs.
    UnsupportedOutputFormat(String),
    /// Sample buffer length or channel count does not describe a valid grid.
    InvalidLayout,
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "could not decode image: {msg}"),
            Self::Encode(msg) => write!(f, "could not encode image: {msg}"),
            Self::Io(e) => write!(f, "image I/O failed: {e}"),
            Self::UnsupportedOutputFormat(ext) => {
                write!(f, "unsupported output format {ext:?} (use .png or .bmp)")
            }
            Self::InvalidLayout => write!(f, "pixel buffer does not match width x height x channels"),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RasterError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, RasterError>;
