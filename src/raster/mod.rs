// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Pixel container for cover and stego images.
//!
//! Wraps the `image` crate so that the steganography layer only ever sees an
//! interleaved 8-bit sample buffer in native scan order. Only lossless
//! containers are written back out:
//!
//! - PNG (default)
//! - BMP
//!
//! Inputs carrying an alpha channel are kept as 4-channel RGBA, everything
//! else (RGB, grayscale, palette) is expanded to 3-channel RGB. Samples wider
//! than 8 bits are reduced to 8 bits on load.

pub mod error;

use std::io::Cursor;
use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat};

use error::{RasterError, Result};

/// Channel count for RGB grids.
pub const RGB_CHANNELS: usize = 3;
/// Channel count for RGBA grids.
pub const RGBA_CHANNELS: usize = 4;

/// Lossless output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Bmp,
}

impl OutputFormat {
    /// Pick the output container from a file extension (case-insensitive).
    ///
    /// # Errors
    /// [`RasterError::UnsupportedOutputFormat`] for any extension other than
    /// `png` or `bmp`, including a missing extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            _ => Err(RasterError::UnsupportedOutputFormat(ext)),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// An owned grid of 8-bit pixels in scan order.
///
/// Samples are interleaved (`R G B [A] R G B [A] ...`). The grid is a value
/// type: embedding produces a new grid rather than aliasing the cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Build a grid from a raw interleaved sample buffer.
    ///
    /// # Errors
    /// [`RasterError::InvalidLayout`] if `channels` is not 3 or 4, or if
    /// `data.len() != width * height * channels`.
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels != RGB_CHANNELS && channels != RGBA_CHANNELS {
            return Err(RasterError::InvalidLayout);
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|p| p.checked_mul(channels))
            .ok_or(RasterError::InvalidLayout)?;
        if data.len() != expected {
            return Err(RasterError::InvalidLayout);
        }
        Ok(Self { width, height, channels, data })
    }

    /// Decode a PNG or BMP container from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(|e| RasterError::Decode(e.to_string()))?;
        Self::from_dynamic(img)
    }

    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let grid = Self::from_bytes(&bytes)?;
        log::debug!(
            "loaded {} ({}x{}, {} channels)",
            path.display(),
            grid.width,
            grid.height,
            grid.channels
        );
        Ok(grid)
    }

    fn from_dynamic(img: DynamicImage) -> Result<Self> {
        let (width, height) = (img.width(), img.height());
        if img.color().has_alpha() {
            Self::new(width, height, RGBA_CHANNELS, img.into_rgba8().into_raw())
        } else {
            Self::new(width, height, RGB_CHANNELS, img.into_rgb8().into_raw())
        }
    }

    /// Encode the grid losslessly into the given container.
    pub fn to_bytes(&self, format: OutputFormat) -> Result<Vec<u8>> {
        let color = if self.channels == RGBA_CHANNELS { ColorType::Rgba8 } else { ColorType::Rgb8 };
        let mut out = Vec::new();
        image::write_buffer_with_format(
            &mut Cursor::new(&mut out),
            &self.data,
            self.width,
            self.height,
            color,
            format.image_format(),
        )
        .map_err(|e| RasterError::Encode(e.to_string()))?;
        Ok(out)
    }

    /// Write the grid to `path`, choosing the container from the extension.
    ///
    /// The format is validated before anything touches the filesystem.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path)?;
        let bytes = self.to_bytes(format)?;
        std::fs::write(path, &bytes)?;
        log::debug!("wrote {} ({format:?}, {} bytes)", path.display(), bytes.len());
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel (3 or 4).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of pixels in the grid.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / self.channels
    }

    /// Raw interleaved samples.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the grid and return its sample buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Samples of the pixel at scan index `idx`.
    pub fn pixel(&self, idx: usize) -> &[u8] {
        let start = idx * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Iterate over pixels in scan order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels)
    }

    /// Mutable iteration over pixels in scan order.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.channels)
    }
}
