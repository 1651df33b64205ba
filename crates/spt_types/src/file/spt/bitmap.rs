//! In-memory RGBA8 raster exchanged with image loaders and writers.

use std::fmt;

use crate::file::SptError;

use super::Color;

/// Row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
	width: u32,
	height: u32,
	pixels: Vec<u8>,
}

impl Bitmap {
	/// Wraps an RGBA8 buffer.
	///
	/// # Errors
	///
	/// Returns [`SptError::DegenerateInput`] if `pixels` is not exactly
	/// `width * height * 4` bytes long.
	pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SptError> {
		let expected = (width as usize)
			.checked_mul(height as usize)
			.and_then(|n| n.checked_mul(4))
			.ok_or(SptError::DegenerateInput("bitmap dimensions overflow"))?;
		if pixels.len() != expected {
			return Err(SptError::DegenerateInput("bitmap buffer length does not match its dimensions"));
		}

		Ok(Self {
			width,
			height,
			pixels,
		})
	}

	/// Builds a bitmap from one color per pixel.
	pub fn from_colors(width: u32, height: u32, colors: &[Color]) -> Result<Self, SptError> {
		Self::new(width, height, colors.iter().flat_map(|c| c.to_rgba()).collect())
	}

	/// Returns the width in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the height in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns `(width, height)`.
	pub fn dimensions(&self) -> (u32, u32) {
		(self.width, self.height)
	}

	/// Returns the raw RGBA8 bytes.
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Consumes the bitmap and returns the raw RGBA8 bytes.
	pub fn into_pixels(self) -> Vec<u8> {
		self.pixels
	}

	/// Iterates over pixels as colors, row by row.
	pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
		self.pixels.chunks_exact(4).map(|p| Color::new(p[0], p[1], p[2], p[3]))
	}
}

impl fmt::Display for Bitmap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}x{} RGBA bitmap", self.width, self.height)
	}
}
