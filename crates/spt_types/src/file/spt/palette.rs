//! SPT palette support.
//!
//! Palette entries are stored as big-endian 16-bit ARGB4444 values. Decoding
//! widens every nibble by shifting it left by 4, so stored colors only ever
//! hold multiples of 16 (0..=240) in each channel.

use std::fmt;

use crate::file::SptError;

use super::constants;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a color from an `[r, g, b, a]` pixel.
	pub const fn from_rgba(pixel: [u8; 4]) -> Self {
		Self::new(pixel[0], pixel[1], pixel[2], pixel[3])
	}

	/// Returns the color as an `[r, g, b, a]` pixel.
	pub const fn to_rgba(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}

	/// Packs the color into ARGB4444, keeping the high nibble of each channel.
	pub const fn pack_argb4444(self) -> u16 {
		((self.a as u16 >> 4) << 12)
			| ((self.r as u16 >> 4) << 8)
			| ((self.g as u16 >> 4) << 4)
			| (self.b as u16 >> 4)
	}

	/// Unpacks an ARGB4444 value.
	pub const fn from_argb4444(packed: u16) -> Self {
		Self {
			a: ((packed >> 12) & 0xF) as u8 * 16,
			r: ((packed >> 8) & 0xF) as u8 * 16,
			g: ((packed >> 4) & 0xF) as u8 * 16,
			b: (packed & 0xF) as u8 * 16,
		}
	}

	/// Returns the color as it reads back after an ARGB4444 round trip.
	pub const fn quantized(self) -> Self {
		Self::from_argb4444(self.pack_argb4444())
	}

	/// Summed squared difference over all four channels.
	#[inline]
	pub fn distance_squared(&self, other: &Color) -> u32 {
		let d = |x: u8, y: u8| {
			let v = i32::from(x) - i32::from(y);
			(v * v) as u32
		};
		d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b) + d(self.a, other.a)
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Ordered SPT color table with 1 to 256 entries.
///
/// The position of a color is the value pixels use to reference it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	colors: Vec<Color>,
}

impl Palette {
	/// Creates a palette from a list of colors.
	pub fn new(colors: Vec<Color>) -> Result<Self, SptError> {
		if colors.is_empty() {
			return Err(SptError::DegenerateInput("palette has no colors"));
		}
		if colors.len() > constants::MAX_PALETTE_LEN {
			return Err(SptError::PaletteTooLarge {
				limit: colors.len(),
			});
		}
		Ok(Self {
			colors,
		})
	}

	/// Decodes `count` big-endian ARGB4444 entries from the start of `data`.
	pub fn from_packed_bytes(data: &[u8], count: usize) -> Result<Self, SptError> {
		let needed = count * constants::PALETTE_ENTRY_SIZE;
		if data.len() < needed {
			return Err(SptError::insufficient_data(needed, data.len()));
		}

		let colors = data[..needed]
			.chunks_exact(constants::PALETTE_ENTRY_SIZE)
			.map(|entry| Color::from_argb4444(u16::from_be_bytes([entry[0], entry[1]])))
			.collect();
		Self::new(colors)
	}

	/// Encodes the palette as big-endian ARGB4444 entries.
	pub fn to_packed_bytes(&self) -> Vec<u8> {
		self.colors.iter().flat_map(|color| color.pack_argb4444().to_be_bytes()).collect()
	}

	/// Number of entries.
	#[inline]
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// Always `false`; a palette holds at least one color.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Gets a color by index, or `None` when out of range.
	#[inline]
	pub fn get(&self, index: usize) -> Option<Color> {
		self.colors.get(index).copied()
	}

	/// Returns the colors in index order.
	#[inline]
	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	/// Returns a copy of the palette as it reads back from a written file.
	pub fn quantized(&self) -> Self {
		Self {
			colors: self.colors.iter().map(|c| c.quantized()).collect(),
		}
	}

	/// Returns an iterator over palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &Color> {
		self.colors.iter()
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SPT Palette: {} colors", self.colors.len())
	}
}

impl std::ops::Index<usize> for Palette {
	type Output = Color;

	fn index(&self, index: usize) -> &Self::Output {
		&self.colors[index]
	}
}
