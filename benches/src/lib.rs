//! Benchmark helper utilities for spt-rs
//!
//! This module provides utilities for generating synthetic sprites and common
//! benchmark helpers for the spt-rs project.
//!
//! # Synthetic Sprites
//!
//! Game sprites are mostly flat regions with a transparent background, so the
//! generators paint horizontal bands of varying length over a background color.
//! That yields a realistic mix of long runs, short runs and lone pixels.

use spt_types::file::spt::{Bitmap, Color, EncodeOptions, Offset, encode};

/// Generates `count` distinct colors whose channels survive ARGB4444 packing
pub fn generate_palette(count: usize) -> Vec<Color> {
	(0..count)
		.map(|i| {
			let i = i as u8;
			Color::new((i & 0x0F) << 4, i & 0xF0, i.wrapping_mul(7) & 0xF0, 0xF0)
		})
		.collect()
}

/// Generates palette indices for one banded frame
///
/// Band lengths cycle through 1, 3, 9, 40 and 200 pixels; index 0 is the
/// background and covers every other band.
pub fn generate_indices(width: u32, height: u32, colors: usize, seed: usize) -> Vec<u8> {
	const BANDS: [usize; 5] = [1, 3, 9, 40, 200];

	let total = width as usize * height as usize;
	let mut indices = Vec::with_capacity(total);
	let mut band = seed;

	while indices.len() < total {
		let length = BANDS[band % BANDS.len()].min(total - indices.len());
		let index = if band % 2 == 0 || colors < 2 {
			0
		} else {
			1 + (band * 31 + seed) % (colors - 1)
		};
		indices.extend(std::iter::repeat_n(index as u8, length));
		band += 1;
	}

	indices
}

/// Generates `frames` banded RGBA frames drawing from `colors` colors
pub fn generate_frames(width: u32, height: u32, colors: usize, frames: usize) -> Vec<Bitmap> {
	let palette = generate_palette(colors);
	(0..frames)
		.map(|seed| {
			let pixels: Vec<Color> = generate_indices(width, height, colors, seed)
				.into_iter()
				.map(|index| palette[usize::from(index)])
				.collect();
			Bitmap::from_colors(width, height, &pixels).expect("generated buffer matches dimensions")
		})
		.collect()
}

/// Generates a complete SPT file
pub fn generate_test_spt_data(width: u32, height: u32, colors: usize, frames: usize) -> Vec<u8> {
	let bitmaps = generate_frames(width, height, colors, frames);
	let options = EncodeOptions::default().with_offset(Offset::new(32, 16));
	encode(&bitmaps, &options).expect("synthetic frames encode").into_bytes()
}

/// Common benchmark sizes for synthetic test data
pub mod sizes {
	/// Icon: 32x32 (1,024 pixels)
	pub const ICON: (u32, u32) = (32, 32);
	/// Character sprite: 128x128 (16,384 pixels)
	pub const SPRITE: (u32, u32) = (128, 128);
	/// Single-image height limit: 640x255 (163,200 pixels)
	pub const BANNER: (u32, u32) = (640, 255);
	/// Full screen: 640x480 (307,200 pixels)
	pub const SCREEN: (u32, u32) = (640, 480);
}

#[cfg(test)]
mod tests {
	use super::*;
	use spt_types::file::spt::File;

	#[test]
	fn test_generate_palette_is_distinct() {
		let palette = generate_palette(256);
		let unique: std::collections::HashSet<_> = palette.iter().collect();
		assert_eq!(unique.len(), 256);
		assert!(palette.iter().all(|color| color.quantized() == *color));
	}

	#[test]
	fn test_generate_indices() {
		let indices = generate_indices(10, 10, 16, 0);
		assert_eq!(indices.len(), 100);
		assert!(indices.iter().all(|&index| index < 16));
		assert_eq!(indices[0], 0);
		assert_eq!(&indices[1..4], &[indices[1]; 3]);
	}

	#[test]
	fn test_generate_test_spt_data() {
		let data = generate_test_spt_data(64, 32, 20, 3);
		let file = File::from_bytes(&data).unwrap();
		assert_eq!(file.frame_count(), 3);
		assert_eq!((file.width(), file.height()), (64, 32));
		assert!(file.diagnostics().is_empty());
	}
}
