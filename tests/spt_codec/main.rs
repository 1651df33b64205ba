//! Codec tests for `spt-rs`

mod corrupt;
mod roundtrip;

use spt_rs::prelude::*;

/// Frames of `width` x `height` cycling through `colors`, each shifted by one.
pub(crate) fn cycling_frames(width: u32, height: u32, colors: &[SptColor], count: usize) -> Vec<Bitmap> {
	(0..count)
		.map(|shift| {
			let pixels: Vec<SptColor> = (0..(width * height) as usize)
				.map(|i| colors[(i / 3 + shift) % colors.len()])
				.collect();
			Bitmap::from_colors(width, height, &pixels).unwrap()
		})
		.collect()
}

/// Colors whose channels are all multiples of 16, so they survive packing.
pub(crate) fn exact_colors(count: usize) -> Vec<SptColor> {
	(0..count)
		.map(|i| SptColor::new((i % 16) as u8 * 16, (i / 16 % 16) as u8 * 16, 0x80, 0xF0))
		.collect()
}
