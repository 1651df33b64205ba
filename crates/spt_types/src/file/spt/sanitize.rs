//! Index sanitation for decoded pixel data.
//!
//! Some prototype-era assets carry run markers and literal pixels whose index
//! is outside the palette. Rather than failing, the decoder folds them back
//! into range in two places:
//!
//! 1. **Marker fold**: the 7-bit index of a length-byte run marker is reduced
//!    modulo 16, 32 or 64 when the palette is smaller than that, else 128.
//! 2. **Resolution**: every index is reduced modulo the palette length right
//!    before the palette lookup.
//!
//! Both steps are the identity for in-range indices. Every pixel they change
//! is counted so the decoder can report it.

use super::constants;

/// Folds out-of-range indices into the palette and counts how many it touched.
#[derive(Debug, Clone)]
pub struct IndexSanitizer {
	palette_len: usize,
	fold_modulus: u8,
	clamped: usize,
}

impl IndexSanitizer {
	/// Creates a sanitizer for a palette of `palette_len` entries.
	pub fn new(palette_len: usize) -> Self {
		let fold_modulus = match palette_len {
			0..16 => 16,
			16..32 => 32,
			32..64 => 64,
			_ => 128,
		};

		Self {
			palette_len: palette_len.max(1),
			fold_modulus,
			clamped: 0,
		}
	}

	/// Extracts the index of a length-byte run marker covering `run` pixels.
	pub fn fold_marker(&mut self, marker: u8, run: usize) -> u8 {
		let raw = marker & constants::INDEX_MASK;
		let folded = raw % self.fold_modulus;
		if folded != raw {
			self.clamped += run;
		}
		folded
	}

	/// Maps an index to a palette slot.
	#[inline]
	pub fn resolve(&mut self, index: u8) -> usize {
		let index = usize::from(index);
		if index < self.palette_len {
			index
		} else {
			self.clamped += 1;
			index % self.palette_len
		}
	}

	/// Returns the number of indices changed since the last call and resets it.
	pub fn take_clamped(&mut self) -> usize {
		std::mem::take(&mut self.clamped)
	}
}
