//! Non-fatal conditions reported while decoding or encoding.
//!
//! A conversion that produces diagnostics still completes. Each diagnostic is
//! handed back to the caller and also emitted through the `log` facade.

use std::fmt;

/// A recoverable condition met during a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
	/// More distinct colors than the palette limit; the least frequent were dropped
	PaletteOverflow {
		/// Distinct colors found in the input
		distinct: usize,
		/// Palette entries kept
		limit: usize,
	},

	/// A frame decoded to the wrong number of pixels and was padded or truncated
	PixelCountMismatch {
		/// Frame index
		frame: usize,
		/// `width * height`
		expected: usize,
		/// Pixels the RLE stream produced
		actual: usize,
	},

	/// Indices outside the palette were folded back into range
	IndicesClamped {
		/// Frame index
		frame: usize,
		/// Number of indices changed
		count: usize,
	},

	/// A sequence offset was supplied for a single-image file and discarded
	OffsetDropped {
		/// Discarded x offset
		x: u32,
		/// Discarded y offset
		y: u32,
	},

	/// Zero dwords between the palette and the first chunk were skipped
	PaddingSkipped {
		/// Number of bytes skipped
		bytes: usize,
	},
}

impl Diagnostic {
	/// Emits the diagnostic through the `log` facade.
	pub fn log(&self) {
		match self {
			Diagnostic::PaddingSkipped {
				..
			} => log::debug!("{self}"),
			_ => log::warn!("{self}"),
		}
	}

	/// Number of colors that did not make it into the palette.
	pub fn overflow_count(&self) -> Option<usize> {
		match self {
			Diagnostic::PaletteOverflow {
				distinct,
				limit,
			} => Some(distinct.saturating_sub(*limit)),
			_ => None,
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::PaletteOverflow {
				distinct,
				limit,
			} => write!(
				f,
				"palette cut from {distinct} to {limit} colors, {} colors remapped to nearest",
				distinct.saturating_sub(*limit)
			),
			Diagnostic::PixelCountMismatch {
				frame,
				expected,
				actual,
			} if actual < expected => write!(
				f,
				"frame {frame}: chunk holds {actual} of {expected} pixels, padded {} with index 0",
				expected - actual
			),
			Diagnostic::PixelCountMismatch {
				frame,
				expected,
				actual,
			} => write!(
				f,
				"frame {frame}: chunk holds {actual} pixels, truncated {} beyond {expected}",
				actual - expected
			),
			Diagnostic::IndicesClamped {
				frame,
				count,
			} => write!(f, "frame {frame}: {count} out-of-range palette indices folded into range"),
			Diagnostic::OffsetDropped {
				x,
				y,
			} => write!(f, "single-image files have no offset fields, dropped ({x}, {y})"),
			Diagnostic::PaddingSkipped {
				bytes,
			} => write!(f, "skipped {bytes} bytes of zero padding before the first chunk"),
		}
	}
}

/// Logs and collects diagnostics for one conversion.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
	collected: Vec<Diagnostic>,
}

impl DiagnosticSink {
	pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
		diagnostic.log();
		self.collected.push(diagnostic);
	}

	pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
		self.collected
	}
}
