//! SPT encoding.
//!
//! ## Algorithm
//!
//! 1. Check that every input bitmap has the same, nonzero dimensions
//! 2. Rank every distinct RGBA color by how many pixels use it (ties keep
//!    first-seen order) and keep the top `palette_limit` as the palette
//! 3. Map each pixel to its exact palette entry, or to the nearest one by
//!    summed squared RGBA difference when its color was cut
//! 4. Pick the single-image layout for one frame, the multi-image layout
//!    otherwise
//! 5. Run-length encode each frame and assemble header, palette and chunks
//!
//! Losing colors in step 2 or dropping an offset in step 4 is reported as a
//! [`Diagnostic`], not an error.

use std::collections::HashMap;

use crate::file::SptError;

use super::{
	Bitmap, Color, Diagnostic, File, FormatKind, Frame, Offset, Palette, constants,
	diagnostic::DiagnosticSink,
};

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
	/// Maximum palette entries (1..=256)
	pub palette_limit: usize,

	/// Sequence offset, only written for multi-frame files
	pub offset: Offset,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self {
			palette_limit: constants::MAX_PALETTE_LEN,
			offset: Offset::default(),
		}
	}
}

impl EncodeOptions {
	/// Creates the default options: 256 colors, zero offset.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the palette limit.
	pub fn with_palette_limit(mut self, palette_limit: usize) -> Self {
		self.palette_limit = palette_limit;
		self
	}

	/// Sets the sequence offset.
	pub fn with_offset(mut self, offset: Offset) -> Self {
		self.offset = offset;
		self
	}
}

/// Result of a successful encode.
#[derive(Debug, Clone)]
pub struct Encoded {
	data: Vec<u8>,
	palette: Palette,
	diagnostics: Vec<Diagnostic>,
}

impl Encoded {
	/// Returns the SPT file bytes.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes the result and returns the SPT file bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.data
	}

	/// Returns the palette before ARGB4444 packing.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Returns the non-fatal conditions met while encoding.
	pub fn diagnostics(&self) -> &[Diagnostic] {
		&self.diagnostics
	}
}

/// Encodes one or more equal-sized bitmaps into an SPT file.
pub fn encode(frames: &[Bitmap], options: &EncodeOptions) -> Result<Encoded, SptError> {
	let (width, height) = validate(frames, options)?;

	let mut sink = DiagnosticSink::default();

	let ranked = rank_colors(frames);
	if ranked.len() > options.palette_limit {
		sink.push(Diagnostic::PaletteOverflow {
			distinct: ranked.len(),
			limit: options.palette_limit,
		});
	}
	let palette =
		Palette::new(ranked.into_iter().take(options.palette_limit).map(|(color, _)| color).collect())?;

	let mut quantizer = Quantizer::new(&palette);
	let indexed = frames.iter().map(|bitmap| Frame::new(quantizer.quantize(bitmap))).collect();

	let kind = FormatKind::for_frame_count(frames.len());
	let offset = if kind == FormatKind::Single && !options.offset.is_zero() {
		sink.push(Diagnostic::OffsetDropped {
			x: options.offset.x,
			y: options.offset.y,
		});
		Offset::default()
	} else {
		options.offset
	};

	let file = File::new(kind, width, height, offset, palette.clone(), indexed)?;
	let data = file.to_bytes()?;

	Ok(Encoded {
		data,
		palette,
		diagnostics: sink.into_vec(),
	})
}

fn validate(frames: &[Bitmap], options: &EncodeOptions) -> Result<(u32, u32), SptError> {
	if options.palette_limit > constants::MAX_PALETTE_LEN {
		return Err(SptError::PaletteTooLarge {
			limit: options.palette_limit,
		});
	}
	if options.palette_limit == 0 {
		return Err(SptError::DegenerateInput("palette limit is zero"));
	}

	let Some(first) = frames.first() else {
		return Err(SptError::DegenerateInput("no frames to encode"));
	};

	let expected = first.dimensions();
	if expected.0 == 0 || expected.1 == 0 {
		return Err(SptError::DegenerateInput("frame has zero width or height"));
	}

	if let Some((frame, bitmap)) =
		frames.iter().enumerate().find(|(_, bitmap)| bitmap.dimensions() != expected)
	{
		return Err(SptError::DimensionMismatch {
			frame,
			expected,
			actual: bitmap.dimensions(),
		});
	}

	Ok(expected)
}

/// Counts every distinct color across `frames`.
///
/// The result is sorted by descending pixel count; colors with equal counts
/// keep the order in which they first appear.
pub fn rank_colors(frames: &[Bitmap]) -> Vec<(Color, usize)> {
	let mut counts: HashMap<Color, (usize, usize)> = HashMap::new();
	for color in frames.iter().flat_map(Bitmap::colors) {
		let first_seen = counts.len();
		counts.entry(color).or_insert((0, first_seen)).0 += 1;
	}

	let mut ranked: Vec<_> = counts.into_iter().collect();
	ranked.sort_unstable_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
		count_b.cmp(count_a).then(seen_a.cmp(seen_b))
	});

	ranked.into_iter().map(|(color, (count, _))| (color, count)).collect()
}

/// Maps colors to palette indices, remembering every answer.
struct Quantizer<'a> {
	palette: &'a Palette,
	lookup: HashMap<Color, u8>,
}

impl<'a> Quantizer<'a> {
	fn new(palette: &'a Palette) -> Self {
		let mut lookup = HashMap::with_capacity(palette.len());
		for (index, color) in palette.iter().enumerate() {
			lookup.entry(*color).or_insert(index as u8);
		}

		Self {
			palette,
			lookup,
		}
	}

	fn quantize(&mut self, bitmap: &Bitmap) -> Vec<u8> {
		bitmap.colors().map(|color| self.index_of(color)).collect()
	}

	fn index_of(&mut self, color: Color) -> u8 {
		if let Some(&index) = self.lookup.get(&color) {
			return index;
		}

		let index = self.nearest(&color);
		self.lookup.insert(color, index);
		index
	}

	/// Linear scan; the lowest index wins a tie.
	fn nearest(&self, color: &Color) -> u8 {
		let mut best_index = 0;
		let mut best_distance = u32::MAX;

		for (index, candidate) in self.palette.iter().enumerate() {
			let distance = candidate.distance_squared(color);
			if distance < best_distance {
				best_distance = distance;
				best_index = index;
			}
		}

		best_index as u8
	}
}
