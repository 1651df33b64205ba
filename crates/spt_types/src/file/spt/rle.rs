//! Run-length coding of palette index streams.
//!
//! Each frame is coded independently. A byte below `0x80` is always a single
//! literal pixel. A byte with the high bit set starts a run, in one of two
//! grammars:
//!
//! | Form     | Bytes                         | Run length               |
//! |----------|-------------------------------|--------------------------|
//! | inline   | `1rrr iiii`                   | `rrr` (1..=7)            |
//! | short    | `1iii iiii`, `0LLL LLLL`      | `L` (0..=127)            |
//! | long     | `1iii iiii`, `1LLL LLLL`, `H` | `L + 128 * H`            |
//!
//! The inline form only exists when the palette has at most 16 entries. In that
//! mode a marker whose `rrr` bits are zero falls through to the short/long
//! forms, which is how small palettes write runs longer than 7.
//!
//! Indices are limited to 7 bits on the wire. A lone pixel or a run of an
//! index at or above 128 loses its top bit.

use std::iter::repeat_n;

use thiserror::Error;

use super::{constants, sanitize::IndexSanitizer};

/// Run grammar in effect for a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
	/// Palettes of up to 16 colors: runs of 2..=7 pack into the marker byte
	Inline,

	/// Every run carries one or two length bytes
	Extended,
}

impl RunMode {
	/// Selects the grammar from the palette length.
	pub fn for_palette_len(palette_len: usize) -> Self {
		if palette_len <= constants::INLINE_PALETTE_MAX {
			Self::Inline
		} else {
			Self::Extended
		}
	}
}

/// A run's length bytes lie past the end of the chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("run length byte expected at chunk offset {offset}")]
pub struct RunOverrun {
	/// Offset within the chunk where a length byte was expected
	pub offset: usize,
}

/// Encodes a stream of palette indices.
pub fn encode(indices: &[u8], mode: RunMode) -> Vec<u8> {
	let mut out = Vec::with_capacity(indices.len() / 2 + 1);
	let mut position = 0;

	while position < indices.len() {
		let value = indices[position];
		let run = indices[position..]
			.iter()
			.take(constants::MAX_RUN_LENGTH)
			.take_while(|&&v| v == value)
			.count();

		push_run(&mut out, value, run, mode);
		position += run;
	}

	out
}

fn push_run(out: &mut Vec<u8>, value: u8, run: usize, mode: RunMode) {
	match run {
		1 => out.push(value & constants::INDEX_MASK),
		2..=constants::MAX_INLINE_RUN if mode == RunMode::Inline => {
			out.push(constants::RUN_FLAG | ((run as u8) << 4) | (value & 0x0F));
		}
		_ => {
			out.push(constants::RUN_FLAG | (value & constants::INDEX_MASK));
			if run <= usize::from(constants::INDEX_MASK) {
				out.push(run as u8);
			} else {
				out.push((run % 128) as u8 | constants::RUN_FLAG);
				out.push((run / 128) as u8);
			}
		}
	}
}

/// Indices decoded from one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runs {
	/// Decoded indices, never more than the limit passed to [`decode`]
	pub indices: Vec<u8>,

	/// Pixels the chunk describes, including those past the limit
	pub pixels: usize,
}

/// Decodes one chunk into at most `limit` palette indices.
///
/// Run markers go through `sanitizer`'s marker fold; literal pixels are left
/// for the resolution step. Pixels past `limit` are counted but not stored, so
/// a short chunk cannot claim more memory than its frame needs.
pub fn decode(
	chunk: &[u8],
	mode: RunMode,
	sanitizer: &mut IndexSanitizer,
	limit: usize,
) -> Result<Runs, RunOverrun> {
	let mut out = Vec::with_capacity(chunk.len().saturating_mul(2).min(limit));
	let mut pixels = 0usize;
	let mut position = 0;

	while position < chunk.len() {
		let byte = chunk[position];
		position += 1;

		if byte & constants::RUN_FLAG == 0 {
			if out.len() < limit {
				out.push(byte);
			}
			pixels = pixels.saturating_add(1);
			continue;
		}

		if mode == RunMode::Inline {
			let run = usize::from((byte >> 4) & 0x07);
			if run != 0 {
				let emit = run.min(limit - out.len());
				out.extend(repeat_n(byte & 0x0F, emit));
				pixels = pixels.saturating_add(run);
				continue;
			}
		}

		let low = next_byte(chunk, &mut position)?;
		let run = if low & constants::RUN_FLAG == 0 {
			usize::from(low)
		} else {
			let high = next_byte(chunk, &mut position)?;
			usize::from(low & constants::INDEX_MASK) + 128 * usize::from(high)
		};

		let emit = run.min(limit - out.len());
		let index = sanitizer.fold_marker(byte, emit);
		out.extend(repeat_n(index, emit));
		pixels = pixels.saturating_add(run);
	}

	Ok(Runs {
		indices: out,
		pixels,
	})
}

#[inline]
fn next_byte(chunk: &[u8], position: &mut usize) -> Result<u8, RunOverrun> {
	let byte = *chunk.get(*position).ok_or(RunOverrun {
		offset: *position,
	})?;
	*position += 1;
	Ok(byte)
}
