//! SPT decoding.
//!
//! ## Steps
//!
//! 1. Parse the header and palette table
//! 2. Skip zero padding between the palette and the first chunk
//! 3. For each declared frame, read a big-endian `u32` chunk length and
//!    run-length decode that many bytes
//! 4. Pad (index 0) or truncate each index stream to `width * height`
//! 5. Fold every index into the palette
//!
//! Steps 2, 4 and 5 never fail; they are reported as [`Diagnostic`]s.

use crate::file::SptError;

use super::{
	Diagnostic, File, Frame, Header, Palette, constants,
	diagnostic::DiagnosticSink,
	rle::{self, RunMode},
	sanitize::IndexSanitizer,
};

/// Decodes a complete SPT file.
pub fn decode(data: &[u8]) -> Result<File, SptError> {
	let header = Header::from_bytes(data)?;
	let palette = Palette::from_packed_bytes(&data[header.palette_offset()..], header.palette_len())?;

	let mut sink = DiagnosticSink::default();

	let mut cursor = skip_zero_padding(data, header.data_offset());
	if cursor > header.data_offset() {
		sink.push(Diagnostic::PaddingSkipped {
			bytes: cursor - header.data_offset(),
		});
	}

	let mode = RunMode::for_palette_len(palette.len());
	let mut sanitizer = IndexSanitizer::new(palette.len());
	let expected = header.pixel_count();

	let frame_count = header.frame_count() as usize;
	let max_frames = (data.len() - cursor) / constants::CHUNK_LENGTH_SIZE;
	let mut frames = Vec::with_capacity(frame_count.min(max_frames));

	for frame in 0..frame_count {
		let (chunk, next) = read_chunk(data, cursor, frame)?;
		let chunk_start = cursor + constants::CHUNK_LENGTH_SIZE;

		let runs = rle::decode(chunk, mode, &mut sanitizer, expected).map_err(|overrun| {
			SptError::MalformedChunk {
				frame,
				offset: chunk_start + overrun.offset,
				reason: "run length bytes overrun the chunk",
			}
		})?;

		let mut indices = runs.indices;
		if let Some(diagnostic) = reconcile(&mut indices, runs.pixels, expected, frame)? {
			sink.push(diagnostic);
		}

		for index in &mut indices {
			// resolve() is below palette.len() <= 256
			*index = sanitizer.resolve(*index) as u8;
		}

		let clamped = sanitizer.take_clamped();
		if clamped > 0 {
			sink.push(Diagnostic::IndicesClamped {
				frame,
				count: clamped,
			});
		}

		frames.push(Frame::new(indices));
		cursor = next;
	}

	Ok(File::from_parts(header, palette, frames, sink.into_vec()))
}

/// Advances `at` past every all-zero dword.
///
/// Multi-image files may carry zero dwords between the palette table and the
/// first chunk length. Skipping stops at the first dword with any nonzero byte,
/// or when fewer than four bytes remain.
pub fn skip_zero_padding(data: &[u8], mut at: usize) -> usize {
	while data.get(at..at + constants::CHUNK_LENGTH_SIZE) == Some(&[0u8; 4][..]) {
		at += constants::CHUNK_LENGTH_SIZE;
	}
	at
}

/// Forces `indices` to exactly `expected` entries.
///
/// Short streams are padded with index 0 and long streams are truncated.
/// `described` is the pixel count the chunk encoded, which can exceed
/// `indices.len()` when decoding stopped early. Returns a diagnostic when it
/// differs from `expected`.
///
/// # Errors
///
/// Returns [`SptError::AllocationFailed`] if the padding cannot be reserved.
pub fn reconcile(
	indices: &mut Vec<u8>,
	described: usize,
	expected: usize,
	frame: usize,
) -> Result<Option<Diagnostic>, SptError> {
	if indices.len() > expected {
		indices.truncate(expected);
	} else if indices.len() < expected {
		indices.try_reserve_exact(expected - indices.len()).map_err(|source| {
			SptError::AllocationFailed {
				frame,
				pixels: expected,
				source,
			}
		})?;
		indices.resize(expected, 0);
	}

	if described == expected {
		return Ok(None);
	}

	Ok(Some(Diagnostic::PixelCountMismatch {
		frame,
		expected,
		actual: described,
	}))
}

/// Reads the chunk at `at`, returning its bytes and the offset after it.
fn read_chunk(data: &[u8], at: usize, frame: usize) -> Result<(&[u8], usize), SptError> {
	let start = at + constants::CHUNK_LENGTH_SIZE;
	let Some(prefix) = data.get(at..start) else {
		return Err(SptError::MalformedChunk {
			frame,
			offset: at,
			reason: "missing chunk length",
		});
	};

	let length = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
	let end = start.saturating_add(length);
	if end > data.len() {
		return Err(SptError::MalformedChunk {
			frame,
			offset: start,
			reason: "chunk extends past the end of the data",
		});
	}

	Ok((&data[start..end], end))
}
