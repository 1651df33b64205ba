use spt_rs::prelude::*;

use crate::{cycling_frames, exact_colors};

fn sample() -> Vec<u8> {
	let frames = cycling_frames(16, 4, &exact_colors(4), 3);
	let options = EncodeOptions::default().with_offset(SptOffset::new(8, 8));
	encode(&frames, &options).unwrap().into_bytes()
}

#[test_log::test]
fn test_every_truncation_is_an_error() {
	let data = sample();
	for len in 0..data.len() {
		assert!(SptFile::from_bytes(&data[..len]).is_err(), "truncated to {len} bytes");
	}
	assert!(SptFile::from_bytes(&data).is_ok());
}

#[test_log::test]
fn test_unknown_type_tag() {
	let mut data = sample();
	data[0] = 7;
	assert!(matches!(
		SptFile::from_bytes(&data),
		Err(SptError::MalformedHeader(HeaderFault::UnknownType(7)))
	));
}

#[test_log::test]
fn test_trailing_frames_missing() {
	let mut data = sample();
	// claim one more frame than the file holds
	data[4..8].copy_from_slice(&4u32.to_le_bytes());
	assert!(matches!(
		SptFile::from_bytes(&data),
		Err(SptError::MalformedChunk {
			frame: 3,
			..
		})
	));
}

#[test_log::test]
fn test_wrong_dimensions_are_reconciled() {
	let mut data = sample();
	// widen each frame; every chunk now decodes short
	data[8..12].copy_from_slice(&20u32.to_le_bytes());
	let spt = SptFile::from_bytes(&data).unwrap();

	assert_eq!(spt.frame_count(), 3);
	assert!(spt.frames().iter().all(|frame| frame.len() == 80));
	let mismatches = spt
		.diagnostics()
		.iter()
		.filter(|d| {
			matches!(
				d,
				Diagnostic::PixelCountMismatch {
					expected: 80,
					actual: 64,
					..
				}
			)
		})
		.count();
	assert_eq!(mismatches, 3);
}
