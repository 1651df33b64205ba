use spt_rs::prelude::*;

use crate::{cycling_frames, exact_colors};

#[test_log::test]
fn test_exact_colors_roundtrip() {
	// indices at or above 128 lose their top bit on the wire
	for palette_len in [1, 2, 16, 17, 128] {
		let frames = cycling_frames(40, 10, &exact_colors(palette_len), 1);
		let encoded = encode(&frames, &EncodeOptions::default()).unwrap();
		assert!(encoded.diagnostics().is_empty());

		let spt = SptFile::from_bytes(encoded.data()).unwrap();
		assert_eq!(spt.palette().len(), palette_len);
		assert_eq!(spt.bitmaps().collect::<Vec<_>>(), frames, "palette length {palette_len}");
	}
}

#[test_log::test]
fn test_animation_roundtrip() {
	let frames = cycling_frames(64, 48, &exact_colors(40), 6);
	let options = EncodeOptions::default().with_offset(SptOffset::new(1024, 255));
	let encoded = encode(&frames, &options).unwrap();

	let spt = SptFile::from_bytes(encoded.data()).unwrap();
	assert_eq!(spt.kind(), FormatKind::Multi);
	assert_eq!(spt.offset(), SptOffset::new(1024, 255));
	assert_eq!(spt.frame_count(), 6);
	assert_eq!(spt.bitmaps().collect::<Vec<_>>(), frames);

	// the decoded file is already in canonical form
	assert_eq!(spt.to_bytes().unwrap(), encoded.data());
}

#[test_log::test]
fn test_two_by_two_end_to_end() {
	let red = SptColor::new(255, 0, 0, 255);
	let green = SptColor::new(0, 255, 0, 255);
	let bitmap = Bitmap::from_colors(2, 2, &[red, red, red, green]).unwrap();

	let encoded = encode(&[bitmap], &EncodeOptions::default()).unwrap();
	let spt = SptFile::from_bytes(encoded.data()).unwrap();

	assert_eq!(
		spt.palette().colors(),
		&[SptColor::new(240, 0, 0, 240), SptColor::new(0, 240, 0, 240)]
	);
	assert_eq!(spt.frames()[0].indices(), &[0, 0, 0, 1]);
	assert!(encoded.data().ends_with(&[0, 0, 0, 2, 0xB0, 0x01]));
}

#[test_log::test]
fn test_palette_limit_reduces_colors() {
	let frames = cycling_frames(30, 10, &exact_colors(50), 2);
	let options = EncodeOptions::default().with_palette_limit(8);
	let encoded = encode(&frames, &options).unwrap();

	assert_eq!(encoded.palette().len(), 8);
	assert!(matches!(
		encoded.diagnostics(),
		[Diagnostic::PaletteOverflow {
			distinct: 50,
			limit: 8
		}]
	));

	let spt = SptFile::from_bytes(encoded.data()).unwrap();
	for bitmap in spt.bitmaps() {
		assert!(bitmap.colors().all(|color| encoded.palette().colors().contains(&color)));
	}
}

#[test_log::test]
fn test_save_and_open() {
	let dir = std::env::temp_dir().join(format!("spt-rs-{}", std::process::id()));
	std::fs::create_dir_all(&dir).unwrap();
	let path = dir.join("SAVE_OPEN.SPT");

	let frames = cycling_frames(5, 5, &exact_colors(3), 2);
	let encoded = encode(&frames, &EncodeOptions::default()).unwrap();
	let spt = SptFile::from_bytes(encoded.data()).unwrap();
	spt.save(&path).unwrap();

	let reopened = SptFile::open(&path).unwrap();
	assert_eq!(reopened, spt);

	std::fs::remove_dir_all(&dir).unwrap();
}
