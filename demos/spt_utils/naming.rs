//! File naming convention for unpacked sequences.
//!
//! A multi-frame file `NAME.SPT` with offset (x, y) unpacks to
//! `NAME[[x;y]]__frame0.png`, `NAME[[x;y]]__frame1.png`, ... and a single-frame
//! file to plain `NAME.png`. Packing reverses this: files sharing the part
//! before `__frame` form one sequence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use spt_rs::prelude::SptOffset;

const FRAME_MARKER: &str = "__frame";

/// PNG name for frame `index` of a decoded file.
pub fn frame_file_name(stem: &str, offset: Option<SptOffset>, index: usize) -> String {
	match offset {
		Some(offset) => format!("{stem}[[{};{}]]{FRAME_MARKER}{index}.png", offset.x, offset.y),
		None => format!("{stem}.png"),
	}
}

/// Images that pack into one SPT file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
	/// Output stem, offset tag removed
	pub name: String,
	/// Offset parsed from the `[[x;y]]` tag
	pub offset: Option<SptOffset>,
	/// Frame images in playback order
	pub files: Vec<PathBuf>,
}

/// Splits a base name like `logo[[12;4]]` into `("logo", Some((12, 4)))`.
///
/// A malformed tag is left in the name.
pub fn split_offset_tag(base: &str) -> (&str, Option<SptOffset>) {
	let parsed = base.split_once("[[").and_then(|(name, rest)| {
		let (x, y) = rest.split_once("]]")?.0.split_once(';')?;
		Some((name, SptOffset::new(x.trim().parse().ok()?, y.trim().parse().ok()?)))
	});

	match parsed {
		Some((name, offset)) => (name, Some(offset)),
		None => (base, None),
	}
}

/// Groups PNG paths into sequences.
///
/// Frames sort by their `__frame<n>` number; files without one form their own
/// single-frame group.
pub fn group_frames(paths: &[PathBuf]) -> Vec<Group> {
	let mut groups: BTreeMap<String, Vec<(usize, PathBuf)>> = BTreeMap::new();

	for path in paths {
		let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
			log::warn!("Skipping {}: file name is not UTF-8", path.display());
			continue;
		};

		let (base, number) = match stem.rsplit_once(FRAME_MARKER) {
			Some((base, number)) => (base, number.parse().unwrap_or(usize::MAX)),
			None => (stem, 0),
		};
		groups.entry(base.to_string()).or_default().push((number, path.clone()));
	}

	groups
		.into_iter()
		.map(|(base, mut frames)| {
			frames.sort();
			let (name, offset) = split_offset_tag(&base);
			Group {
				name: name.to_string(),
				offset,
				files: frames.into_iter().map(|(_, path)| path).collect(),
			}
		})
		.collect()
}

/// Output path for a group.
pub fn spt_path(dir: &Path, name: &str) -> PathBuf {
	dir.join(format!("{name}.spt"))
}
