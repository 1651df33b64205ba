//! SPT sprite CLI utility
//!
//! A command-line tool for converting between SPT sprites and PNG images.
//!
//! # Features
//!
//! - **decode**: Convert one SPT file, or a directory of them, to PNG images
//! - **encode**: Convert one PNG, or a directory of them, to SPT files
//! - **verify**: Check that a file survives a decode/encode round trip
//! - **info**: Display the header and palette of an SPT file
//!
//! # Naming
//!
//! Multi-frame files unpack to `NAME[[x;y]]__frame<i>.png`. Encoding a
//! directory groups files by the part before `__frame` and reads the sequence
//! offset back from the `[[x;y]]` tag.
//!
//! # Usage
//!
//! ```bash
//! # Decode a directory of sprites
//! cargo run --example spt_utils -- decode bin/spt -o bin/png
//!
//! # Encode them back, limiting the palette to 64 colors
//! cargo run --example spt_utils -- encode bin/png -o bin/spt_new -l 64
//!
//! # Verify a file
//! cargo run --example spt_utils -- verify bin/spt/MAINLOGO.SPT
//!
//! # Show file information as JSON
//! cargo run --example spt_utils -- info bin/spt/MAINLOGO.SPT --json
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use serde::Serialize;
use spt_rs::prelude::*;
use walkdir::WalkDir;

mod naming;

use naming::{Group, frame_file_name, group_frames, spt_path};

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Decode(args) => run_decode(args),
		Command::Encode(args) => run_encode(args),
		Command::Verify(args) => run_verify(args),
		Command::Info(args) => run_info(args),
	}
}

#[derive(Parser)]
#[command(name = "spt_utils")]
#[command(author = "spt-rs project")]
#[command(version)]
#[command(about = "SPT sprite utility - decode, encode, verify, and inspect SPT files", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Convert SPT files to PNG images
	Decode(DecodeArgs),
	/// Convert PNG images to SPT files
	Encode(EncodeArgs),
	/// Decode, re-encode and compare a single SPT file
	Verify(VerifyArgs),
	/// Display information about an SPT file
	Info(InfoArgs),
}

#[derive(Args)]
struct DecodeArgs {
	/// SPT file or directory containing SPT files
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output directory (defaults to the input's directory, or `<INPUT>_output` for directories)
	#[arg(short, long, value_name = "OUTPUT_DIR")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct EncodeArgs {
	/// PNG file or directory containing PNG files
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output directory (defaults to `<INPUT>_spt`)
	#[arg(short, long, value_name = "OUTPUT_DIR")]
	output: Option<PathBuf>,

	/// Maximum palette entries (1-256)
	#[arg(short = 'l', long, value_name = "COUNT", env = "SPT_PALETTE_LIMIT", default_value_t = 256)]
	palette_limit: usize,
}

#[derive(Args)]
struct VerifyArgs {
	/// SPT file to verify
	#[arg(value_name = "INPUT_SPT")]
	input: PathBuf,
}

#[derive(Args)]
struct InfoArgs {
	/// SPT file to inspect
	#[arg(value_name = "INPUT_SPT")]
	input: PathBuf,

	/// Print the report as JSON
	#[arg(long, default_value_t = false)]
	json: bool,
}

fn run_decode(args: DecodeArgs) -> Result<()> {
	let (files, output) = if args.input.is_dir() {
		let output = args.output.unwrap_or_else(|| suffixed(&args.input, "_output"));
		(collect_files(&args.input, "spt")?, output)
	} else {
		let output = args.output.unwrap_or_else(|| {
			args.input.parent().map(Path::to_path_buf).unwrap_or_default()
		});
		(vec![args.input], output)
	};

	if files.is_empty() {
		println!("No .spt files found");
		return Ok(());
	}

	fs::create_dir_all(&output)
		.with_context(|| format!("Failed to create {}", output.display()))?;

	let mut failures = 0usize;
	for path in &files {
		match decode_one(path, &output) {
			Ok(written) => println!("✓ {} -> {} image(s)", path.display(), written),
			Err(err) => {
				failures += 1;
				log::error!("{}: {:#}", path.display(), err);
			}
		}
	}

	println!("Decoded {} of {} file(s) into {}", files.len() - failures, files.len(), output.display());
	if failures > 0 {
		bail!("{failures} file(s) failed to decode");
	}
	Ok(())
}

fn decode_one(path: &Path, output: &Path) -> Result<usize> {
	let spt = SptFile::open(path).with_context(|| format!("Failed to decode {}", path.display()))?;
	let stem = file_stem(path)?;

	let offset = match spt.kind() {
		FormatKind::Single => None,
		FormatKind::Multi => Some(spt.offset()),
	};

	let mut written = 0;
	for (index, bitmap) in spt.bitmaps().enumerate() {
		let target = output.join(frame_file_name(stem, offset, index));
		save_png(&target, bitmap)?;
		written += 1;
	}

	Ok(written)
}

fn run_encode(args: EncodeArgs) -> Result<()> {
	let output = args.output.clone().unwrap_or_else(|| suffixed(&args.input, "_spt"));
	let groups = if args.input.is_dir() {
		group_frames(&collect_files(&args.input, "png")?)
	} else {
		let name = file_stem(&args.input)?.to_string();
		vec![Group {
			name,
			offset: None,
			files: vec![args.input.clone()],
		}]
	};

	if groups.is_empty() {
		println!("No PNG files found in {}", args.input.display());
		return Ok(());
	}

	fs::create_dir_all(&output)
		.with_context(|| format!("Failed to create {}", output.display()))?;

	let mut failures = 0usize;
	for group in &groups {
		let target = spt_path(&output, &group.name);
		match encode_group(group, &target, args.palette_limit) {
			Ok(encoded) => println!(
				"✓ Created {} with {} image(s), {} colors",
				target.display(),
				group.files.len(),
				encoded.palette().len()
			),
			Err(err) => {
				failures += 1;
				log::error!("{}: {:#}", target.display(), err);
			}
		}
	}

	if failures > 0 {
		bail!("{failures} group(s) failed to encode");
	}
	Ok(())
}

fn encode_group(group: &Group, target: &Path, palette_limit: usize) -> Result<Encoded> {
	let frames = group.files.iter().map(|path| load_png(path)).collect::<Result<Vec<_>>>()?;

	let mut options = EncodeOptions::default().with_palette_limit(palette_limit);
	if let Some(offset) = group.offset {
		options = options.with_offset(offset);
	}

	let encoded = encode(&frames, &options)?;
	fs::write(target, encoded.data()).with_context(|| format!("Failed to write {}", target.display()))?;
	Ok(encoded)
}

fn run_verify(args: VerifyArgs) -> Result<()> {
	let original = fs::read(&args.input)
		.with_context(|| format!("Failed to read {}", args.input.display()))?;
	let spt = SptFile::from_bytes(&original)
		.with_context(|| format!("Failed to decode {}", args.input.display()))?;

	println!("📖 {}", spt);

	let reserialized = spt.to_bytes()?;
	let bytes_match = reserialized == original;
	println!(
		"   {} Re-serialized bytes {} ({} vs {} bytes)",
		if bytes_match { "✓" } else { "✗" },
		if bytes_match { "match" } else { "differ" },
		reserialized.len(),
		original.len()
	);

	let frames: Vec<Bitmap> = spt.bitmaps().collect();
	let options = EncodeOptions::default().with_offset(spt.offset());
	let encoded = encode(&frames, &options)?;
	let roundtrip = SptFile::from_bytes(encoded.data())?;

	let mismatched = frames
		.iter()
		.zip(roundtrip.bitmaps())
		.filter(|(expected, actual)| *expected != actual)
		.count();
	let pixels_match = mismatched == 0 && roundtrip.frame_count() == frames.len();
	println!(
		"   {} Re-encoded pixels {} ({} of {} frames differ)",
		if pixels_match { "✓" } else { "✗" },
		if pixels_match { "match" } else { "differ" },
		mismatched,
		frames.len()
	);

	if !pixels_match {
		bail!("Round trip changed the decoded pixels");
	}
	if !bytes_match {
		log::warn!("File is not in canonical encoding; pixels still round trip");
	}
	println!("✅ Verification passed");
	Ok(())
}

/// JSON report for `info --json`
#[derive(Serialize)]
struct InfoReport<'a> {
	file: String,
	size: usize,
	header: &'a SptHeader,
	/// Packed ARGB4444 entries, hex encoded
	palette: Vec<String>,
	diagnostics: Vec<String>,
}

fn run_info(args: InfoArgs) -> Result<()> {
	let data = fs::read(&args.input).with_context(|| format!("Failed to read {}", args.input.display()))?;
	let spt = SptFile::from_bytes(&data)
		.with_context(|| format!("Failed to decode {}", args.input.display()))?;

	let palette: Vec<String> =
		spt.palette().iter().map(|color| hex::encode(color.pack_argb4444().to_be_bytes())).collect();

	if args.json {
		let report = InfoReport {
			file: args.input.display().to_string(),
			size: data.len(),
			header: spt.header(),
			palette,
			diagnostics: spt.diagnostics().iter().map(ToString::to_string).collect(),
		};
		println!("{}", serde_json::to_string_pretty(&report)?);
		return Ok(());
	}

	println!("File: {} ({} bytes)", args.input.display(), data.len());
	println!("{}", spt.header());
	for (row, entries) in palette.chunks(8).enumerate() {
		println!("  [{:3}] {}", row * 8, entries.join(" "));
	}
	for diagnostic in spt.diagnostics() {
		println!("  ⚠ {diagnostic}");
	}
	Ok(())
}

fn load_png(path: &Path) -> Result<Bitmap> {
	let image = image::open(path)
		.with_context(|| format!("Failed to open {}", path.display()))?
		.to_rgba8();
	let (width, height) = image.dimensions();
	Ok(Bitmap::new(width, height, image.into_raw())?)
}

fn save_png(path: &Path, bitmap: Bitmap) -> Result<()> {
	let (width, height) = bitmap.dimensions();
	let Some(image) = RgbaImage::from_raw(width, height, bitmap.into_pixels()) else {
		bail!("Bitmap buffer does not match {}x{}", width, height);
	};
	image.save(path).with_context(|| format!("Failed to write {}", path.display()))?;
	Ok(())
}

fn collect_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in WalkDir::new(root).max_depth(1).follow_links(false) {
		let entry = entry.with_context(|| format!("Failed to scan {}", root.display()))?;
		let matches = entry
			.path()
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
		if entry.file_type().is_file() && matches {
			files.push(entry.into_path());
		}
	}

	files.sort();
	Ok(files)
}

fn file_stem(path: &Path) -> Result<&str> {
	path.file_stem()
		.and_then(|stem| stem.to_str())
		.with_context(|| format!("{} has no usable file name", path.display()))
}

fn suffixed(path: &Path, suffix: &str) -> PathBuf {
	let mut name = path.as_os_str().to_os_string();
	name.push(suffix);
	PathBuf::from(name)
}
