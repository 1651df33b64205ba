//! `.SPT` file format support for `spt-rs` project.
//!
//! SPT is a palette-indexed, run-length compressed sprite format. A file holds
//! either one still image (type 2) or an animation sequence of equal-sized
//! frames sharing one (x, y) offset (type 6).
//!
//! # File Structure
//!
//! - **Header:** type tag, frame count, dimensions and, for sequences, the
//!   offset (see [`header`])
//! - **Palette:** 1 to 256 big-endian ARGB4444 entries (see [`palette`])
//! - **Chunks:** one per frame, a big-endian `u32` byte length followed by the
//!   run-length coded palette indices (see [`rle`])
//!
//! Colors lose their low nibble when stored. A channel value of 255 reads back
//! as 240.
//!
//! # Usage Examples
//!
//! ## Decoding a file
//!
//! ```no_run
//! use spt_types::file::spt::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spt = File::open("MAINLOGO.SPT")?;
//! println!("{}", spt.header());
//!
//! for bitmap in spt.bitmaps() {
//!     println!("{} bytes of RGBA", bitmap.pixels().len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Encoding an animation
//!
//! ```
//! use spt_types::file::spt::{Bitmap, Color, EncodeOptions, File, Offset, encode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let red = Color::new(240, 0, 0, 240);
//! let blue = Color::new(0, 0, 240, 240);
//! let frames = vec![
//!     Bitmap::from_colors(2, 1, &[red, blue])?,
//!     Bitmap::from_colors(2, 1, &[blue, red])?,
//! ];
//!
//! let options = EncodeOptions::default().with_offset(Offset::new(16, 8));
//! let encoded = encode(&frames, &options)?;
//!
//! let decoded = File::from_bytes(encoded.data())?;
//! assert_eq!(decoded.frame_count(), 2);
//! assert_eq!(decoded.offset(), Offset::new(16, 8));
//! assert_eq!(decoded.bitmaps().collect::<Vec<_>>(), frames);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::file::SptError;

mod bitmap;
mod diagnostic;
pub mod header;
pub mod palette;
pub mod rle;
pub mod sanitize;

/// Decoder for `.SPT` byte streams
pub mod decode;

/// Encoder from RGBA bitmaps
pub mod encode;

pub use bitmap::Bitmap;
pub use decode::decode;
pub use diagnostic::Diagnostic;
pub use encode::{EncodeOptions, Encoded, encode};
pub use header::{FormatKind, Header, Offset};
pub use palette::{Color, Palette};
pub use rle::RunMode;

/// SPT file constants.
pub mod constants {
	/// Type tag of single-image files
	pub const TYPE_SINGLE: u32 = 2;

	/// Type tag of multi-image files
	pub const TYPE_MULTI: u32 = 6;

	/// Fixed header size of single-image files, palette length byte included
	pub const SINGLE_PREFIX_SIZE: usize = 14;

	/// Fixed header size of multi-image files, palette length byte included
	pub const MULTI_PREFIX_SIZE: usize = 22;

	/// Size of one packed palette entry
	pub const PALETTE_ENTRY_SIZE: usize = 2;

	/// Largest palette the format can address
	pub const MAX_PALETTE_LEN: usize = 256;

	/// Size of the length prefix in front of each chunk
	pub const CHUNK_LENGTH_SIZE: usize = 4;

	/// Largest palette that uses inline runs
	pub const INLINE_PALETTE_MAX: usize = 16;

	/// Longest run that fits in an inline marker
	pub const MAX_INLINE_RUN: usize = 7;

	/// Longest run a single marker can describe (`127 + 128 * 127`)
	pub const MAX_RUN_LENGTH: usize = 16383;

	/// Largest `width * height` a decoded frame may declare (16384 x 16384)
	///
	/// Its RGBA8 buffer is 1 GiB, which stays addressable on 32-bit targets.
	pub const MAX_PIXELS: usize = 1 << 28;

	/// High bit set on run markers and long length bytes
	pub const RUN_FLAG: u8 = 0x80;

	/// Bits of a byte that carry an index or a short length
	pub const INDEX_MASK: u8 = 0x7F;
}

/// Palette indices of one frame, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	indices: Vec<u8>,
}

impl Frame {
	/// Creates a frame from palette indices.
	pub fn new(indices: Vec<u8>) -> Self {
		Self {
			indices,
		}
	}

	/// Returns the palette indices.
	pub fn indices(&self) -> &[u8] {
		&self.indices
	}

	/// Consumes the frame and returns its indices.
	pub fn into_indices(self) -> Vec<u8> {
		self.indices
	}

	/// Number of pixels.
	pub fn len(&self) -> usize {
		self.indices.len()
	}

	/// Returns `true` if the frame has no pixels.
	pub fn is_empty(&self) -> bool {
		self.indices.is_empty()
	}

	/// Looks every index up in `palette`, producing RGBA8 bytes.
	///
	/// Indices past the end of the palette wrap around.
	pub fn to_rgba(&self, palette: &Palette) -> Vec<u8> {
		let mut rgba = Vec::with_capacity(self.indices.len() * 4);
		for &index in &self.indices {
			rgba.extend_from_slice(&palette[usize::from(index) % palette.len()].to_rgba());
		}
		rgba
	}
}

/// A decoded `.SPT` file, or one about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	palette: Palette,
	frames: Vec<Frame>,
	diagnostics: Vec<Diagnostic>,
}

impl File {
	/// Assembles a file from palette-indexed frames.
	///
	/// # Errors
	///
	/// Returns an error if there are no frames, if a frame does not hold
	/// `width * height` indices, or if a single-image file gets more than one
	/// frame.
	pub fn new(
		kind: FormatKind,
		width: u32,
		height: u32,
		offset: Offset,
		palette: Palette,
		frames: Vec<Frame>,
	) -> Result<Self, SptError> {
		if frames.is_empty() {
			return Err(SptError::DegenerateInput("no frames"));
		}

		let frame_count = u32::try_from(frames.len()).map_err(|_| SptError::UnrepresentableField {
			field: "frame count",
			value: frames.len() as u64,
			max: u64::from(u32::MAX),
		})?;

		let header = Header::new(kind, frame_count, width, height, offset, palette.len());
		if frames.iter().any(|frame| frame.len() != header.pixel_count()) {
			return Err(SptError::DegenerateInput("frame index count differs from width * height"));
		}

		// surfaces unrepresentable header fields now rather than at write time
		header.to_bytes()?;

		Ok(Self::from_parts(header, palette, frames, Vec::new()))
	}

	pub(crate) fn from_parts(
		header: Header,
		palette: Palette,
		frames: Vec<Frame>,
		diagnostics: Vec<Diagnostic>,
	) -> Self {
		Self {
			header,
			palette,
			frames,
			diagnostics,
		}
	}

	/// Opens and decodes a `.SPT` file from the specified path
	pub fn open(path: impl AsRef<Path>) -> Result<Self, SptError> {
		let data = std::fs::read(path)?;
		decode(&data)
	}

	/// Decodes a `.SPT` file from a byte slice
	pub fn from_bytes(data: &[u8]) -> Result<Self, SptError> {
		decode(data)
	}

	/// Decodes a `.SPT` file from any reader
	///
	/// Chunk lengths sit between variable-sized blocks, so the whole stream is
	/// read into memory first.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, SptError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		decode(&data)
	}

	/// Returns the header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the structural variant.
	pub fn kind(&self) -> FormatKind {
		self.header.kind()
	}

	/// Returns the frame width in pixels.
	pub fn width(&self) -> u32 {
		self.header.width()
	}

	/// Returns the frame height in pixels.
	pub fn height(&self) -> u32 {
		self.header.height()
	}

	/// Returns the sequence offset.
	pub fn offset(&self) -> Offset {
		self.header.offset()
	}

	/// Returns the palette.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Returns every frame.
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Returns a frame by index.
	pub fn frame(&self, index: usize) -> Option<&Frame> {
		self.frames.get(index)
	}

	/// Returns the number of frames.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Returns the conditions reported while decoding. Empty for files built
	/// with [`File::new`].
	pub fn diagnostics(&self) -> &[Diagnostic] {
		&self.diagnostics
	}

	/// Resolves one frame to an RGBA bitmap.
	pub fn bitmap(&self, index: usize) -> Option<Bitmap> {
		let frame = self.frames.get(index)?;
		Bitmap::new(self.width(), self.height(), frame.to_rgba(&self.palette)).ok()
	}

	/// Iterates over all frames as RGBA bitmaps.
	pub fn bitmaps(&self) -> impl Iterator<Item = Bitmap> + '_ {
		(0..self.frames.len()).filter_map(|index| self.bitmap(index))
	}

	/// Serializes the file: header, packed palette, then one length-prefixed
	/// chunk per frame.
	pub fn to_bytes(&self) -> Result<Vec<u8>, SptError> {
		let mut data = self.header.to_bytes()?;
		data.extend_from_slice(&self.palette.to_packed_bytes());

		let mode = RunMode::for_palette_len(self.palette.len());
		for frame in &self.frames {
			let chunk = rle::encode(frame.indices(), mode);
			let length = u32::try_from(chunk.len()).map_err(|_| SptError::UnrepresentableField {
				field: "chunk length",
				value: chunk.len() as u64,
				max: u64::from(u32::MAX),
			})?;
			data.extend_from_slice(&length.to_be_bytes());
			data.extend_from_slice(&chunk);
		}

		Ok(data)
	}

	/// Writes the file to disk.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SptError> {
		std::fs::write(path, self.to_bytes()?)?;
		Ok(())
	}
}

impl fmt::Display for File {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"SPT File: {} {}x{}, {} frames, {} colors",
			self.kind(),
			self.width(),
			self.height(),
			self.frames.len(),
			self.palette.len()
		)
	}
}
