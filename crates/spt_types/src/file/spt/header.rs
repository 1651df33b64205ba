//! SPT header layout.
//!
//! Both variants share the first three little-endian dwords (type tag, frame
//! count, width). After that the layouts diverge:
//!
//! | Offset | Single (type 2)      | Multi (type 6)       |
//! |--------|----------------------|----------------------|
//! | 0x00   | type tag (u32)       | type tag (u32)       |
//! | 0x04   | frame count (u32)    | frame count (u32)    |
//! | 0x08   | width (u32)          | width (u32)          |
//! | 0x0C   | height (u8)          | height (u32)         |
//! | 0x0D   | palette length (u8)  |                      |
//! | 0x10   |                      | x offset (u32)       |
//! | 0x14   |                      | y offset (u8)        |
//! | 0x15   |                      | palette length (u8)  |
//!
//! The palette table starts right after the palette length byte.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::{HeaderFault, SptError};

use super::constants;

/// Structural variant of an SPT file, selected by the type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum FormatKind {
	/// One still image, no sequence offset
	Single = constants::TYPE_SINGLE,

	/// Animation sequence with a shared (x, y) offset
	Multi = constants::TYPE_MULTI,
}

impl FormatKind {
	/// Picks the variant for a given number of frames.
	pub fn for_frame_count(count: usize) -> Self {
		if count == 1 {
			Self::Single
		} else {
			Self::Multi
		}
	}

	/// Maps a raw type tag to a variant.
	pub fn from_tag(tag: u32) -> Option<Self> {
		match tag {
			constants::TYPE_SINGLE => Some(Self::Single),
			constants::TYPE_MULTI => Some(Self::Multi),
			_ => None,
		}
	}

	/// Returns the raw type tag.
	pub fn tag(self) -> u32 {
		self as u32
	}

	/// Size of the fixed header prefix, palette length byte included.
	pub fn prefix_size(self) -> usize {
		match self {
			Self::Single => constants::SINGLE_PREFIX_SIZE,
			Self::Multi => constants::MULTI_PREFIX_SIZE,
		}
	}
}

impl fmt::Display for FormatKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FormatKind::Single => write!(f, "Single"),
			FormatKind::Multi => write!(f, "Multi"),
		}
	}
}

/// Sequence offset of a multi-frame file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
	/// Horizontal offset
	pub x: u32,
	/// Vertical offset
	pub y: u32,
}

impl Offset {
	/// Creates a new offset.
	pub const fn new(x: u32, y: u32) -> Self {
		Self {
			x,
			y,
		}
	}

	/// Returns `true` when both components are zero.
	pub fn is_zero(&self) -> bool {
		self.x == 0 && self.y == 0
	}
}

impl fmt::Display for Offset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// Header structure for `.SPT` files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
	kind: FormatKind,
	frame_count: u32,
	width: u32,
	height: u32,
	offset: Offset,
	palette_len: usize,
}

impl Header {
	/// Creates a header. Field ranges are checked when the header is written.
	pub fn new(
		kind: FormatKind,
		frame_count: u32,
		width: u32,
		height: u32,
		offset: Offset,
		palette_len: usize,
	) -> Self {
		Self {
			kind,
			frame_count,
			width,
			height,
			offset,
			palette_len,
		}
	}

	/// Returns the structural variant.
	pub fn kind(&self) -> FormatKind {
		self.kind
	}

	/// Returns the declared number of frames.
	pub fn frame_count(&self) -> u32 {
		self.frame_count
	}

	/// Returns the image width in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the image height in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the sequence offset. Always zero for single-frame files.
	pub fn offset(&self) -> Offset {
		self.offset
	}

	/// Returns the number of palette entries (1..=256).
	pub fn palette_len(&self) -> usize {
		self.palette_len
	}

	/// Number of pixels in each frame.
	pub fn pixel_count(&self) -> usize {
		(self.width as usize).saturating_mul(self.height as usize)
	}

	/// Offset of the first palette entry.
	pub fn palette_offset(&self) -> usize {
		self.kind.prefix_size()
	}

	/// Offset right after the palette table, where chunk data begins.
	pub fn data_offset(&self) -> usize {
		self.palette_offset() + self.palette_len * constants::PALETTE_ENTRY_SIZE
	}

	/// Parses a header from the start of `data`.
	///
	/// The palette table is not decoded here, but its presence is checked so
	/// that [`Header::data_offset`] is always within `data`.
	pub fn from_bytes(data: &[u8]) -> Result<Self, SptError> {
		if data.len() < 4 {
			return Err(SptError::insufficient_data(constants::SINGLE_PREFIX_SIZE, data.len()));
		}

		let tag = read_u32_le(data, 0);
		let kind = FormatKind::from_tag(tag).ok_or(HeaderFault::UnknownType(tag))?;

		let prefix = kind.prefix_size();
		if data.len() < prefix {
			return Err(SptError::insufficient_data(prefix, data.len()));
		}

		let frame_count = read_u32_le(data, 4);
		if frame_count == 0 {
			return Err(HeaderFault::ZeroFrameCount.into());
		}

		let width = read_u32_le(data, 8);
		let (height, offset) = match kind {
			FormatKind::Single => (u32::from(data[12]), Offset::default()),
			FormatKind::Multi => {
				(read_u32_le(data, 12), Offset::new(read_u32_le(data, 16), u32::from(data[20])))
			}
		};

		let pixels = (width as usize).checked_mul(height as usize);
		if pixels.is_none_or(|pixels| pixels > constants::MAX_PIXELS) {
			return Err(HeaderFault::PixelCountOverflow {
				width,
				height,
			}
			.into());
		}

		let palette_len = match data[prefix - 1] {
			0 => constants::MAX_PALETTE_LEN,
			n => usize::from(n),
		};

		let header = Self {
			kind,
			frame_count,
			width,
			height,
			offset,
			palette_len,
		};

		if data.len() < header.data_offset() {
			return Err(SptError::insufficient_data(header.data_offset(), data.len()));
		}

		Ok(header)
	}

	/// Serializes the header, palette length byte included.
	pub fn to_bytes(&self) -> Result<Vec<u8>, SptError> {
		if self.palette_len == 0 || self.palette_len > constants::MAX_PALETTE_LEN {
			return Err(SptError::UnrepresentableField {
				field: "palette length",
				value: self.palette_len as u64,
				max: constants::MAX_PALETTE_LEN as u64,
			});
		}

		let mut bytes = Vec::with_capacity(self.kind.prefix_size());
		bytes.extend_from_slice(&self.kind.tag().to_le_bytes());
		bytes.extend_from_slice(&self.frame_count.to_le_bytes());
		bytes.extend_from_slice(&self.width.to_le_bytes());

		match self.kind {
			FormatKind::Single => {
				if self.frame_count != 1 {
					return Err(SptError::UnrepresentableField {
						field: "single-image frame count",
						value: u64::from(self.frame_count),
						max: 1,
					});
				}
				bytes.push(narrow_u8("single-image height", self.height)?);
			}
			FormatKind::Multi => {
				bytes.extend_from_slice(&self.height.to_le_bytes());
				bytes.extend_from_slice(&self.offset.x.to_le_bytes());
				bytes.push(narrow_u8("y offset", self.offset.y)?);
			}
		}

		// 256 wraps to 0
		bytes.push(self.palette_len as u8);

		Ok(bytes)
	}
}

impl fmt::Display for Header {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			".SPT File Header:\n\
			- Type: {} ({})\n\
			- Frames: {}\n\
			- Width: {} pixels\n\
			- Height: {} pixels\n\
			- Offset: {}\n\
			- Palette: {} colors",
			self.kind,
			self.kind.tag(),
			self.frame_count,
			self.width,
			self.height,
			self.offset,
			self.palette_len,
		)
	}
}

#[inline]
fn read_u32_le(data: &[u8], at: usize) -> u32 {
	u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn narrow_u8(field: &'static str, value: u32) -> Result<u8, SptError> {
	u8::try_from(value).map_err(|_| SptError::UnrepresentableField {
		field,
		value: u64::from(value),
		max: u64::from(u8::MAX),
	})
}
