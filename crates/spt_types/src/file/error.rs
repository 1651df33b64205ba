//! Error types for file format parsing and manipulation.

use thiserror::Error;

/// Reasons an SPT header can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderFault {
	/// Not enough data for the fixed prefix or the palette table
	#[error("insufficient data: expected {expected} bytes, got {actual} bytes")]
	Truncated {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Header declares no frames
	#[error("frame count is zero")]
	ZeroFrameCount,

	/// Type tag is neither single (2) nor multi (6)
	#[error("unknown type tag {0}")]
	UnknownType(u32),

	/// `width * height` exceeds the largest frame the decoder accepts
	#[error("pixel count too large for {width}x{height}")]
	PixelCountOverflow {
		/// Declared width
		width: u32,
		/// Declared height
		height: u32,
	},
}

/// Errors that can occur when decoding or encoding SPT files
#[derive(Debug, Error)]
pub enum SptError {
	/// Header could not be parsed
	#[error("Malformed header: {0}")]
	MalformedHeader(#[from] HeaderFault),

	/// A frame chunk is truncated or its RLE stream overruns the declared length
	#[error("Malformed chunk for frame {frame} at byte {offset}: {reason}")]
	MalformedChunk {
		/// Frame index the chunk belongs to
		frame: usize,
		/// Absolute byte offset where decoding failed
		offset: usize,
		/// What went wrong
		reason: &'static str,
	},

	/// Input frames do not share the same dimensions
	#[error(
		"Dimension mismatch: frame {frame} is {}x{}, expected {}x{}",
		actual.0, actual.1, expected.0, expected.1
	)]
	DimensionMismatch {
		/// Index of the offending frame
		frame: usize,
		/// Dimensions of the first frame
		expected: (u32, u32),
		/// Dimensions of the offending frame
		actual: (u32, u32),
	},

	/// Requested palette limit exceeds the 256 entries the format can address
	#[error("Palette limit {limit} is too large (maximum is 256)")]
	PaletteTooLarge {
		/// Requested limit
		limit: usize,
	},

	/// Input has nothing to encode
	#[error("Degenerate input: {0}")]
	DegenerateInput(&'static str),

	/// A value does not fit the header field it has to be written to
	#[error("Value {value} does not fit in {field} (maximum is {max})")]
	UnrepresentableField {
		/// Header field name
		field: &'static str,
		/// Value that was requested
		value: u64,
		/// Largest value the field can hold
		max: u64,
	},

	/// Memory for a decoded frame could not be reserved
	#[error("Cannot allocate {pixels} pixels for frame {frame}")]
	AllocationFailed {
		/// Frame index
		frame: usize,
		/// Pixels requested
		pixels: usize,
		/// Allocator error
		#[source]
		source: std::collections::TryReserveError,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl SptError {
	/// Shorthand for a truncated header.
	pub fn insufficient_data(expected: usize, actual: usize) -> Self {
		Self::MalformedHeader(HeaderFault::Truncated {
			expected,
			actual,
		})
	}
}
