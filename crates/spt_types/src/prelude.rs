//! Prelude module for `spt_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use spt_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let red = SptColor::new(240, 0, 0, 240);
//! let bitmap = Bitmap::from_colors(1, 1, &[red]).unwrap();
//! let encoded = encode(&[bitmap], &EncodeOptions::default()).unwrap();
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Raster exchange
	Bitmap,

	// Conversion reports
	Diagnostic,

	// Encoder settings
	EncodeOptions,
	Encoded,

	// Header types
	FormatKind,
	HeaderFault,
	RunMode,

	// SPT types
	SptColor,
	SptError,
	SptFile,
	SptFrame,
	SptHeader,
	SptOffset,
	SptPalette,
};

// Conversion entry points
#[doc(inline)]
pub use crate::file::spt::{decode, encode};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
