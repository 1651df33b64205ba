//! This module is separated into its own crate to enable simple dynamic linking for `spt-rs`, and should not be used directly.

/// `use spt::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export spt_types for convenience
pub use spt_types;

// Re-export commonly used types at crate root
pub use spt_types::file::{
	Bitmap, Diagnostic, EncodeOptions, Encoded, SptError, SptFile, SptPalette,
	spt::{decode, encode},
};
