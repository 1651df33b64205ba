//! File type support for `spt-rs` project.

mod error;

pub mod spt;

// Re-export unified error type
pub use error::{HeaderFault, SptError};

// Re-export main file types
pub use spt::{
	Bitmap, Color as SptColor, Diagnostic, EncodeOptions, Encoded, File as SptFile, FormatKind,
	Frame as SptFrame, Header as SptHeader, Offset as SptOffset, Palette as SptPalette, RunMode,
};
