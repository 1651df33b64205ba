//! This crate provides core data types and file format support for the `spt-rs` project.
//!
//! # File Formats
//!
//! - **SPT**: Palette-indexed, run-length compressed sprites, either a single
//!   still image or an animation sequence sharing one offset
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use spt_types::prelude::*;
//!
//! # fn main() -> Result<(), SptError> {
//! let spt = SptFile::open("MAINLOGO.SPT")?;
//! for diagnostic in spt.diagnostics() {
//!     println!("{diagnostic}");
//! }
//!
//! let frames: Vec<Bitmap> = spt.bitmaps().collect();
//! let encoded = encode(&frames, &EncodeOptions::default().with_offset(spt.offset()))?;
//! std::fs::write("MAINLOGO.NEW.SPT", encoded.data())?;
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use spt_types::file::spt::{File, decode};
//!
//! let data = std::fs::read("MAINLOGO.SPT").unwrap();
//! let spt: File = decode(&data).unwrap();
//! // ...
//! ```

pub mod file;

/// `use spt_types::prelude::*;` to import commonly used items.
pub mod prelude;
