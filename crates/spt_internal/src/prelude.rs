//! Prelude module for `spt_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use spt_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let blue = SptColor::new(0, 0, 240, 240);
//! let frames = vec![Bitmap::from_colors(2, 1, &[blue, blue]).unwrap()];
//!
//! let encoded = encode(&frames, &EncodeOptions::default()).unwrap();
//! let spt = SptFile::from_bytes(encoded.data()).unwrap();
//! assert_eq!(spt.kind(), FormatKind::Single);
//! ```

// Re-export everything from spt_types::prelude
#[doc(inline)]
pub use spt_types::prelude::*;

// Re-export the entire spt_types module for advanced usage
#[doc(inline)]
pub use spt_types;
