#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `spt-rs` reads and writes the SPT sprite format of a legacy game engine.
//!
//! SPT files hold palette-indexed, run-length compressed frames: a single
//! still image or an animation sequence that shares one (x, y) offset.
//!
//! ```no_run
//! use spt_rs::prelude::*;
//!
//! # fn main() -> Result<(), SptError> {
//! let spt = SptFile::open("MAINLOGO.SPT")?;
//! println!("{spt}");
//! # Ok(())
//! # }
//! ```
//!
pub use spt_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use spt_dylib;
