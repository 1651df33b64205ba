//! Forces dynamic linking of `spt-rs` when the `dynamic_linking` feature is enabled.

#![allow(unused_imports)]

pub use spt_internal::*;
