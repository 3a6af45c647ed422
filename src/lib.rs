#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `vxx-rs` decodes `.VGA` (VXX) sprite archives into palette-resolved frames.
//!
//! The archive format and the matching `.PAL` palettes come from an early 90s
//! DOS space combat game. See [`vxx_types::file::vxx`] for the format notes.
//!
pub use vxx_internal::*;
