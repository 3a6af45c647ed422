//! Prelude module for `vxx_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use vxx_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let palette = Palette::grayscale();
//! let options = DecodeOptions::default().with_name_prefix("cockpit");
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Errors
	FileType,
	VxxError,

	// PAL types
	Color,
	Palette,

	// VXX types
	Anomaly,
	ArchiveBuilder,
	Canvas,
	CanvasSink,
	DecodeOptions,
	Diagnostics,
	ExtractSummary,
	Frame,
	FrameBuilder,
	FrameGeometry,
	FrameId,
	LogDiagnostics,
	OffsetTable,
	Pixel,
	VxxFile,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
