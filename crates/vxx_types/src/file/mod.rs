//! File type support for `vxx-rs` project.

mod error;

pub mod pal;
pub mod vxx;

// Re-export unified error type
pub use error::{FileType, VxxError};

// Re-export main file types
pub use pal::{Color, Palette};
pub use vxx::{
	Anomaly, ArchiveBuilder, Canvas, CanvasSink, DecodeOptions, Diagnostics, ExtractSummary,
	File as VxxFile, Frame, FrameBuilder, FrameGeometry, FrameId, LogDiagnostics, OffsetTable,
	Pixel,
};
