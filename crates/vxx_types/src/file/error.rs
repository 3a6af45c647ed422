//! Error types for file format parsing.

use std::fmt;

use thiserror::Error;

/// File formats handled by this crate, used to tag errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// `.PAL` palette file
	Pal,
	/// `.VGA` / VXX sprite archive
	Vxx,
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Pal => write!(f, "PAL"),
			Self::Vxx => write!(f, "VXX"),
		}
	}
}

/// Fatal errors raised while loading palettes or decoding archives.
///
/// Recoverable problems (bad collections, stray pixels) are not errors; they
/// are reported as [`Anomaly`](crate::file::vxx::Anomaly) values instead.
#[derive(Debug, Error)]
pub enum VxxError {
	/// Palette input is not exactly 256 RGB triples
	#[error("Invalid palette size: expected {expected} bytes, got {actual} bytes")]
	PaletteSize {
		/// Required number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// The stream ended where a fixed-width field was expected
	#[error("{file_type} data truncated at offset 0x{offset:08X}: expected {expected} more bytes")]
	Truncated {
		/// File type being parsed
		file_type: FileType,
		/// Stream position of the short read
		offset: u64,
		/// Width of the field that could not be read
		expected: usize,
	},

	/// A frame consumed more bytes than it is allowed to
	#[error("Frame {collection}_{frame} exceeds its {limit} byte read limit")]
	FrameOverrun {
		/// Collection index
		collection: usize,
		/// Frame index within the collection
		frame: usize,
		/// Byte limit that was hit
		limit: u64,
	},

	/// The canvas sink rejected a canvas
	#[error("Canvas sink failed: {0}")]
	Sink(#[source] Box<dyn std::error::Error + Send + Sync>),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl VxxError {
	/// Creates a truncation error for the given file type.
	pub fn truncated(file_type: FileType, offset: u64, expected: usize) -> Self {
		Self::Truncated {
			file_type,
			offset,
			expected,
		}
	}

	/// Wraps an arbitrary sink failure.
	pub fn sink<E>(err: E) -> Self
	where
		E: Into<Box<dyn std::error::Error + Send + Sync>>,
	{
		Self::Sink(err.into())
	}

	/// Returns `true` if this error was caused by running out of input.
	pub fn is_truncation(&self) -> bool {
		matches!(self, Self::Truncated { .. } | Self::FrameOverrun { .. })
	}
}
