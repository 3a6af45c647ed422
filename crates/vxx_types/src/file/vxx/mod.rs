//! `.VGA` (VXX) sprite archive support.
//!
//! VXX archives hold palette-indexed sprites grouped into collections. Each
//! collection is a run of frames (an animation, or the views of one object),
//! and every frame is a run-length encoded list of pixels plotted around an
//! origin on a 320×200 canvas.
//!
//! # File Structure
//!
//! - **Header:** declared file length, then the top-level table of collection
//!   offsets (see [`table`])
//! - **Collections:** a block length and a table of frame offsets relative to
//!   the collection, followed by frame data
//! - **Frames:** four bounds fields followed by keyed runs (see [`frame`])
//!
//! There is no magic number or checksum.
//!
//! # Usage Examples
//!
//! ## Extracting every frame
//!
//! ```no_run
//! use vxx_types::file::pal::Palette;
//! use vxx_types::file::vxx::{Canvas, File, LogDiagnostics};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let palette = Palette::open("WC1.PAL")?;
//! let mut vxx = File::open("ARROW.VGA")?;
//!
//! let mut canvases: Vec<Canvas> = Vec::new();
//! let summary = vxx.extract(&palette, &mut canvases, &mut LogDiagnostics)?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Iterating over frames
//!
//! ```no_run
//! use vxx_types::file::pal::Palette;
//! use vxx_types::file::vxx::{File, LogDiagnostics};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let palette = Palette::grayscale();
//! let mut vxx = File::open("COCKPIT.VGA")?;
//!
//! for frame in vxx.frames(&palette, &mut LogDiagnostics) {
//!     let frame = frame?;
//!     println!("{frame}");
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::file::VxxError;
use crate::file::pal::Palette;

pub mod builder;
pub mod canvas;
pub mod constants;
pub mod diagnostics;
pub mod frame;
pub mod iterator;
pub mod options;
pub mod parallel;
mod reader;
pub mod run;
pub mod table;


pub use builder::{ArchiveBuilder, FrameBuilder, SubRunSpec};
pub use canvas::{Canvas, CanvasSink};
pub use diagnostics::{Anomaly, Diagnostics, LogDiagnostics};
pub use frame::{Frame, FrameGeometry, FrameId, Pixel};
pub use iterator::FrameIter;
pub use options::DecodeOptions;
pub use run::{RunKind, SubRun};
pub use table::{CollectionTable, FrameLocation, OffsetTable};

/// Totals of one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
	/// Number of top-level collections
	pub collections: usize,
	/// Collections skipped because their table was out of range
	pub skipped_collections: usize,
	/// Frames handed to the sink
	pub frames: usize,
	/// Pixels handed to the sink
	pub pixels: usize,
}

impl fmt::Display for ExtractSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} frames ({} pixels) from {} collections, {} skipped",
			self.frames, self.pixels, self.collections, self.skipped_collections
		)
	}
}

/// An opened VXX archive: the reader plus its resolved offset table.
#[derive(Debug)]
pub struct File<R> {
	reader: R,
	table: OffsetTable,
	options: DecodeOptions,
}

impl<R: Read + Seek> File<R> {
	/// Resolves the offset table of an archive with default options.
	///
	/// Skipped collections are reported through the `log` facade.
	pub fn from_reader(reader: R) -> Result<Self, VxxError> {
		Self::from_reader_with(reader, DecodeOptions::default(), &mut LogDiagnostics)
	}

	/// Resolves the offset table of an archive.
	///
	/// # Errors
	///
	/// Returns an error if the header or a collection table is truncated.
	pub fn from_reader_with<D: Diagnostics + ?Sized>(
		mut reader: R,
		options: DecodeOptions,
		diagnostics: &mut D,
	) -> Result<Self, VxxError> {
		let table = OffsetTable::from_reader(&mut reader, diagnostics)?;
		Ok(Self {
			reader,
			table,
			options,
		})
	}

	/// Returns the resolved offset table.
	#[inline]
	pub fn table(&self) -> &OffsetTable {
		&self.table
	}

	/// Returns the decode options.
	#[inline]
	pub fn options(&self) -> &DecodeOptions {
		&self.options
	}

	/// Replaces the decode options.
	pub fn set_options(&mut self, options: DecodeOptions) {
		self.options = options;
	}

	/// Decodes the frame at `location`.
	pub fn decode_frame<D: Diagnostics + ?Sized>(
		&mut self,
		location: FrameLocation,
		palette: &Palette,
		diagnostics: &mut D,
	) -> Result<Frame, VxxError> {
		self.reader.seek(SeekFrom::Start(u64::from(location.offset)))?;
		Frame::decode(&mut self.reader, location.id(), palette, &self.options, diagnostics)
	}

	/// Decodes a single frame by id, or returns `None` if the table has no
	/// such frame.
	pub fn decode_by_id<D: Diagnostics + ?Sized>(
		&mut self,
		id: FrameId,
		palette: &Palette,
		diagnostics: &mut D,
	) -> Option<Result<Frame, VxxError>> {
		let location = self.table.location(id)?;
		Some(self.decode_frame(location, palette, diagnostics))
	}

	/// Returns a lazily decoding iterator over every frame.
	pub fn frames<'a, D: Diagnostics + ?Sized>(
		&'a mut self,
		palette: &'a Palette,
		diagnostics: &'a mut D,
	) -> FrameIter<'a, R, D> {
		let locations: Vec<_> = self.table.locations().collect();
		FrameIter {
			file: self,
			palette,
			diagnostics,
			locations: locations.into_iter(),
			failed: false,
		}
	}

	/// Decodes every frame and hands each one to `sink` as a named canvas.
	///
	/// # Errors
	///
	/// Stops at the first truncated frame or sink failure.
	pub fn extract<S, D>(
		&mut self,
		palette: &Palette,
		sink: &mut S,
		diagnostics: &mut D,
	) -> Result<ExtractSummary, VxxError>
	where
		S: CanvasSink + ?Sized,
		D: Diagnostics + ?Sized,
	{
		let options = self.options.clone();
		let mut summary = ExtractSummary {
			collections: self.table.collection_count(),
			skipped_collections: self.table.skipped().len(),
			..Default::default()
		};

		for frame in self.frames(palette, diagnostics) {
			let frame = frame?;
			summary.frames += 1;
			summary.pixels += frame.pixel_count();
			sink.accept(frame.into_canvas(&options))?;
		}

		log::info!("Extracted {summary}");
		Ok(summary)
	}
}

impl File<std::io::BufReader<std::fs::File>> {
	/// Opens a `.VGA` archive from the given path.
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, VxxError> {
		let file = std::fs::File::open(path)?;
		Self::from_reader(std::io::BufReader::new(file))
	}
}

impl<T: AsRef<[u8]>> File<Cursor<T>> {
	/// Resolves an archive held in memory.
	pub fn from_bytes(data: T) -> Result<Self, VxxError> {
		Self::from_reader(Cursor::new(data))
	}

	/// Decodes every frame on the `rayon` thread pool.
	///
	/// Produces the same frames and reports the same anomalies, in the same
	/// order, as decoding them one by one.
	pub fn decode_all_parallel<D: Diagnostics + ?Sized>(
		&self,
		palette: &Palette,
		diagnostics: &mut D,
	) -> Result<Vec<Frame>, VxxError> {
		parallel::decode_frames(
			self.reader.get_ref().as_ref(),
			&self.table,
			palette,
			&self.options,
			diagnostics,
		)
	}
}

impl<R> fmt::Display for File<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.table, f)
	}
}
