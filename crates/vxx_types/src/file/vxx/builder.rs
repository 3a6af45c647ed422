//! Archive builder.
//!
//! Produces well-formed VXX bytes from frame descriptions. Useful for tests,
//! benchmarks and for re-packing decoded sprites.
//!
//! # Example
//!
//! ```
//! use vxx_types::file::vxx::{ArchiveBuilder, FrameBuilder};
//!
//! let frame = FrameBuilder::new(0, 2, 0, 0).literal(0, 0, &[5, 9, 2]).build();
//! let bytes = ArchiveBuilder::new().collection(vec![frame]).build();
//! assert_eq!(u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize, bytes.len());
//! ```

use super::constants::{
	FRAME_HEADER_SIZE, LENGTH_FIELD_SIZE, MAX_KEY_COUNT, MAX_SUB_KEY_COUNT, OFFSET_ENTRY_SIZE,
	OFFSET_MASK,
};
use super::run::{RunKind, SubRun};

/// One piece of a nested run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubRunSpec {
	/// Individual color indices
	Literal(Vec<u8>),
	/// One color index repeated `count` times
	Fill {
		/// Number of pixels
		count: u8,
		/// Color index
		index: u8,
	},
}

impl SubRunSpec {
	fn pixel_count(&self) -> usize {
		match self {
			Self::Literal(indices) => indices.len(),
			Self::Fill {
				count,
				..
			} => *count as usize,
		}
	}
}

/// Encodes a single frame.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
	data: Vec<u8>,
}

impl FrameBuilder {
	/// Starts a frame with the given bounds.
	pub fn new(x1: i16, x2: i16, y1: i16, y2: i16) -> Self {
		let mut data = Vec::with_capacity(FRAME_HEADER_SIZE);
		for value in [x2, x1, y1, y2] {
			data.extend_from_slice(&value.to_le_bytes());
		}
		Self {
			data,
		}
	}

	fn run_header(&mut self, kind: RunKind, dx: i16, dy: i16) {
		self.data.extend_from_slice(&kind.encode().to_le_bytes());
		self.data.extend_from_slice(&dx.to_le_bytes());
		self.data.extend_from_slice(&dy.to_le_bytes());
	}

	/// Appends a literal run: one pixel per color index.
	///
	/// # Panics
	///
	/// Panics if `indices` is empty or longer than 16383 entries.
	pub fn literal(mut self, dx: i16, dy: i16, indices: &[u8]) -> Self {
		let count = checked_key_count(indices.len());
		self.run_header(RunKind::Literal(count), dx, dy);
		self.data.extend_from_slice(indices);
		self
	}

	/// Appends a nested run made of sub-runs.
	///
	/// # Panics
	///
	/// Panics if the run is empty, a sub-run exceeds 127 pixels, or the total
	/// exceeds 16383 pixels.
	pub fn nested(mut self, dx: i16, dy: i16, parts: &[SubRunSpec]) -> Self {
		let total = parts.iter().map(SubRunSpec::pixel_count).sum();
		let count = checked_key_count(total);
		self.run_header(RunKind::Nested(count), dx, dy);

		for part in parts {
			let len = part.pixel_count();
			assert!(len <= MAX_SUB_KEY_COUNT as usize, "Sub-run of {len} pixels is too long");
			match part {
				SubRunSpec::Literal(indices) => {
					self.data.push(SubRun::Literal(len as u8).encode());
					self.data.extend_from_slice(indices);
				}
				SubRunSpec::Fill {
					count,
					index,
				} => {
					self.data.push(SubRun::Fill(*count).encode());
					self.data.push(*index);
				}
			}
		}
		self
	}

	/// Appends raw bytes, for streams the typed helpers cannot express.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.data.extend_from_slice(bytes);
		self
	}

	/// Terminates the frame and returns its bytes.
	pub fn build(mut self) -> Vec<u8> {
		self.data.extend_from_slice(&0i16.to_le_bytes());
		self.data
	}
}

fn checked_key_count(count: usize) -> i16 {
	assert!(
		count > 0 && count <= MAX_KEY_COUNT as usize,
		"Run of {count} pixels cannot be encoded"
	);
	count as i16
}

#[derive(Debug, Clone)]
enum CollectionSpec {
	Frames(Vec<Vec<u8>>),
	OutOfRange,
}

/// Lays out collections of encoded frames into an archive.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
	collections: Vec<CollectionSpec>,
	offset_flags: u8,
}

impl ArchiveBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a collection of encoded frames (see [`FrameBuilder::build`]).
	///
	/// # Panics
	///
	/// Panics if `frames` is empty; the format cannot express an empty
	/// collection.
	pub fn collection(mut self, frames: Vec<Vec<u8>>) -> Self {
		assert!(!frames.is_empty(), "A collection needs at least one frame");
		self.collections.push(CollectionSpec::Frames(frames));
		self
	}

	/// Appends a collection whose frame table points past the end of the file.
	pub fn out_of_range_collection(mut self) -> Self {
		self.collections.push(CollectionSpec::OutOfRange);
		self
	}

	/// Sets the unused high byte of every table entry.
	pub fn offset_flags(mut self, flags: u8) -> Self {
		self.offset_flags = flags;
		self
	}

	fn entry(&self, offset: usize) -> [u8; 4] {
		let value = (offset as u32 & OFFSET_MASK) | (u32::from(self.offset_flags) << 24);
		value.to_le_bytes()
	}

	/// Produces the archive bytes.
	///
	/// # Panics
	///
	/// Panics if there are no collections or an offset does not fit in 24 bits.
	pub fn build(&self) -> Vec<u8> {
		assert!(!self.collections.is_empty(), "An archive needs at least one collection");

		let mut blocks = Vec::with_capacity(self.collections.len());
		for spec in &self.collections {
			let mut block = Vec::new();
			match spec {
				CollectionSpec::Frames(frames) => {
					let table_size = LENGTH_FIELD_SIZE + frames.len() * OFFSET_ENTRY_SIZE;
					let block_length = table_size + frames.iter().map(Vec::len).sum::<usize>();
					block.extend_from_slice(&(block_length as u32).to_le_bytes());

					let mut relative = table_size;
					for frame in frames {
						block.extend_from_slice(&self.entry(relative));
						relative += frame.len();
					}
					for frame in frames {
						block.extend_from_slice(frame);
					}
				}
				CollectionSpec::OutOfRange => {
					block.extend_from_slice(&0u32.to_le_bytes());
					block.extend_from_slice(&self.entry(OFFSET_MASK as usize));
				}
			}
			blocks.push(block);
		}

		let header_size = LENGTH_FIELD_SIZE + blocks.len() * OFFSET_ENTRY_SIZE;
		let total = header_size + blocks.iter().map(Vec::len).sum::<usize>();
		assert!(total <= OFFSET_MASK as usize, "Archive too large for 24-bit offsets");

		let mut data = Vec::with_capacity(total);
		data.extend_from_slice(&(total as u32).to_le_bytes());
		let mut base = header_size;
		for block in &blocks {
			data.extend_from_slice(&self.entry(base));
			base += block.len();
		}
		for block in blocks {
			data.extend(block);
		}
		data
	}
}
