//! Two-level offset table resolution.
//!
//! ```text
//! 0x00                u32   file_length
//! 0x04                u32   collection 0 offset (also: end of this table)
//! 0x08                u32   collection 1 offset
//! ...
//! base                u32   block_length
//! base + 4            u32   frame 0 offset (relative; base + it = end of table)
//! base + 8            u32   frame 1 offset (relative)
//! ...
//! ```
//!
//! Only the low 24 bits of every offset entry are meaningful. Both tables are
//! self-delimiting: reading continues while the cursor is below the first
//! entry's (absolute) value.

use std::fmt;
use std::io::{Read, Seek};

use crate::file::VxxError;

use super::diagnostics::{Anomaly, Diagnostics};
use super::frame::FrameId;
use super::reader::FieldReader;

/// Absolute location of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameLocation {
	/// Collection index
	pub collection: usize,
	/// Frame index within the collection
	pub frame: usize,
	/// Absolute byte offset of the frame in the archive
	pub offset: u32,
}

impl FrameLocation {
	/// Returns the `(collection, frame)` pair.
	#[inline]
	pub fn id(&self) -> FrameId {
		FrameId::new(self.collection, self.frame)
	}
}

/// Resolved second-level table of one valid collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTable {
	index: usize,
	base: u32,
	block_length: u32,
	frame_offsets: Vec<u32>,
}

impl CollectionTable {
	/// Returns the collection index.
	#[inline]
	pub fn index(&self) -> usize {
		self.index
	}

	/// Returns the collection's absolute offset.
	#[inline]
	pub fn base(&self) -> u32 {
		self.base
	}

	/// Returns the block length stored in the collection header.
	#[inline]
	pub fn block_length(&self) -> u32 {
		self.block_length
	}

	/// Returns the absolute frame offsets in order.
	#[inline]
	pub fn frame_offsets(&self) -> &[u32] {
		&self.frame_offsets
	}

	/// Returns the number of frames in the collection.
	#[inline]
	pub fn frame_count(&self) -> usize {
		self.frame_offsets.len()
	}

	/// Returns an iterator over the collection's frame locations.
	pub fn locations(&self) -> impl Iterator<Item = FrameLocation> + '_ {
		self.frame_offsets.iter().enumerate().map(|(frame, &offset)| FrameLocation {
			collection: self.index,
			frame,
			offset,
		})
	}
}

impl fmt::Display for CollectionTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Collection {} @ 0x{:06X}: {} frames, block length {}",
			self.index,
			self.base,
			self.frame_offsets.len(),
			self.block_length
		)
	}
}

/// Accumulates collection records while the header is being walked.
///
/// Each record is appended complete; skipped collections only leave their
/// index behind.
#[derive(Debug, Default)]
struct TableBuilder {
	file_length: u32,
	bases: Vec<u32>,
	collections: Vec<CollectionTable>,
	skipped: Vec<usize>,
}

impl TableBuilder {
	fn new(file_length: u32, bases: Vec<u32>) -> Self {
		Self {
			file_length,
			bases,
			..Default::default()
		}
	}

	fn push(&mut self, index: usize, block_length: u32, frame_offsets: Vec<u32>) {
		self.collections.push(CollectionTable {
			index,
			base: self.bases[index],
			block_length,
			frame_offsets,
		});
	}

	fn skip(&mut self, index: usize) {
		self.skipped.push(index);
	}

	fn finish(self) -> OffsetTable {
		OffsetTable {
			file_length: self.file_length,
			bases: self.bases,
			collections: self.collections,
			skipped: self.skipped,
		}
	}
}

/// Fully resolved offset table of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
	file_length: u32,
	bases: Vec<u32>,
	collections: Vec<CollectionTable>,
	skipped: Vec<usize>,
}

impl OffsetTable {
	/// Walks the archive header and resolves every frame offset.
	///
	/// Reading starts at the beginning of the stream. Collections whose first
	/// frame offset lands past `file_length` are reported to `diagnostics` and
	/// contribute no frames.
	///
	/// # Errors
	///
	/// Returns [`VxxError::Truncated`] if the stream ends inside a table; no
	/// partial table is returned.
	pub fn from_reader<R, D>(reader: &mut R, diagnostics: &mut D) -> Result<Self, VxxError>
	where
		R: Read + Seek,
		D: Diagnostics + ?Sized,
	{
		let mut reader = FieldReader::new(reader)?;
		reader.seek_to(0)?;

		let file_length = reader.read_u32()?;

		let table_end = reader.read_offset()?;
		let mut bases = vec![table_end];
		while reader.position() < u64::from(table_end) {
			bases.push(reader.read_offset()?);
		}

		let mut builder = TableBuilder::new(file_length, bases.clone());
		for (index, &base) in bases.iter().enumerate() {
			reader.seek_to(u64::from(base))?;

			let block_length = reader.read_u32()?;
			let first = u64::from(base) + u64::from(reader.read_offset()?);
			if first > u64::from(file_length) {
				diagnostics.report(Anomaly::CollectionOffsetOutOfRange {
					collection: index,
					position: reader.position(),
					offset: first,
					file_length,
				});
				builder.skip(index);
				continue;
			}

			// base and entries are 24-bit, so the sum fits in u32
			let mut frame_offsets = vec![first as u32];
			while reader.position() < first {
				frame_offsets.push(base + reader.read_offset()?);
			}
			builder.push(index, block_length, frame_offsets);
		}

		let table = builder.finish();
		log::debug!(
			"Resolved {} collections ({} skipped), {} frames",
			table.bases.len(),
			table.skipped.len(),
			table.frame_count()
		);
		Ok(table)
	}

	/// Returns the file length declared in the header.
	#[inline]
	pub fn file_length(&self) -> u32 {
		self.file_length
	}

	/// Returns every top-level collection offset, valid or not.
	#[inline]
	pub fn collection_offsets(&self) -> &[u32] {
		&self.bases
	}

	/// Returns the number of top-level entries.
	#[inline]
	pub fn collection_count(&self) -> usize {
		self.bases.len()
	}

	/// Returns the valid collections in order.
	#[inline]
	pub fn collections(&self) -> &[CollectionTable] {
		&self.collections
	}

	/// Returns the indices of skipped collections.
	#[inline]
	pub fn skipped(&self) -> &[usize] {
		&self.skipped
	}

	/// Looks up a valid collection by its index.
	pub fn collection(&self, index: usize) -> Option<&CollectionTable> {
		self.collections.iter().find(|c| c.index == index)
	}

	/// Looks up a single frame's location.
	pub fn location(&self, id: FrameId) -> Option<FrameLocation> {
		let collection = self.collection(id.collection)?;
		let offset = *collection.frame_offsets.get(id.frame)?;
		Some(FrameLocation {
			collection: id.collection,
			frame: id.frame,
			offset,
		})
	}

	/// Returns the total number of resolved frames.
	pub fn frame_count(&self) -> usize {
		self.collections.iter().map(CollectionTable::frame_count).sum()
	}

	/// Returns every frame location, collection order then frame order.
	pub fn locations(&self) -> impl Iterator<Item = FrameLocation> + '_ {
		self.collections.iter().flat_map(CollectionTable::locations)
	}
}

impl fmt::Display for OffsetTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"VXX table: file length {}, {} collections ({} skipped), {} frames",
			self.file_length,
			self.bases.len(),
			self.skipped.len(),
			self.frame_count()
		)
	}
}
