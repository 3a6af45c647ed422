//! Little-endian field reader that tracks its own position.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::file::{FileType, VxxError};

use super::constants::OFFSET_MASK;
use super::frame::FrameId;

/// Read window for a single frame.
#[derive(Debug, Clone, Copy)]
struct Budget {
	end: u64,
	limit: u64,
	id: FrameId,
}

/// Wraps a seekable stream and maps short reads to [`VxxError::Truncated`].
pub(super) struct FieldReader<'a, R> {
	inner: &'a mut R,
	position: u64,
	budget: Option<Budget>,
}

impl<'a, R: Read + Seek> FieldReader<'a, R> {
	/// Starts reading at the stream's current position.
	pub fn new(inner: &'a mut R) -> Result<Self, VxxError> {
		let position = inner.stream_position()?;
		Ok(Self {
			inner,
			position,
			budget: None,
		})
	}

	/// Refuses reads past `limit` bytes from the current position.
	pub fn with_budget(mut self, id: FrameId, limit: u64) -> Self {
		self.budget = Some(Budget {
			end: self.position.saturating_add(limit),
			limit,
			id,
		});
		self
	}

	#[inline]
	pub fn position(&self) -> u64 {
		self.position
	}

	pub fn seek_to(&mut self, offset: u64) -> Result<(), VxxError> {
		self.position = self.inner.seek(SeekFrom::Start(offset))?;
		Ok(())
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N], VxxError> {
		if let Some(budget) = self.budget
			&& self.position + N as u64 > budget.end
		{
			return Err(VxxError::FrameOverrun {
				collection: budget.id.collection,
				frame: budget.id.frame,
				limit: budget.limit,
			});
		}

		let mut buffer = [0u8; N];
		match self.inner.read_exact(&mut buffer) {
			Ok(()) => {
				self.position += N as u64;
				Ok(buffer)
			}
			Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
				Err(VxxError::truncated(FileType::Vxx, self.position, N))
			}
			Err(e) => Err(e.into()),
		}
	}

	pub fn read_u8(&mut self) -> Result<u8, VxxError> {
		let [byte] = self.read_array::<1>()?;
		Ok(byte)
	}

	pub fn read_i16(&mut self) -> Result<i16, VxxError> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	pub fn read_u32(&mut self) -> Result<u32, VxxError> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Reads a table entry, keeping only its low 24 bits.
	pub fn read_offset(&mut self) -> Result<u32, VxxError> {
		Ok(self.read_u32()? & OFFSET_MASK)
	}
}
