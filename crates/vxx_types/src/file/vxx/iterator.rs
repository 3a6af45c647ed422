//! Lazy frame iteration.

use std::io::{Read, Seek};

use crate::file::VxxError;
use crate::file::pal::Palette;

use super::File;
use super::diagnostics::Diagnostics;
use super::frame::Frame;
use super::table::FrameLocation;

/// Iterator over decoded frames, in collection then frame order.
///
/// Frames are decoded as they are requested. Truncation is fatal for the
/// archive, so the iterator stops after yielding the first error.
pub struct FrameIter<'a, R, D: ?Sized> {
	pub(super) file: &'a mut File<R>,
	pub(super) palette: &'a Palette,
	pub(super) diagnostics: &'a mut D,
	pub(super) locations: std::vec::IntoIter<FrameLocation>,
	pub(super) failed: bool,
}

impl<R: Read + Seek, D: Diagnostics + ?Sized> Iterator for FrameIter<'_, R, D> {
	type Item = Result<Frame, VxxError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		let location = self.locations.next()?;
		let result = self.file.decode_frame(location, self.palette, &mut *self.diagnostics);
		self.failed = result.is_err();
		Some(result)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		if self.failed {
			(0, Some(0))
		} else {
			(0, Some(self.locations.len()))
		}
	}
}
