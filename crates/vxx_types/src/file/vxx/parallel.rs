//! Multi-threaded frame decoding for archives held in memory.
//!
//! Resolving the offset table is sequential, but once every frame offset is
//! known each frame only needs its own bytes and the shared palette.

use std::io::Cursor;

use rayon::prelude::*;

use crate::file::VxxError;
use crate::file::pal::Palette;

use super::diagnostics::{Anomaly, Diagnostics};
use super::frame::Frame;
use super::options::DecodeOptions;
use super::table::{FrameLocation, OffsetTable};

fn decode_one(
	data: &[u8],
	location: FrameLocation,
	palette: &Palette,
	options: &DecodeOptions,
) -> (Result<Frame, VxxError>, Vec<Anomaly>) {
	let mut cursor = Cursor::new(data);
	cursor.set_position(u64::from(location.offset));

	let mut anomalies = Vec::new();
	let frame = Frame::decode(&mut cursor, location.id(), palette, options, &mut anomalies);
	(frame, anomalies)
}

/// Decodes every frame of `table` from `data` in parallel.
///
/// Each worker collects its own anomalies; they are replayed into
/// `diagnostics` in frame order once all workers finish. On failure the
/// anomalies of frames up to and including the failing one are replayed and
/// the first error in frame order is returned.
pub fn decode_frames<D: Diagnostics + ?Sized>(
	data: &[u8],
	table: &OffsetTable,
	palette: &Palette,
	options: &DecodeOptions,
	diagnostics: &mut D,
) -> Result<Vec<Frame>, VxxError> {
	let locations: Vec<FrameLocation> = table.locations().collect();

	let results: Vec<_> = locations
		.par_iter()
		.map(|&location| decode_one(data, location, palette, options))
		.collect();

	let mut frames = Vec::with_capacity(results.len());
	for (frame, anomalies) in results {
		for anomaly in anomalies {
			diagnostics.report(anomaly);
		}
		frames.push(frame?);
	}

	log::debug!("Decoded {} frames in parallel", frames.len());
	Ok(frames)
}
