//! Benchmark helper utilities for vxx-rs
//!
//! This module generates synthetic archives for the benchmark suite. Real
//! archives can be dropped into `test_data/` (`ARROW.VGA` and `WC1.PAL`); the
//! benchmarks that need them are skipped when they are missing.

use vxx_types::file::vxx::{ArchiveBuilder, FrameBuilder, SubRunSpec};

/// Generates one sprite-like frame of `width` x `height` pixels.
///
/// Rows alternate between literal runs and nested runs mixing fills with
/// short literals, so both decoder paths are exercised.
pub fn generate_frame(width: u16, height: u16, seed: u8) -> Vec<u8> {
	let half_w = (width / 2) as i16;
	let half_h = (height / 2) as i16;
	let mut builder = FrameBuilder::new(half_w, width as i16 - half_w - 1, half_h, height as i16 - half_h - 1);

	for row in 0..height {
		let dy = row as i16 - half_h;
		if row % 2 == 0 {
			let indices: Vec<u8> = (0..width).map(|x| seed.wrapping_add((x ^ row) as u8)).collect();
			for (i, chunk) in indices.chunks(0x3FFF).enumerate() {
				builder = builder.literal(-half_w + (i * 0x3FFF) as i16, dy, chunk);
			}
		} else {
			let mut parts = Vec::new();
			let mut remaining = width as usize;
			while remaining > 0 {
				let fill = remaining.min(24);
				parts.push(SubRunSpec::Fill {
					count: fill as u8,
					index: seed.wrapping_add(row as u8),
				});
				remaining -= fill;
				let literal = remaining.min(8);
				if literal > 0 {
					parts.push(SubRunSpec::Literal((0..literal as u8).collect()));
					remaining -= literal;
				}
			}
			builder = builder.nested(-half_w, dy, &parts);
		}
	}
	builder.build()
}

/// Generates an archive of `collections` x `frames` frames of the given size.
pub fn generate_test_archive(collections: usize, frames: usize, size: (u16, u16)) -> Vec<u8> {
	let mut builder = ArchiveBuilder::new();
	for c in 0..collections {
		let frames = (0..frames).map(|f| generate_frame(size.0, size.1, (c * 31 + f) as u8)).collect();
		builder = builder.collection(frames);
	}
	builder.build()
}

/// Common benchmark sizes for synthetic frames
pub mod sizes {
	/// Small sprite: 16x16
	pub const SMALL: (u16, u16) = (16, 16);
	/// Ship sprite: 64x48
	pub const MEDIUM: (u16, u16) = (64, 48);
	/// Full canvas: 320x200
	pub const FULL: (u16, u16) = (320, 200);
}

#[cfg(test)]
mod tests {
	use super::*;
	use vxx_types::file::pal::Palette;
	use vxx_types::file::vxx::{Anomaly, File};

	#[test]
	fn test_generated_archive_decodes_cleanly() {
		let data = generate_test_archive(2, 3, sizes::MEDIUM);
		let mut archive = File::from_bytes(data).unwrap();
		let palette = Palette::grayscale();

		let mut anomalies: Vec<Anomaly> = Vec::new();
		let frames: Vec<_> = archive.frames(&palette, &mut anomalies).collect::<Result<_, _>>().unwrap();

		assert_eq!(frames.len(), 6);
		assert!(anomalies.is_empty());
		assert!(frames.iter().all(|f| f.pixel_count() == 64 * 48));
	}
}
