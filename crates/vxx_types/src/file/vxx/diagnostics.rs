//! Recoverable decoding anomalies and the sinks that receive them.
//!
//! Nothing in this list stops a decode. The resolver and the frame decoder
//! report each anomaly to a [`Diagnostics`] implementation passed in by the
//! caller and carry on.

use thiserror::Error;

/// A recoverable problem found while decoding an archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum Anomaly {
	/// A collection's first frame offset points past the declared file length
	#[error(
		"Collection {collection}: frame table at 0x{position:08X} points to 0x{offset:08X}, past file length 0x{file_length:08X}. Skipping."
	)]
	CollectionOffsetOutOfRange {
		/// Collection index
		collection: usize,
		/// Stream position after the offending entry
		position: u64,
		/// Absolute offset the entry resolved to
		offset: u64,
		/// Declared archive length
		file_length: u32,
	},

	/// A pixel fell outside the frame bounds or the canvas
	#[error("{collection}_{frame} - Invalid pixel coordinates: {x}, {y}")]
	InvalidPixelCoordinate {
		/// Collection index
		collection: usize,
		/// Frame index within the collection
		frame: usize,
		/// Computed x coordinate
		x: i32,
		/// Computed y coordinate
		y: i32,
	},

	/// A run key had its sign bit set, so its run is empty
	#[error("{collection}_{frame} - Negative run count in key 0x{key:04X}")]
	NegativeRunCount {
		/// Collection index
		collection: usize,
		/// Frame index within the collection
		frame: usize,
		/// Raw key as read
		key: u16,
	},
}

/// Receiver for [`Anomaly`] reports.
pub trait Diagnostics {
	/// Records one anomaly.
	fn report(&mut self, anomaly: Anomaly);
}

/// Forwards every anomaly to the `log` facade at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
	fn report(&mut self, anomaly: Anomaly) {
		log::warn!("{anomaly}");
	}
}

/// Collects anomalies in order.
impl Diagnostics for Vec<Anomaly> {
	fn report(&mut self, anomaly: Anomaly) {
		self.push(anomaly);
	}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
	fn report(&mut self, anomaly: Anomaly) {
		(**self).report(anomaly);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pixel_message_names_frame() {
		let anomaly = Anomaly::InvalidPixelCoordinate {
			collection: 4,
			frame: 2,
			x: -1,
			y: 250,
		};
		assert_eq!(anomaly.to_string(), "4_2 - Invalid pixel coordinates: -1, 250");
	}

	#[test]
	fn test_vec_collects_in_order() {
		fn report_through<D: Diagnostics>(mut diagnostics: D, anomaly: Anomaly) {
			diagnostics.report(anomaly);
		}

		let mut sink: Vec<Anomaly> = Vec::new();
		report_through(
			&mut sink,
			Anomaly::NegativeRunCount {
				collection: 0,
				frame: 0,
				key: 0xFFFE,
			},
		);
		sink.report(Anomaly::InvalidPixelCoordinate {
			collection: 0,
			frame: 1,
			x: 0,
			y: 0,
		});
		assert_eq!(sink.len(), 2);
		assert!(matches!(sink[0], Anomaly::NegativeRunCount { .. }));
	}

	#[test_log::test]
	fn test_log_diagnostics_does_not_panic() {
		LogDiagnostics.report(Anomaly::CollectionOffsetOutOfRange {
			collection: 3,
			position: 0x20,
			offset: 0x0100_0000,
			file_length: 0x400,
		});
	}
}
