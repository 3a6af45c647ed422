//! Frame geometry and the run-length decoder.
//!
//! # Frame Layout
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  ---------------------------------------------
//! 0x00    2     x2 (i16) - extent right of the origin
//! 0x02    2     x1 (i16) - extent left of the origin, origin x
//! 0x04    2     y1 (i16) - extent above the origin, origin y
//! 0x06    2     y2 (i16) - extent below the origin
//! 0x08    ...   runs, terminated by a zero key
//! ```
//!
//! Each run starts with `key`, `dx` and `dy` (all i16). Pixels of a run sit on
//! row `y1 + dy`, starting at column `x1 + dx` and advancing by one column per
//! pixel. See [`RunKind`] and [`SubRun`] for the key layout.

use std::fmt;
use std::io::{Read, Seek};

use crate::file::VxxError;
use crate::file::pal::{Color, Palette};

use super::canvas::Canvas;
use super::diagnostics::{Anomaly, Diagnostics};
use super::options::DecodeOptions;
use super::reader::FieldReader;
use super::run::{RunKind, SubRun};

/// Identifies a frame by collection and position within the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId {
	/// Collection index
	pub collection: usize,
	/// Frame index within the collection
	pub frame: usize,
}

impl FrameId {
	/// Creates a new frame id.
	pub const fn new(collection: usize, frame: usize) -> Self {
		Self {
			collection,
			frame,
		}
	}
}

impl fmt::Display for FrameId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}_{}", self.collection, self.frame)
	}
}

/// Bounding parameters stored at the start of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameGeometry {
	/// Extent left of the origin; also the origin's x coordinate
	pub x1: i16,
	/// Extent right of the origin
	pub x2: i16,
	/// Extent above the origin; also the origin's y coordinate
	pub y1: i16,
	/// Extent below the origin
	pub y2: i16,
}

impl FrameGeometry {
	/// Creates geometry from its four fields.
	pub const fn new(x1: i16, x2: i16, y1: i16, y2: i16) -> Self {
		Self {
			x1,
			x2,
			y1,
			y2,
		}
	}

	/// Width of the frame, `x1 + x2 + 1`.
	#[inline]
	pub fn width(&self) -> i32 {
		i32::from(self.x1) + i32::from(self.x2) + 1
	}

	/// Height of the frame, `y1 + y2 + 1`.
	#[inline]
	pub fn height(&self) -> i32 {
		i32::from(self.y1) + i32::from(self.y2) + 1
	}

	/// Origin (registration point) of the frame.
	#[inline]
	pub fn origin(&self) -> (i32, i32) {
		(i32::from(self.x1), i32::from(self.y1))
	}

	fn read<R: Read + Seek>(reader: &mut FieldReader<'_, R>) -> Result<Self, VxxError> {
		let x2 = reader.read_i16()?;
		let x1 = reader.read_i16()?;
		let y1 = reader.read_i16()?;
		let y2 = reader.read_i16()?;
		Ok(Self::new(x1, x2, y1, y2))
	}
}

impl fmt::Display for FrameGeometry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (ox, oy) = self.origin();
		write!(f, "{}×{} (origin: {}, {})", self.width(), self.height(), ox, oy)
	}
}

/// A plotted pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
	/// Column within the canvas
	pub x: u32,
	/// Row within the canvas
	pub y: u32,
	/// Palette index as stored in the archive
	pub index: u8,
	/// Resolved palette color
	pub color: Color,
}

/// A decoded frame: geometry plus the sparse list of valid pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	id: FrameId,
	geometry: FrameGeometry,
	pixels: Vec<Pixel>,
}

impl Frame {
	/// Decodes one frame starting at the reader's current position.
	///
	/// On success the reader sits on the byte right after the zero key that
	/// ends the frame. Pixels outside the frame bounds or the canvas are
	/// dropped and reported to `diagnostics`.
	///
	/// # Errors
	///
	/// Returns [`VxxError::Truncated`] if the stream ends inside the frame and
	/// [`VxxError::FrameOverrun`] if `options.max_frame_bytes` is exceeded.
	pub fn decode<R, D>(
		reader: &mut R,
		id: FrameId,
		palette: &Palette,
		options: &DecodeOptions,
		diagnostics: &mut D,
	) -> Result<Self, VxxError>
	where
		R: Read + Seek,
		D: Diagnostics + ?Sized,
	{
		let mut fields = FieldReader::new(reader)?;
		if let Some(limit) = options.max_frame_bytes {
			fields = fields.with_budget(id, limit);
		}

		let geometry = FrameGeometry::read(&mut fields)?;
		let mut state = DecoderState {
			reader: fields,
			palette,
			diagnostics,
			id,
			geometry,
			bounds: (
				geometry.width().min(options.canvas_width as i32),
				geometry.height().min(options.canvas_height as i32),
			),
			pixels: Vec::new(),
		};
		state.run()?;

		Ok(Self {
			id,
			geometry,
			pixels: state.pixels,
		})
	}

	/// Creates a frame from already decoded parts.
	pub fn new(id: FrameId, geometry: FrameGeometry, pixels: Vec<Pixel>) -> Self {
		Self {
			id,
			geometry,
			pixels,
		}
	}

	/// Returns the frame's id.
	#[inline]
	pub fn id(&self) -> FrameId {
		self.id
	}

	/// Returns the frame's bounding geometry.
	#[inline]
	pub fn geometry(&self) -> &FrameGeometry {
		&self.geometry
	}

	/// Returns the plotted pixels in decode order.
	#[inline]
	pub fn pixels(&self) -> &[Pixel] {
		&self.pixels
	}

	/// Returns the number of plotted pixels.
	#[inline]
	pub fn pixel_count(&self) -> usize {
		self.pixels.len()
	}

	/// Turns the frame into a named canvas for a sink.
	pub fn into_canvas(self, options: &DecodeOptions) -> Canvas {
		Canvas::new(
			options.canvas_name(self.id),
			options.canvas_width,
			options.canvas_height,
			self.pixels,
		)
	}
}

impl fmt::Display for Frame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Frame {}: {}, {} pixels", self.id, self.geometry, self.pixels.len())
	}
}

/// Mutable state of one frame decode.
struct DecoderState<'a, 'r, R, D: ?Sized> {
	reader: FieldReader<'r, R>,
	palette: &'a Palette,
	diagnostics: &'a mut D,
	id: FrameId,
	geometry: FrameGeometry,
	/// Exclusive upper bounds: frame size clipped to the canvas
	bounds: (i32, i32),
	pixels: Vec<Pixel>,
}

impl<R: Read + Seek, D: Diagnostics + ?Sized> DecoderState<'_, '_, R, D> {
	fn run(&mut self) -> Result<(), VxxError> {
		let (x1, y1) = self.geometry.origin();

		loop {
			let key = self.reader.read_i16()?;
			let Some(kind) = RunKind::decode(key) else {
				return Ok(());
			};

			let dx = self.reader.read_i16()?;
			let dy = self.reader.read_i16()?;
			let mut x = x1 + i32::from(dx);
			let y = y1 + i32::from(dy);

			if kind.count() < 0 {
				self.diagnostics.report(Anomaly::NegativeRunCount {
					collection: self.id.collection,
					frame: self.id.frame,
					key: key as u16,
				});
				continue;
			}

			match kind {
				RunKind::Literal(count) => {
					for _ in 0..count {
						let index = self.reader.read_u8()?;
						self.plot(x, y, index);
						x += 1;
					}
				}
				RunKind::Nested(count) => {
					let mut remaining = i32::from(count);
					while remaining > 0 {
						let sub = SubRun::decode(self.reader.read_u8()?);
						let len = i32::from(sub.count());
						match sub {
							SubRun::Literal(n) => {
								for _ in 0..n {
									let index = self.reader.read_u8()?;
									self.plot(x, y, index);
									x += 1;
								}
							}
							SubRun::Fill(n) => {
								let index = self.reader.read_u8()?;
								for _ in 0..n {
									self.plot(x, y, index);
									x += 1;
								}
							}
						}
						remaining -= len;
					}
				}
			}
		}
	}

	fn plot(&mut self, x: i32, y: i32, index: u8) {
		let (width, height) = self.bounds;
		if (0..width).contains(&x) && (0..height).contains(&y) {
			self.pixels.push(Pixel {
				x: x as u32,
				y: y as u32,
				index,
				color: self.palette.get(index),
			});
		} else {
			self.diagnostics.report(Anomaly::InvalidPixelCoordinate {
				collection: self.id.collection,
				frame: self.id.frame,
				x,
				y,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::io::Cursor;

	fn decode(bytes: &[u8]) -> (Frame, Vec<Anomaly>, u64) {
		let mut cursor = Cursor::new(bytes);
		let mut anomalies = Vec::new();
		let frame = Frame::decode(
			&mut cursor,
			FrameId::new(0, 0),
			&Palette::grayscale(),
			&DecodeOptions::default(),
			&mut anomalies,
		)
		.unwrap();
		(frame, anomalies, cursor.position())
	}

	#[test]
	fn test_geometry_field_order() {
		// x2, x1, y1, y2
		let bytes = [5, 0, 2, 0, 3, 0, 7, 0, 0, 0];
		let (frame, _, _) = decode(&bytes);
		assert_eq!(frame.geometry(), &FrameGeometry::new(2, 5, 3, 7));
		assert_eq!(frame.geometry().width(), 8);
		assert_eq!(frame.geometry().height(), 11);
		assert_eq!(frame.geometry().origin(), (2, 3));
	}

	#[test]
	fn test_geometry_does_not_truncate() {
		let geometry = FrameGeometry::new(i16::MAX, i16::MAX, 0, 0);
		assert_eq!(geometry.width(), 65535);
	}

	#[test]
	fn test_nested_literal_sub_run() {
		#[rustfmt::skip]
		let bytes = [
			4, 0, 0, 0, 0, 0, 0, 0,  // x2=4, x1=0, y1=0, y2=0
			0x07, 0x00,              // nested, 3 pixels
			0x01, 0x00, 0x00, 0x00,  // dx=1, dy=0
			0x06, 10, 11, 12,        // literal sub-run of 3
			0x00, 0x00,
		];
		let (frame, anomalies, position) = decode(&bytes);
		let xs: Vec<_> = frame.pixels().iter().map(|p| (p.x, p.index)).collect();
		assert_eq!(xs, vec![(1, 10), (2, 11), (3, 12)]);
		assert!(anomalies.is_empty());
		assert_eq!(position, bytes.len() as u64);
	}

	#[test]
	fn test_nested_sub_runs_may_overshoot() {
		#[rustfmt::skip]
		let bytes = [
			9, 0, 0, 0, 0, 0, 0, 0,
			0x05, 0x00,              // nested, 2 pixels
			0x00, 0x00, 0x00, 0x00,
			0x07, 1,                 // fill 3: overshoots the count of 2
			0x00, 0x00,
		];
		let (frame, _, position) = decode(&bytes);
		assert_eq!(frame.pixel_count(), 3);
		assert_eq!(position, bytes.len() as u64);
	}

	#[test]
	fn test_negative_key_is_empty_run() {
		#[rustfmt::skip]
		let bytes = [
			9, 0, 0, 0, 0, 0, 0, 0,
			0xFE, 0xFF,              // key -2: literal, count -1
			0x00, 0x00, 0x00, 0x00,
			0x00, 0x00,
		];
		let (frame, anomalies, position) = decode(&bytes);
		assert_eq!(frame.pixel_count(), 0);
		assert_eq!(
			anomalies,
			vec![Anomaly::NegativeRunCount {
				collection: 0,
				frame: 0,
				key: 0xFFFE,
			}]
		);
		assert_eq!(position, bytes.len() as u64);
	}

	#[test]
	fn test_canvas_bounds_clip_large_frames() {
		#[rustfmt::skip]
		let bytes = [
			0xE8, 0x03, 0, 0, 0, 0, 0, 0,   // x2=1000
			0x04, 0x00,                     // literal, 2 pixels
			0x3F, 0x01, 0x00, 0x00,         // dx=319
			1, 2,
			0x00, 0x00,
		];
		let (frame, anomalies, _) = decode(&bytes);
		assert_eq!(frame.pixels().len(), 1);
		assert_eq!(frame.pixels()[0].x, 319);
		assert_eq!(
			anomalies,
			vec![Anomaly::InvalidPixelCoordinate {
				collection: 0,
				frame: 0,
				x: 320,
				y: 0,
			}]
		);
	}

	#[test]
	fn test_frame_overrun() {
		let bytes = [0u8, 0, 0, 0, 0, 0, 0, 0, 0x02, 0x00, 0, 0, 0, 0, 1, 0, 0];
		let mut cursor = Cursor::new(&bytes[..]);
		let options = DecodeOptions::default().with_max_frame_bytes(12);
		let err = Frame::decode(
			&mut cursor,
			FrameId::new(2, 5),
			&Palette::grayscale(),
			&options,
			&mut Vec::<Anomaly>::new(),
		)
		.unwrap_err();
		assert!(matches!(
			err,
			VxxError::FrameOverrun {
				collection: 2,
				frame: 5,
				limit: 12
			}
		));
	}

	#[test]
	fn test_into_canvas_uses_name_and_size() {
		let frame = Frame::new(FrameId::new(1, 4), FrameGeometry::default(), Vec::new());
		let canvas = frame.into_canvas(&DecodeOptions::default().with_name_prefix("arrow"));
		assert_eq!(canvas.name(), "arrow1_4");
		assert_eq!((canvas.width(), canvas.height()), (320, 200));
	}
}
