//! Named canvases and the sink they are handed to.

use std::fmt;

use crate::file::VxxError;

use super::frame::Pixel;

/// A frame placed on the fixed-size output raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
	name: String,
	width: u32,
	height: u32,
	pixels: Vec<Pixel>,
}

impl Canvas {
	/// Creates a canvas from a pixel list.
	pub fn new(name: String, width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
		Self {
			name,
			width,
			height,
			pixels,
		}
	}

	/// Returns the canvas name, `"<prefix><collection>_<frame>"`.
	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the canvas width.
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the canvas height.
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the plotted pixels.
	#[inline]
	pub fn pixels(&self) -> &[Pixel] {
		&self.pixels
	}

	/// Renders the canvas as a dense RGBA buffer, row-major.
	///
	/// Unplotted pixels are fully transparent. A pixel plotted twice keeps the
	/// later color.
	pub fn to_rgba(&self) -> Vec<u8> {
		let mut data = vec![0u8; self.width as usize * self.height as usize * 4];
		for pixel in &self.pixels {
			if pixel.x >= self.width || pixel.y >= self.height {
				continue;
			}
			let start = (pixel.y as usize * self.width as usize + pixel.x as usize) * 4;
			data[start..start + 4].copy_from_slice(&pixel.color.to_rgba());
		}
		data
	}
}

impl fmt::Display for Canvas {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({}×{}, {} pixels)", self.name, self.width, self.height, self.pixels.len())
	}
}

/// Receiver for decoded canvases.
///
/// Raster encoding is the sink's business; the decoder never keeps a canvas
/// after handing it over.
pub trait CanvasSink {
	/// Takes ownership of one canvas.
	fn accept(&mut self, canvas: Canvas) -> Result<(), VxxError>;
}

/// Keeps every canvas in memory.
impl CanvasSink for Vec<Canvas> {
	fn accept(&mut self, canvas: Canvas) -> Result<(), VxxError> {
		self.push(canvas);
		Ok(())
	}
}

impl<S: CanvasSink + ?Sized> CanvasSink for &mut S {
	fn accept(&mut self, canvas: Canvas) -> Result<(), VxxError> {
		(**self).accept(canvas)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::pal::Color;

	#[test]
	fn test_to_rgba_places_pixels() {
		let red = Color::new(255, 0, 0);
		let canvas = Canvas::new(
			"vga0_0".to_string(),
			4,
			2,
			vec![Pixel {
				x: 3,
				y: 1,
				index: 7,
				color: red,
			}],
		);

		let rgba = canvas.to_rgba();
		assert_eq!(rgba.len(), 4 * 2 * 4);
		assert_eq!(&rgba[28..32], &[255, 0, 0, 255]);
		assert!(rgba[..28].iter().all(|&b| b == 0));
	}

	#[test]
	fn test_vec_sink() {
		let mut sink: Vec<Canvas> = Vec::new();
		sink.accept(Canvas::new("a".to_string(), 1, 1, Vec::new())).unwrap();
		assert_eq!(sink.len(), 1);
		assert_eq!(sink[0].to_string(), "a (1×1, 0 pixels)");
	}
}
