//! `.PAL` palette support.
//!
//! Archives store color indices only; the colors themselves live in a separate
//! palette file.
//!
//! # File Format
//!
//! ```text
//! Offset  Size  Description
//! ------  ----  -----------------------------
//! 0x000   3     Color 0 (R, G, B)
//! 0x003   3     Color 1 (R, G, B)
//! ...
//! 0x2FD   3     Color 255 (R, G, B)
//! ```
//!
//! The file has no header and must be exactly 768 bytes long.
//!
//! # Example
//!
//! ```no_run
//! use vxx_types::file::pal::Palette;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let palette = Palette::open("WC1.PAL")?;
//! println!("Color 15: {}", palette[15]);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::file::VxxError;

/// Plain RGB color.
///
/// Alpha is a presentation concern and is only added by [`Color::to_rgba`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
}

impl Color {
	/// Creates a new RGB color.
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self {
			r,
			g,
			b,
		}
	}

	/// Creates a new grayscale color.
	pub const fn gray(value: u8) -> Self {
		Self::new(value, value, value)
	}

	/// Returns the color as fully opaque RGBA bytes.
	pub const fn to_rgba(self) -> [u8; 4] {
		[self.r, self.g, self.b, 0xFF]
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
	}
}

/// 256-color palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	colors: [Color; 256],
}

impl Palette {
	/// Number of colors in a palette
	pub const COLOR_COUNT: usize = 256;

	/// Size of a palette file in bytes (256 colors × 3 bytes)
	pub const FILE_SIZE: usize = Self::COLOR_COUNT * 3;

	/// Creates a palette from a color array.
	pub const fn from_colors(colors: [Color; 256]) -> Self {
		Self {
			colors,
		}
	}

	/// Creates a grayscale palette where every color matches its index.
	///
	/// Handy for inspecting archives when the real palette is missing.
	pub fn grayscale() -> Self {
		let mut colors = [Color::default(); 256];
		for (i, color) in colors.iter_mut().enumerate() {
			*color = Color::gray(i as u8);
		}
		Self::from_colors(colors)
	}

	/// Loads a palette from a file.
	///
	/// # Errors
	///
	/// Returns [`VxxError::PaletteSize`] if the file is not exactly
	/// [`Palette::FILE_SIZE`] bytes, or an IO error if it cannot be read.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, VxxError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Loads a palette from a reader, consuming it to the end.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, VxxError> {
		let mut data = Vec::with_capacity(Self::FILE_SIZE);
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Loads a palette from raw bytes.
	///
	/// # Errors
	///
	/// Returns [`VxxError::PaletteSize`] unless `data` holds exactly 768 bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, VxxError> {
		if data.len() != Self::FILE_SIZE {
			return Err(VxxError::PaletteSize {
				expected: Self::FILE_SIZE,
				actual: data.len(),
			});
		}

		let mut colors = [Color::default(); 256];
		for (color, rgb) in colors.iter_mut().zip(data.chunks_exact(3)) {
			*color = Color::new(rgb[0], rgb[1], rgb[2]);
		}

		Ok(Self::from_colors(colors))
	}

	/// Gets a color by index.
	#[inline]
	pub fn get(&self, index: u8) -> Color {
		self.colors[index as usize]
	}

	/// Returns a reference to the color array.
	#[inline]
	pub fn colors(&self) -> &[Color; 256] {
		&self.colors
	}

	/// Serializes the palette back to the 768-byte file layout.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut data = Vec::with_capacity(Self::FILE_SIZE);
		for color in &self.colors {
			data.extend_from_slice(&[color.r, color.g, color.b]);
		}
		data
	}

	/// Saves the palette to disk.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), VxxError> {
		std::fs::write(path, self.to_bytes())?;
		Ok(())
	}

	/// Returns an iterator over palette colors.
	pub fn iter(&self) -> impl Iterator<Item = &Color> {
		self.colors.iter()
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::grayscale()
	}
}

impl fmt::Display for Palette {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Palette: {} colors", Self::COLOR_COUNT)
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = Color;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[index as usize]
	}
}
