//! Run-length control keys.
//!
//! Both key levels pack a mode flag into bit 0 and a count into the remaining
//! bits:
//!
//! ```text
//! key  (i16): [ count : 15 ][ mode : 1 ]   mode 0 = literal, 1 = nested
//! key2 (u8) : [ count :  7 ][ mode : 1 ]   mode 0 = literal, 1 = fill
//! ```

/// Decoded top-level run key.
///
/// The count is an arithmetic shift of the signed key, so a key with the sign
/// bit set yields a negative count. Such runs contain no pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
	/// `count` color bytes follow, one pixel each
	Literal(i16),
	/// Sub-keys follow until `count` pixels have been produced
	Nested(i16),
}

impl RunKind {
	/// Decodes a key, or returns `None` for the zero terminator.
	pub const fn decode(key: i16) -> Option<Self> {
		if key == 0 {
			return None;
		}

		let count = key >> 1;
		Some(if key & 1 == 0 {
			Self::Literal(count)
		} else {
			Self::Nested(count)
		})
	}

	/// Packs the run back into a key.
	pub const fn encode(self) -> i16 {
		match self {
			Self::Literal(count) => count << 1,
			Self::Nested(count) => (count << 1) | 1,
		}
	}

	/// Returns the pixel count carried by the key.
	pub const fn count(self) -> i16 {
		match self {
			Self::Literal(count) | Self::Nested(count) => count,
		}
	}
}

/// Decoded sub-key inside a nested run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubRun {
	/// `count` color bytes follow, one pixel each
	Literal(u8),
	/// A single color byte follows and is repeated `count` times
	Fill(u8),
}

impl SubRun {
	/// Decodes a sub-key byte.
	pub const fn decode(key: u8) -> Self {
		let count = key >> 1;
		if key & 1 == 0 {
			Self::Literal(count)
		} else {
			Self::Fill(count)
		}
	}

	/// Packs the sub-run back into a sub-key byte.
	pub const fn encode(self) -> u8 {
		match self {
			Self::Literal(count) => count << 1,
			Self::Fill(count) => (count << 1) | 1,
		}
	}

	/// Returns the pixel count carried by the sub-key.
	pub const fn count(self) -> u8 {
		match self {
			Self::Literal(count) | Self::Fill(count) => count,
		}
	}
}
