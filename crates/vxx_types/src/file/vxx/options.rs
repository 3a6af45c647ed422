//! Decode options.

use serde::{Deserialize, Serialize};

use super::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_NAME_PREFIX};
use super::frame::FrameId;

/// Options shared by every frame decoded from one archive.
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
	/// Prefix of canvas names, `"<prefix><collection>_<frame>"`
	pub name_prefix: String,

	/// Canvas width in pixels
	pub canvas_width: u32,

	/// Canvas height in pixels
	pub canvas_height: u32,

	/// Upper bound on bytes read for a single frame, header included
	pub max_frame_bytes: Option<u64>,
}

impl DecodeOptions {
	/// Returns options with a different name prefix.
	pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.name_prefix = prefix.into();
		self
	}

	/// Returns options with a per-frame read limit.
	pub fn with_max_frame_bytes(mut self, limit: u64) -> Self {
		self.max_frame_bytes = Some(limit);
		self
	}

	/// Builds the canvas name for a frame.
	pub fn canvas_name(&self, id: FrameId) -> String {
		format!("{}{}_{}", self.name_prefix, id.collection, id.frame)
	}
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			name_prefix: DEFAULT_NAME_PREFIX.to_string(),
			canvas_width: CANVAS_WIDTH,
			canvas_height: CANVAS_HEIGHT,
			max_frame_bytes: None,
		}
	}
}
