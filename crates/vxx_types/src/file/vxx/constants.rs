//! Constants used in VXX archives

/// Mask applied to every table entry; only the low 24 bits carry an offset
pub const OFFSET_MASK: u32 = 0x00FF_FFFF;

/// Size of a table entry in bytes
pub const OFFSET_ENTRY_SIZE: usize = 4;

/// Size of the `file_length` and `block_length` fields
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Size of the frame bounds header (`x2`, `x1`, `y1`, `y2`)
pub const FRAME_HEADER_SIZE: usize = 8;

/// Width of the output canvas every frame is plotted into
pub const CANVAS_WIDTH: u32 = 320;

/// Height of the output canvas every frame is plotted into
pub const CANVAS_HEIGHT: u32 = 200;

/// Default prefix for canvas names
pub const DEFAULT_NAME_PREFIX: &str = "vga";

/// Largest count a literal or nested key can carry
pub const MAX_KEY_COUNT: u16 = 0x3FFF;

/// Largest count a nested sub-key can carry
pub const MAX_SUB_KEY_COUNT: u8 = 0x7F;
