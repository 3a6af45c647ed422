//! Prelude module for `vxx_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use vxx_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let frame = FrameBuilder::new(0, 2, 0, 0).literal(0, 0, &[5, 9, 2]).build();
//! let bytes = ArchiveBuilder::new().collection(vec![frame]).build();
//!
//! let archive = VxxFile::from_bytes(bytes).unwrap();
//! assert_eq!(archive.table().frame_count(), 1);
//! ```

// Re-export everything from vxx_types::prelude
#[doc(inline)]
pub use vxx_types::prelude::*;

// Re-export the entire vxx_types module for advanced usage
#[doc(inline)]
pub use vxx_types;
