//! This module is separated into its own crate to keep the public facade of `vxx-rs` thin, and should not be used directly.

/// `use vxx_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export vxx_types for convenience
pub use vxx_types;

// Re-export commonly used types at crate root
pub use vxx_types::file::{FileType, Palette, VxxError, VxxFile};
