//! This crate provides core data types and file format support for the `vxx-rs` project.
//!
//! # File Formats
//!
//! - **PAL**: 256-entry RGB palettes (768 bytes, no header)
//! - **VXX**: `.VGA` sprite archives holding collections of run-length encoded frames
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use vxx_types::prelude::*;
//!
//! # fn main() -> Result<(), VxxError> {
//! let palette = Palette::open("WC1.PAL")?;
//! let mut archive = VxxFile::open("ARROW.VGA")?;
//!
//! let mut canvases: Vec<Canvas> = Vec::new();
//! archive.extract(&palette, &mut canvases, &mut LogDiagnostics)?;
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use vxx_types::file::vxx::File;
//!
//! let archive = File::open("COCKPIT.VGA").unwrap();
//! println!("{archive}");
//! ```

pub mod file;

/// `use vxx_types::prelude::*;` to import commonly used items.
pub mod prelude;
