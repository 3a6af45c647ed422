//! Test file types for `vxx-rs`

mod extract;
mod palette;
