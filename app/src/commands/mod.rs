//! FILENAME: app/src/commands/mod.rs
// PURPOSE: Command entry points for the presentation layer.

pub mod load;
pub mod view;

pub use load::*;
pub use view::*;
