//! Input enumeration: directory scanning and title derivation.

mod scan;
mod title;

pub use scan::{scan_dir, ImageEntry};
pub use title::{derive_title, title_case};
