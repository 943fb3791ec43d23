//! Shared utilities

pub mod color;

pub use color::{is_similar, rgb_of, ColorParser};
