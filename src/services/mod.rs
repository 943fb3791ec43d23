//! Service layer
//!
//! Infrastructure concerns (file decoding and encoding) kept apart from the
//! pixel algorithms so those can be tested on in-memory buffers.

pub mod io;

pub use io::ImageIOService;
