//! Source image decoding.
//!
//! Turns PNG/JPEG bytes into an RGBA [`Surface`](crate::surface::Surface)
//! at natural resolution, oriented the way a browser would display it.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let source = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", source.width, source.height);
//! ```

mod source;
mod types;

pub use source::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation};
