//! Image encoding for export.
//!
//! Export always produces PNG: it is lossless and keeps the transparent
//! areas a rotation leaves behind.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 4]; // Gray image
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, encode_surface_png, EncodeError, PNG_CONTENT_TYPE};
