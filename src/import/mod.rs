//! Uploaded image decoding into import buffers.

pub mod decode;
