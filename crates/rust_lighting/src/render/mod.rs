//! # Rendering Support
//!
//! Backend-independent pieces of the renderer: light sources and the
//! constant buffer interface they are uploaded through.

pub mod constant_buffer;
pub mod lighting;

pub use constant_buffer::{BufferError, ConstantBuffer, HostConstantBuffer};
