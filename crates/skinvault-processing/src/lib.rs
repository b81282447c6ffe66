//! Skinvault Processing Library
//!
//! Per-file validation of uploaded textures: size ceiling, extension, sniffed
//! content type and filename pattern.

pub mod validator;

pub use validator::{sniff_mime, TextureValidator, ValidatedTexture, ValidationError};
