//! API constants
//!
//! Route paths and multipart field names shared by the router, handlers and tests.

/// API base path prefix (version-independent)
pub const API_BASE: &str = "/api";

/// Texture upload route
pub const TEXTURES_PATH: &str = "/api/v0/textures";

/// Multipart field carrying the uploaded textures
pub const IMAGES_FIELD: &str = "images";

/// Bracketed form of [`IMAGES_FIELD`] used by clients that send several files
pub const IMAGES_FIELD_MULTI: &str = "images[]";

/// Content type of every envelope response
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
