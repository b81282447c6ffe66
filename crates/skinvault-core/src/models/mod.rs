pub mod envelope;
pub mod texture;
pub mod upload;

pub use envelope::ApiEnvelope;
pub use texture::{size_in_kb, NewTexture, ParsedName, TextureRecord, Variant};
pub use upload::{BatchSummary, ProcessingResult, UploadedFile};
