pub mod envelope;
pub mod multipart;
