pub mod health;
pub mod texture_upload;
