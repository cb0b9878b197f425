pub mod filename;
pub mod geo;
pub mod image_payload;
