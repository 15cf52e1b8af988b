pub mod filter;
pub mod image_file;
