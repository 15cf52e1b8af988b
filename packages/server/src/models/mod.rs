pub mod jewellery;
pub mod shared;
pub mod upload;
