pub mod health;
pub mod jewellery;
pub mod upload;
