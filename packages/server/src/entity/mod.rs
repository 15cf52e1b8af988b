pub mod jewellery;
