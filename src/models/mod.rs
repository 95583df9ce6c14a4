pub mod category;
pub mod product;
pub mod sale;
pub mod sale_item;
