pub mod catalog;
pub mod logs;
pub mod product_detail;
pub mod remembered_asin;
