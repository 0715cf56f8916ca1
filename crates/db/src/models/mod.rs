pub mod catalog_document;
pub mod log_event;
pub mod product_detail;
pub mod remembered_asin;
