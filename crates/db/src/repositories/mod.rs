pub mod catalog_document_repo;
pub mod log_event_repo;
pub mod product_detail_repo;
pub mod remembered_asin_repo;

pub use catalog_document_repo::CatalogDocumentRepo;
pub use log_event_repo::LogEventRepo;
pub use product_detail_repo::ProductDetailRepo;
pub use remembered_asin_repo::RememberedAsinRepo;
