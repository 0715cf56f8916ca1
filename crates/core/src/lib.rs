//! Domain layer of the ingest service.
//!
//! Holds validation, the payload classifier and the catalog merge policy.
//! Nothing in here performs I/O; storage lives in `ingest-db`.

pub mod catalog;
pub mod credentials;
pub mod error;
pub mod log_event;
pub mod payload;
pub mod product_detail;
pub mod remembered_asin;
pub mod types;
pub mod validation;
