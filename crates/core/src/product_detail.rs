//! Product detail records keyed by (JAN code, generic-product id).
//!
//! Unlike catalog documents these are overwritten wholesale on every
//! resubmission.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::require;

/// A product detail as posted (camelCase JSON).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub jan: Option<String>,
    pub genpin_id: Option<i64>,
    pub price: Option<i64>,
    pub condition_code: Option<String>,
    pub description: Option<String>,
    /// Unix seconds.
    pub unixtime: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// A product detail with both key parts present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetailRecord {
    pub jan: String,
    pub genpin_id: i64,
    pub price: Option<i64>,
    pub condition_code: Option<String>,
    pub description: Option<String>,
    pub unixtime: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl ProductDetail {
    /// Fail closed unless both `jan` and `genpinId` are present.
    pub fn into_record(self) -> Result<ProductDetailRecord, CoreError> {
        let jan = require("jan", self.jan.filter(|j| !j.trim().is_empty()))?;
        let genpin_id = require("genpinId", self.genpin_id)?;

        Ok(ProductDetailRecord {
            jan,
            genpin_id,
            price: self.price,
            condition_code: self.condition_code,
            description: self.description,
            unixtime: self.unixtime,
            date: self.date,
            time: self.time,
        })
    }
}
