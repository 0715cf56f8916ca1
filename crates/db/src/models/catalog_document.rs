//! Rows of the `mapcamera_search_docs` table.

use ingest_core::catalog::{CatalogFields, CatalogRecord};
use ingest_core::types::EpochMillis;
use serde::Serialize;
use sqlx::FromRow;

/// A stored catalog listing, flat as in the table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogDocumentRow {
    pub genpin_id: i64,
    pub genpin_name: Option<String>,
    pub jancode: Option<String>,
    pub mapcode: Option<String>,
    pub maker_name_kana: Option<String>,
    pub salesprice: Option<i64>,
    pub specialprice: Option<i64>,
    pub selltypeid: Option<i32>,
    pub conditionid: Option<i32>,
    pub sellstatusid: Option<i32>,
    pub pricedownflag: Option<i32>,
    pub recommendflag: Option<i32>,
    pub econlyflag: Option<i32>,
    pub newstockflag: Option<i32>,
    pub limitedflag: Option<i32>,
    pub newproductflag: Option<i32>,
    pub raremodelflag: Option<i32>,
    pub beginnerflag: Option<i32>,
    pub businessflag: Option<i32>,
    pub reviewcount: Option<i32>,
    pub reviewrating: Option<f64>,
    pub point: Option<i64>,
    pub subtitle: Option<String>,
    pub usednum: Option<i32>,
    pub usedsalespricemin: Option<i64>,
    pub usedsalespointmin: Option<i64>,
    pub accessories: Option<String>,
    pub category_name: Option<String>,
    pub bestbadgeflag: Option<String>,
    pub usedconditionrank: Option<String>,
    pub logisticstockdispkbn: Option<i32>,
    pub videoflag: Option<i32>,
    pub updatetime: EpochMillis,
}

impl From<CatalogDocumentRow> for CatalogRecord {
    fn from(row: CatalogDocumentRow) -> Self {
        CatalogRecord {
            genpin_id: row.genpin_id,
            updatetime: row.updatetime,
            fields: CatalogFields {
                genpin_name: row.genpin_name,
                jancode: row.jancode,
                mapcode: row.mapcode,
                maker_name_kana: row.maker_name_kana,
                salesprice: row.salesprice,
                specialprice: row.specialprice,
                selltypeid: row.selltypeid,
                conditionid: row.conditionid,
                sellstatusid: row.sellstatusid,
                pricedownflag: row.pricedownflag,
                recommendflag: row.recommendflag,
                econlyflag: row.econlyflag,
                newstockflag: row.newstockflag,
                limitedflag: row.limitedflag,
                newproductflag: row.newproductflag,
                raremodelflag: row.raremodelflag,
                beginnerflag: row.beginnerflag,
                businessflag: row.businessflag,
                reviewcount: row.reviewcount,
                reviewrating: row.reviewrating,
                point: row.point,
                subtitle: row.subtitle,
                usednum: row.usednum,
                usedsalespricemin: row.usedsalespricemin,
                usedsalespointmin: row.usedsalespointmin,
                accessories: row.accessories,
                category_name: row.category_name,
                bestbadgeflag: row.bestbadgeflag,
                usedconditionrank: row.usedconditionrank,
                logisticstockdispkbn: row.logisticstockdispkbn,
                videoflag: row.videoflag,
            },
        }
    }
}
