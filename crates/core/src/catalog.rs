//! Catalog documents and the trigger-field merge policy.
//!
//! A document resubmitted under an existing `genpin_id` either replaces the
//! stored row entirely or leaves it untouched. The choice is made once per
//! document by comparing three trigger fields (JAN code, sales price,
//! special price) against the stored row. There is no per-field merge:
//! `updatetime` therefore records the last *material* change of a listing.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EpochMillis;
use crate::validation::{check_max_chars, require};

/// Maximum length of the batch-level `context` tag.
pub const MAX_CONTEXT_CHARS: usize = 16;

// ---------------------------------------------------------------------------
// Inbound DTOs
// ---------------------------------------------------------------------------

/// Every non-key attribute of a catalog listing.
///
/// Flags are the site's `1`/`0` integers and stay nullable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFields {
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
}

impl CatalogFields {
    /// The fields whose change gates a full overwrite.
    pub fn trigger_fields(&self) -> TriggerFields {
        TriggerFields {
            jancode: self.jancode.clone(),
            salesprice: self.salesprice,
            specialprice: self.specialprice,
        }
    }
}

/// A catalog document as posted. Unknown attributes are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    pub genpin_id: Option<i64>,
    #[serde(flatten)]
    pub fields: CatalogFields,
}

/// Request body for `POST /mapcamera-search-docs`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogBatch {
    pub docs: Vec<CatalogDocument>,
    /// Client submission time; becomes `updatetime` for every document.
    pub client_ts_ms: Option<EpochMillis>,
    pub page_url: Option<String>,
    pub context: Option<String>,
}

impl CatalogBatch {
    pub fn validate(&self) -> Result<(), CoreError> {
        check_max_chars("context", self.context.as_deref(), MAX_CONTEXT_CHARS)
    }
}

// ---------------------------------------------------------------------------
// Records and merge policy
// ---------------------------------------------------------------------------

/// A keyed, timestamped document ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub genpin_id: i64,
    pub fields: CatalogFields,
    pub updatetime: EpochMillis,
}

/// The trigger-field projection of a stored or incoming row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerFields {
    pub jancode: Option<String>,
    pub salesprice: Option<i64>,
    pub specialprice: Option<i64>,
}

/// Whether a colliding document replaces the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    ApplyIncoming,
    Keep,
}

/// What happened to one document during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Overwritten,
    Unchanged,
}

/// SQL `<=>` semantics: two nulls are equal, null never equals a value.
pub fn null_safe_eq<T: PartialEq>(a: &Option<T>, b: &Option<T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Decide, once for the whole row, whether `incoming` replaces `existing`.
pub fn merge_decision(existing: &TriggerFields, incoming: &TriggerFields) -> MergeDecision {
    let changed = !null_safe_eq(&incoming.jancode, &existing.jancode)
        || !null_safe_eq(&incoming.salesprice, &existing.salesprice)
        || !null_safe_eq(&incoming.specialprice, &existing.specialprice);

    if changed {
        MergeDecision::ApplyIncoming
    } else {
        MergeDecision::Keep
    }
}

/// Reconcile one incoming record against the stored one, in memory.
///
/// Returns the row as it must look afterwards.
pub fn apply(
    existing: Option<&CatalogRecord>,
    incoming: CatalogRecord,
) -> (CatalogRecord, MergeOutcome) {
    let Some(existing) = existing else {
        return (incoming, MergeOutcome::Inserted);
    };

    match merge_decision(
        &existing.fields.trigger_fields(),
        &incoming.fields.trigger_fields(),
    ) {
        MergeDecision::ApplyIncoming => (incoming, MergeOutcome::Overwritten),
        MergeDecision::Keep => (existing.clone(), MergeOutcome::Unchanged),
    }
}

/// Submission time if the client sent one, otherwise server time.
pub fn effective_timestamp(submitted_at_ms: Option<EpochMillis>, now_ms: EpochMillis) -> EpochMillis {
    submitted_at_ms.unwrap_or(now_ms)
}

/// Key and timestamp every document of a batch.
///
/// Fails without partial output if any document lacks `genpin_id`.
pub fn prepare_batch(
    docs: Vec<CatalogDocument>,
    submitted_at_ms: Option<EpochMillis>,
    now_ms: EpochMillis,
) -> Result<Vec<CatalogRecord>, CoreError> {
    let updatetime = effective_timestamp(submitted_at_ms, now_ms);
    docs.into_iter()
        .enumerate()
        .map(|(i, doc)| {
            let genpin_id = require(&format!("docs[{i}].genpin_id"), doc.genpin_id)?;
            Ok(CatalogRecord {
                genpin_id,
                fields: doc.fields,
                updatetime,
            })
        })
        .collect()
}

/// Per-outcome counts for one reconcile call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub inserted: u64,
    pub overwritten: u64,
    pub unchanged: u64,
}

impl ReconcileSummary {
    pub fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Inserted => self.inserted += 1,
            MergeOutcome::Overwritten => self.overwritten += 1,
            MergeOutcome::Unchanged => self.unchanged += 1,
        }
    }

    /// Documents processed, whatever their outcome.
    pub fn processed(&self) -> u64 {
        self.inserted + self.overwritten + self.unchanged
    }
}
