//! Client-side network events captured by the browser instrumentation.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::payload::{classify, ClassifiedPayload};
use crate::types::EpochMillis;
use crate::validation::check_max_chars;

/// Maximum length of `session_id` and `trace_id`.
pub const MAX_ID_CHARS: usize = 64;

/// Maximum length of `context` and `method`.
pub const MAX_TAG_CHARS: usize = 16;

/// Maximum length of `content_type`.
pub const MAX_CONTENT_TYPE_CHARS: usize = 255;

/// One observed request/response pair, as posted by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogEvent {
    pub client_ts_ms: Option<EpochMillis>,
    pub session_id: Option<String>,
    pub trace_id: Option<String>,
    pub page_url: Option<String>,
    /// Capture mechanism, e.g. `"xhr"` or `"fetch"`.
    pub context: Option<String>,
    pub method: Option<String>,
    pub url: Option<String>,
    pub status: Option<i32>,
    pub content_type: Option<String>,
    pub request_body: Option<Value>,
    pub response_body: Option<Value>,
}

/// Request body for `POST /ingest`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogBatch {
    pub items: Vec<LogEvent>,
}

/// A validated event with its bodies split into storage slots.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub client_ts_ms: Option<EpochMillis>,
    pub session_id: Option<String>,
    pub trace_id: Option<String>,
    pub page_url: Option<String>,
    pub context: Option<String>,
    pub method: Option<String>,
    pub url: Option<String>,
    pub status: Option<i32>,
    pub content_type: Option<String>,
    pub request_body: ClassifiedPayload,
    pub response_body: ClassifiedPayload,
}

impl LogEvent {
    /// Check field lengths and classify both bodies.
    pub fn into_record(self) -> Result<LogRecord, CoreError> {
        check_max_chars("session_id", self.session_id.as_deref(), MAX_ID_CHARS)?;
        check_max_chars("trace_id", self.trace_id.as_deref(), MAX_ID_CHARS)?;
        check_max_chars("context", self.context.as_deref(), MAX_TAG_CHARS)?;
        check_max_chars("method", self.method.as_deref(), MAX_TAG_CHARS)?;
        check_max_chars(
            "content_type",
            self.content_type.as_deref(),
            MAX_CONTENT_TYPE_CHARS,
        )?;

        Ok(LogRecord {
            request_body: classify(self.request_body.as_ref()),
            response_body: classify(self.response_body.as_ref()),
            client_ts_ms: self.client_ts_ms,
            session_id: self.session_id,
            trace_id: self.trace_id,
            page_url: self.page_url,
            context: self.context,
            method: self.method,
            url: self.url,
            status: self.status,
            content_type: self.content_type,
        })
    }
}

/// Validate a whole batch. One bad event rejects the batch, naming its index.
pub fn prepare_batch(events: Vec<LogEvent>) -> Result<Vec<LogRecord>, CoreError> {
    events
        .into_iter()
        .enumerate()
        .map(|(i, event)| {
            event.into_record().map_err(|e| match e {
                CoreError::Validation(msg) => CoreError::Validation(format!("items[{i}]: {msg}")),
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn bodies_are_classified_independently() {
        let event: LogEvent = serde_json::from_value(json!({
            "trace_id": "t-1",
            "method": "POST",
            "request_body": "q=camera",
            "response_body": {"docs": []}
        }))
        .unwrap();

        let record = event.into_record().unwrap();
        assert_eq!(record.request_body.text.as_deref(), Some("q=camera"));
        assert!(record.request_body.json.is_none());
        assert_eq!(record.response_body.json.as_deref(), Some(r#"{"docs":[]}"#));
        assert!(record.response_body.text.is_none());
    }

    #[test]
    fn empty_event_is_valid() {
        let record = LogEvent::default().into_record().unwrap();
        assert_eq!(record.request_body, ClassifiedPayload::default());
        assert_eq!(record.response_body, ClassifiedPayload::default());
    }

    #[test]
    fn long_session_id_is_rejected() {
        let event = LogEvent {
            session_id: Some("s".repeat(65)),
            ..Default::default()
        };
        assert_matches!(event.into_record(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn batch_error_names_the_item() {
        let events = vec![
            LogEvent::default(),
            LogEvent {
                method: Some("X".repeat(17)),
                ..Default::default()
            },
        ];
        assert_matches!(
            prepare_batch(events),
            Err(CoreError::Validation(msg)) if msg.starts_with("items[1]: method")
        );
    }

    #[test]
    fn batch_keeps_order() {
        let events = (0..3)
            .map(|i| LogEvent {
                trace_id: Some(format!("t-{i}")),
                ..Default::default()
            })
            .collect();
        let records = prepare_batch(events).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.trace_id.as_deref().unwrap()).collect();
        assert_eq!(ids, ["t-0", "t-1", "t-2"]);
    }
}
