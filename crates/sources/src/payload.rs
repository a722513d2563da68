//! Decoding the sheet endpoint's JSON document
//!
//! Success: `{ headers: [..], rows: [[..], ..], totalRows?, lastUpdate? }`
//! Failure: `{ error: true, message: ".." }`

use chrono::{DateTime, Utc};
use log::debug;
use serde_json::{Map, Value};
use sheet_pulse_types::{FetchError, RawValue, Row, Snapshot};

/// Decode a response body into a snapshot
pub fn decode_payload(body: &str, fetched_at: DateTime<Utc>) -> Result<Snapshot, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("body is not JSON: {}", e)))?;
    decode_value(value, fetched_at)
}

/// Decode an already-parsed document into a snapshot
fn decode_value(value: Value, fetched_at: DateTime<Utc>) -> Result<Snapshot, FetchError> {
    let Value::Object(mut document) = value else {
        return Err(FetchError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    };

    if let Some(message) = upstream_error(&document) {
        return Err(FetchError::Upstream(message));
    }

    let headers: Vec<String> = take_array(&mut document, "headers")?
        .into_iter()
        .map(|v| RawValue::from(v).to_text())
        .collect();

    let raw_rows = take_array(&mut document, "rows")?;
    let mut dropped = 0usize;
    let rows: Vec<Row> = raw_rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Array(cells) => Some(cells.into_iter().map(RawValue::from).collect()),
            _ => {
                dropped += 1;
                None
            }
        })
        .collect();

    if dropped > 0 {
        debug!("Dropped {} row entries that were not arrays", dropped);
    }

    let total_rows = document.get("totalRows").and_then(Value::as_u64);
    let last_update = document
        .get("lastUpdate")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Snapshot::new(headers, rows, fetched_at).with_upstream_meta(total_rows, last_update))
}

fn upstream_error(document: &Map<String, Value>) -> Option<String> {
    if document.get("error").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    let message = document
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("the endpoint reported an error without a message");
    Some(message.to_string())
}

fn take_array(document: &mut Map<String, Value>, key: &str) -> Result<Vec<Value>, FetchError> {
    match document.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        None | Some(Value::Null) => Err(FetchError::MalformedResponse(format!(
            "data not found: missing `{}`",
            key
        ))),
        Some(_) => Err(FetchError::MalformedResponse(format!(
            "`{}` is not an array",
            key
        ))),
    }
}
