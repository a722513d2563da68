//! sheet-pulse-sources: Snapshot source implementations.

mod http;
mod payload;
mod static_sheet;

pub use http::HttpSheetSource;
pub use payload::decode_payload;
pub use static_sheet::StaticSheetSource;

use anyhow::Result;
use sheet_pulse_core::SharedSnapshotSource;
use std::sync::Arc;

/// Build the source for an endpoint string.
///
/// `http://` and `https://` URLs are polled over HTTP; `file://` URLs and
/// anything else are treated as a path to a local JSON document.
pub fn source_for(endpoint: &str) -> Result<SharedSnapshotSource> {
    let endpoint = endpoint.trim();
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(Arc::new(HttpSheetSource::new(endpoint)?))
    } else {
        let path = endpoint.strip_prefix("file://").unwrap_or(endpoint);
        Ok(Arc::new(StaticSheetSource::new(path)))
    }
}
