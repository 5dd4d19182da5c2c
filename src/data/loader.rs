//! CSV ingest. The dataset is deliberately re-read on every request so the
//! API always reflects the file on disk.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::types::{BattedBallEvent, RawEvent};

/// Loads every row of the batted-ball CSV, missing cells and all.
pub fn load_events(path: &Path) -> Result<Vec<RawEvent>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut events = Vec::new();
    for record in reader.deserialize() {
        let event: RawEvent = record?;
        events.push(event);
    }
    debug!(rows = events.len(), path = %path.display(), "loaded batted-ball CSV");
    Ok(events)
}

/// Loads the CSV and drops every row with a missing or non-finite field.
/// This is the contract of the listing endpoint.
pub fn load_complete_events(path: &Path) -> Result<Vec<BattedBallEvent>> {
    let events = load_events(path)?;
    Ok(events.iter().filter_map(RawEvent::complete).collect())
}
