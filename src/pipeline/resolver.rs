//! Rating area resolution
//!
//! Attaches a rating area to every target zip from `zips.csv`. A zip listed
//! under two different rating areas is flagged ambiguous for good.

use super::TargetSet;
use crate::error::Result;
use crate::rating::{Observation, RateArea};
use crate::source::{RecordSource, SourceRow, TableKind};
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ZipRow {
    zipcode: String,
    state: String,
    #[allow(dead_code)]
    county_code: String,
    #[allow(dead_code)]
    name: String,
    rate_area: String,
}

/// Counts from one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Rows read from the zip table
    pub rows: u64,
    /// Rows whose zip is a target
    pub matched_rows: u64,
    /// Zips that became ambiguous during this pass
    pub conflicts: u64,
}

pub fn resolve_rate_areas<P: AsRef<Path>>(path: P, targets: &mut TargetSet) -> Result<ResolveStats> {
    let mut source = RecordSource::open(path, TableKind::Zips)?;
    resolve_from_source(&mut source, targets)
}

pub fn resolve_rate_areas_from_reader<R: Read>(
    reader: R,
    name: &str,
    targets: &mut TargetSet,
) -> Result<ResolveStats> {
    let mut source = RecordSource::from_reader(reader, name, TableKind::Zips)?;
    resolve_from_source(&mut source, targets)
}

pub fn resolve_from_source<R: Read>(
    source: &mut RecordSource<R>,
    targets: &mut TargetSet,
) -> Result<ResolveStats> {
    let mut stats = ResolveStats::default();

    stats.rows = source.for_each_row(|row: SourceRow<ZipRow>| {
        let zip = row.value;
        // Zips outside the target list are expected and skipped
        let Some(record) = targets.get_mut(&zip.zipcode) else {
            return Ok(());
        };
        stats.matched_rows += 1;

        let area = RateArea::new(zip.state, zip.rate_area);
        let previous = record.rate_area().cloned();
        match record.observe_area(area.clone()) {
            Observation::Recorded => debug!("{} -> {}", zip.zipcode, area),
            Observation::Conflict => {
                stats.conflicts += 1;
                warn!(
                    "{} maps to both {} and {}, marking ambiguous",
                    zip.zipcode,
                    previous.map(|a| a.to_string()).unwrap_or_default(),
                    area
                );
            }
            Observation::Unchanged | Observation::AlreadyAmbiguous => {}
        }
        Ok(())
    })?;

    info!(
        "Resolved rating areas from {}: {} rows, {} matched targets, {} ambiguous zips",
        source.name(),
        stats.rows,
        stats.matched_rows,
        stats.conflicts
    );
    Ok(stats)
}
