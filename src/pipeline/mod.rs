//! SLCSP pipeline: load targets, resolve rating areas, aggregate plan rates,
//! select the second lowest rate.
//!
//! Each stage fully drains its source before the next one starts. The
//! [`TargetSet`] is owned by the driver and lent to each stage in turn.

mod aggregator;
mod loader;
mod resolver;
mod selector;

pub use aggregator::{aggregate_from_source, aggregate_rates, aggregate_rates_from_reader, AggregateStats};
pub use loader::{load_targets, load_targets_from_reader, load_targets_from_source, TargetSet};
pub use resolver::{resolve_from_source, resolve_rate_areas, resolve_rate_areas_from_reader, ResolveStats};
pub use selector::{select_second_lowest, SlcspRow};

use crate::config::InputPaths;
use crate::error::Result;
use crate::rating::AreaResolution;
use serde::Serialize;
use std::io::Read;

/// Counts describing one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Zips in the target list, duplicates included
    pub targets: usize,
    /// Distinct target zips
    pub distinct_targets: usize,
    /// Distinct zips with exactly one rating area
    pub resolved: usize,
    /// Distinct zips with conflicting rating areas
    pub ambiguous: usize,
    /// Distinct zips absent from the zip table
    pub unresolved: usize,
    /// Output rows carrying a rate
    pub determined: usize,
    /// Silver plan rows that matched a target rating area
    pub matched_plans: u64,
}

/// Rows in output order plus the run summary
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub rows: Vec<SlcspRow>,
    pub summary: RunSummary,
}

/// Run every stage over the three input files
pub fn run_pipeline(paths: &InputPaths) -> Result<PipelineOutput> {
    let mut targets = load_targets(&paths.targets)?;
    resolve_rate_areas(&paths.zips, &mut targets)?;
    let aggregate = aggregate_rates(&paths.plans, &mut targets)?;
    Ok(finish(&targets, aggregate))
}

/// Run every stage over in-memory or otherwise already-open inputs
pub fn run_pipeline_from_readers<T: Read, Z: Read, P: Read>(
    targets: T,
    zips: Z,
    plans: P,
) -> Result<PipelineOutput> {
    let mut target_set = load_targets_from_reader(targets, "slcsp")?;
    resolve_rate_areas_from_reader(zips, "zips", &mut target_set)?;
    let aggregate = aggregate_rates_from_reader(plans, "plans", &mut target_set)?;
    Ok(finish(&target_set, aggregate))
}

fn finish(targets: &TargetSet, aggregate: AggregateStats) -> PipelineOutput {
    let rows = select_second_lowest(targets);
    let summary = summarize(targets, &rows, aggregate);
    PipelineOutput { rows, summary }
}

fn summarize(targets: &TargetSet, rows: &[SlcspRow], aggregate: AggregateStats) -> RunSummary {
    let mut summary = RunSummary {
        targets: targets.len(),
        distinct_targets: targets.distinct_len(),
        determined: rows.iter().filter(|row| row.rate.is_some()).count(),
        matched_plans: aggregate.matched_plans,
        ..Default::default()
    };

    for (_, record) in targets.records() {
        match record.resolution() {
            AreaResolution::Unset => summary.unresolved += 1,
            AreaResolution::Resolved(_) => summary.resolved += 1,
            AreaResolution::Ambiguous => summary.ambiguous += 1,
        }
    }

    summary
}
