//! Plan rate aggregation
//!
//! Streams `plans.csv` and appends every Silver rate to the target zips that
//! resolved to the plan's rating area.

use super::TargetSet;
use crate::error::{Result, SlcspError};
use crate::rating::{RateArea, TARGET_TIER};
use crate::source::{RecordSource, SourceRow, TableKind};
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PlanRow {
    #[allow(dead_code)]
    plan_id: String,
    state: String,
    metal_level: String,
    rate: String,
    rate_area: String,
}

/// Counts from one aggregation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Rows read from the plan catalog
    pub rows: u64,
    /// Silver rows whose rating area belongs to at least one target zip
    pub matched_plans: u64,
    /// Rates appended across all zips
    pub rates_added: u64,
}

pub fn aggregate_rates<P: AsRef<Path>>(path: P, targets: &mut TargetSet) -> Result<AggregateStats> {
    let mut source = RecordSource::open(path, TableKind::Plans)?;
    aggregate_from_source(&mut source, targets)
}

pub fn aggregate_rates_from_reader<R: Read>(
    reader: R,
    name: &str,
    targets: &mut TargetSet,
) -> Result<AggregateStats> {
    let mut source = RecordSource::from_reader(reader, name, TableKind::Plans)?;
    aggregate_from_source(&mut source, targets)
}

pub fn aggregate_from_source<R: Read>(
    source: &mut RecordSource<R>,
    targets: &mut TargetSet,
) -> Result<AggregateStats> {
    // Resolution is finished, so the area -> zips index is fixed for this pass.
    // Ambiguous and unresolved zips have no area and never appear in it.
    let index = area_index(targets);
    let name = source.name().to_string();
    let mut stats = AggregateStats::default();

    stats.rows = source.for_each_row(|row: SourceRow<PlanRow>| {
        let plan = row.value;
        // Every rate must parse, whatever its tier
        let rate = parse_rate(&plan.rate).ok_or_else(|| SlcspError::RateParse {
            source_name: name.clone(),
            line: row.line,
            value: plan.rate.clone(),
        })?;

        if plan.metal_level != TARGET_TIER {
            return Ok(());
        }

        let area = RateArea::new(plan.state, plan.rate_area);
        let Some(zips) = index.get(&area) else {
            return Ok(());
        };
        stats.matched_plans += 1;

        for zip in zips {
            if let Some(record) = targets.get_mut(zip) {
                if record.push_rate(rate) {
                    stats.rates_added += 1;
                }
            }
        }
        Ok(())
    })?;

    info!(
        "Aggregated {} plan rows from {}: {} {} plans matched, {} rates collected",
        stats.rows, name, stats.matched_plans, TARGET_TIER, stats.rates_added
    );
    Ok(stats)
}

/// Map each resolved rating area to the target zips inside it
fn area_index(targets: &TargetSet) -> HashMap<RateArea, Vec<String>> {
    let mut index: HashMap<RateArea, Vec<String>> = HashMap::new();
    for (zip, record) in targets.records() {
        if let Some(area) = record.rate_area() {
            index.entry(area.clone()).or_default().push(zip.clone());
        }
    }
    index
}

/// Parse a monthly premium. Only finite decimal numbers are accepted.
fn parse_rate(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|rate| rate.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::resolve_rate_areas_from_reader;
    use approx::assert_relative_eq;

    const PLAN_HEADER: &str = "plan_id,state,metal_level,rate,rate_area\n";

    fn resolved_targets(zips: &[&str], zip_rows: &str) -> TargetSet {
        let mut targets: TargetSet = zips.iter().copied().collect();
        let data = format!("zipcode,state,county_code,name,rate_area\n{}", zip_rows);
        resolve_rate_areas_from_reader(data.as_bytes(), "zips.csv", &mut targets).unwrap();
        targets
    }

    fn aggregate(targets: &mut TargetSet, plan_rows: &str) -> Result<AggregateStats> {
        let data = format!("{}{}", PLAN_HEADER, plan_rows);
        aggregate_rates_from_reader(data.as_bytes(), "plans.csv", targets)
    }

    #[test]
    fn test_only_silver_in_area_counts() {
        let mut targets = resolved_targets(&["64148"], "64148,KS,20091,Johnson,2\n");
        let stats = aggregate(
            &mut targets,
            "A1,KS,Silver,198.25,2\n\
             A2,KS,Bronze,150.00,2\n\
             A3,KS,Silver,207.60,2\n\
             A4,KS,Silver,207.60,2\n\
             A5,KS,Silver,100.00,3\n\
             A6,MO,Silver,100.00,2\n",
        )
        .unwrap();

        assert_eq!(stats.rows, 6);
        assert_eq!(stats.matched_plans, 3);
        let mut rates = targets.get("64148").unwrap().rates().to_vec();
        rates.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(rates.len(), 3);
        assert_relative_eq!(rates[0], 198.25);
        assert_relative_eq!(rates[1], 207.60);
        assert_relative_eq!(rates[2], 207.60);
    }

    #[test]
    fn test_tier_match_is_exact() {
        let mut targets = resolved_targets(&["64148"], "64148,KS,20091,Johnson,2\n");
        aggregate(&mut targets, "A1,KS,silver,198.25,2\nA2,KS,Silver ,198.25,2\n").unwrap();
        assert!(targets.get("64148").unwrap().rates().is_empty());
    }

    #[test]
    fn test_one_plan_feeds_every_zip_in_area() {
        let mut targets = resolved_targets(
            &["64148", "66202"],
            "64148,KS,20091,Johnson,2\n66202,KS,20091,Johnson,2\n",
        );
        let stats = aggregate(&mut targets, "A1,KS,Silver,198.25,2\n").unwrap();
        assert_eq!(stats.matched_plans, 1);
        assert_eq!(stats.rates_added, 2);
        assert_eq!(targets.get("64148").unwrap().rates().len(), 1);
        assert_eq!(targets.get("66202").unwrap().rates().len(), 1);
    }

    #[test]
    fn test_ambiguous_zip_collects_nothing() {
        let mut targets = resolved_targets(
            &["36749"],
            "36749,AL,01001,Autauga,9\n36749,AL,01085,Lowndes,7\n",
        );
        aggregate(
            &mut targets,
            "B1,AL,Silver,300.00,9\nB2,AL,Silver,310.00,9\nB3,AL,Silver,320.00,7\n",
        )
        .unwrap();
        assert!(targets.get("36749").unwrap().rates().is_empty());
    }

    #[test]
    fn test_invalid_rate_aborts() {
        let mut targets = resolved_targets(&["64148"], "64148,KS,20091,Johnson,2\n");
        let err = aggregate(&mut targets, "A1,KS,Silver,198.25,2\nA2,KS,Bronze,abc,2\n")
            .unwrap_err();
        match err {
            SlcspError::RateParse { value, line, source_name } => {
                assert_eq!(value, "abc");
                assert_eq!(line, Some(3));
                assert_eq!(source_name, "plans.csv");
            }
            other => panic!("expected rate parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_non_finite_rates_rejected() {
        assert!(parse_rate("").is_none());
        assert!(parse_rate("NaN").is_none());
        assert!(parse_rate("inf").is_none());
        assert_relative_eq!(parse_rate("245.2").unwrap(), 245.2);
    }
}
