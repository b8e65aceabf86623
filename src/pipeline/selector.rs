//! Second lowest rate selection

use super::TargetSet;
use serde::{Serialize, Serializer};

/// One output line: a target zip and its SLCSP rate, if determinable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlcspRow {
    pub zipcode: String,
    #[serde(serialize_with = "two_decimals")]
    pub rate: Option<f64>,
}

/// Pick the second lowest rate for every target zip, in input order.
/// Duplicate zips produce one row per occurrence.
pub fn select_second_lowest(targets: &TargetSet) -> Vec<SlcspRow> {
    targets
        .order()
        .iter()
        .map(|zipcode| SlcspRow {
            zipcode: zipcode.clone(),
            rate: targets.get(zipcode).and_then(|record| record.second_lowest()),
        })
        .collect()
}

/// Rates are written with exactly two decimals; a missing rate is an empty field
fn two_decimals<S: Serializer>(rate: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match rate {
        Some(rate) => serializer.serialize_str(&format!("{:.2}", rate)),
        None => serializer.serialize_none(),
    }
}
