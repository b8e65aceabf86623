//! Target list loading
//!
//! Reads `slcsp.csv` into a [`TargetSet`]: the zips in input order plus one
//! empty [`RateRecord`] per distinct zip.

use crate::error::Result;
use crate::rating::RateRecord;
use crate::source::{RecordSource, SourceRow, TableKind};
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Row of the target list. The rate column is always empty on input.
#[derive(Debug, Deserialize)]
struct TargetRow {
    zipcode: String,
    #[allow(dead_code)]
    rate: String,
}

/// Target zips in input order with their rating records
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    order: Vec<String>,
    records: HashMap<String, RateRecord>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zip. Repeated zips keep their place in the order and share one record.
    pub fn push(&mut self, zipcode: impl Into<String>) {
        let zipcode = zipcode.into();
        self.records.entry(zipcode.clone()).or_default();
        self.order.push(zipcode);
    }

    /// Zips in input order, duplicates included
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, zipcode: &str) -> bool {
        self.records.contains_key(zipcode)
    }

    pub fn get(&self, zipcode: &str) -> Option<&RateRecord> {
        self.records.get(zipcode)
    }

    pub fn get_mut(&mut self, zipcode: &str) -> Option<&mut RateRecord> {
        self.records.get_mut(zipcode)
    }

    /// Distinct zips with their records, in no particular order
    pub fn records(&self) -> impl Iterator<Item = (&String, &RateRecord)> {
        self.records.iter()
    }

    /// Number of distinct zips
    pub fn distinct_len(&self) -> usize {
        self.records.len()
    }

    /// Number of zips in the input, duplicates included
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TargetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut targets = TargetSet::new();
        for zipcode in iter {
            targets.push(zipcode);
        }
        targets
    }
}

/// Load the target list from a file
pub fn load_targets<P: AsRef<Path>>(path: P) -> Result<TargetSet> {
    let mut source = RecordSource::open(path, TableKind::Targets)?;
    load_targets_from_source(&mut source)
}

/// Load the target list from any reader
pub fn load_targets_from_reader<R: Read>(reader: R, name: &str) -> Result<TargetSet> {
    let mut source = RecordSource::from_reader(reader, name, TableKind::Targets)?;
    load_targets_from_source(&mut source)
}

pub fn load_targets_from_source<R: Read>(source: &mut RecordSource<R>) -> Result<TargetSet> {
    let mut targets = TargetSet::new();
    source.for_each_row(|row: SourceRow<TargetRow>| {
        targets.push(row.value.zipcode);
        Ok(())
    })?;

    info!(
        "Loaded {} target zips ({} distinct) from {}",
        targets.len(),
        targets.distinct_len(),
        source.name()
    );
    Ok(targets)
}
