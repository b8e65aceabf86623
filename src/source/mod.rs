//! Record sources for the three reference tables
//!
//! A [`RecordSource`] wraps a CSV reader with the fixed column count of its
//! table. The header row is consumed on construction; every data row is
//! checked against the column count before it is handed to a pipeline stage.

use crate::error::{Result, SlcspError};
use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The reference tables read by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Target zip codes (`zipcode,rate`)
    Targets,
    /// Zip to rating area associations (`zipcode,state,county_code,name,rate_area`)
    Zips,
    /// Plan catalog (`plan_id,state,metal_level,rate,rate_area`)
    Plans,
}

impl TableKind {
    /// Fixed number of columns in every row of this table
    pub fn field_count(self) -> usize {
        match self {
            TableKind::Targets => 2,
            TableKind::Zips => 5,
            TableKind::Plans => 5,
        }
    }

    /// Conventional file name of this table
    pub fn default_file_name(self) -> &'static str {
        match self {
            TableKind::Targets => "slcsp.csv",
            TableKind::Zips => "zips.csv",
            TableKind::Plans => "plans.csv",
        }
    }
}

/// A single data row together with its position in the source
#[derive(Debug)]
pub struct SourceRow<T> {
    pub line: Option<u64>,
    pub value: T,
}

/// Header-skipping, column-checked reader over one reference table
pub struct RecordSource<R: Read> {
    name: String,
    kind: TableKind,
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl RecordSource<File> {
    /// Open a table from disk. The file is closed when the source is dropped.
    pub fn open<P: AsRef<Path>>(path: P, kind: TableKind) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = File::open(path).map_err(|source| SlcspError::Open {
            source_name: name.clone(),
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, name, kind)
    }
}

impl<R: Read> RecordSource<R> {
    /// Wrap any reader. `name` identifies the source in error messages.
    pub fn from_reader(reader: R, name: impl Into<String>, kind: TableKind) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut source = Self {
            name: name.into(),
            kind,
            reader,
            record: StringRecord::new(),
        };

        // Skip first line (header)
        if !source.advance()? {
            return Err(SlcspError::MissingHeader {
                source_name: source.name,
            });
        }

        Ok(source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Read the next data row, deserialized positionally into `T`.
    /// Returns `Ok(None)` at end of input.
    pub fn next_row<T: DeserializeOwned>(&mut self) -> Result<Option<SourceRow<T>>> {
        if !self.advance()? {
            return Ok(None);
        }

        let line = self.current_line();
        let value = self
            .record
            .deserialize(None)
            .map_err(|source| SlcspError::SourceRead {
                source_name: self.name.clone(),
                line,
                source,
            })?;

        Ok(Some(SourceRow { line, value }))
    }

    /// Drain the source, applying `f` to every row in order.
    pub fn for_each_row<T, F>(&mut self, mut f: F) -> Result<u64>
    where
        T: DeserializeOwned,
        F: FnMut(SourceRow<T>) -> Result<()>,
    {
        let mut count = 0;
        while let Some(row) = self.next_row()? {
            f(row)?;
            count += 1;
        }
        Ok(count)
    }

    /// Read one raw record and check its column count
    fn advance(&mut self) -> Result<bool> {
        let more = self
            .reader
            .read_record(&mut self.record)
            .map_err(|source| SlcspError::SourceRead {
                source_name: self.name.clone(),
                line: source.position().map(|p| p.line()),
                source,
            })?;
        if !more {
            return Ok(false);
        }

        let expected = self.kind.field_count();
        if self.record.len() != expected {
            return Err(SlcspError::FieldCount {
                source_name: self.name.clone(),
                line: self.current_line(),
                expected,
                found: self.record.len(),
            });
        }

        Ok(true)
    }

    fn current_line(&self) -> Option<u64> {
        self.record.position().map(|p| p.line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Pair {
        zipcode: String,
        rate: String,
    }

    #[test]
    fn test_header_is_skipped() {
        let data = "zipcode,rate\n64148,\n67118,\n";
        let mut source = RecordSource::from_reader(data.as_bytes(), "slcsp.csv", TableKind::Targets)
            .expect("valid source");

        let first: SourceRow<Pair> = source.next_row().unwrap().unwrap();
        assert_eq!(first.value.zipcode, "64148");
        assert_eq!(first.value.rate, "");
        assert_eq!(first.line, Some(2));

        let second: SourceRow<Pair> = source.next_row().unwrap().unwrap();
        assert_eq!(second.value.zipcode, "67118");

        assert!(source.next_row::<Pair>().unwrap().is_none());
    }

    #[test]
    fn test_empty_source_is_missing_header() {
        let result = RecordSource::from_reader("".as_bytes(), "slcsp.csv", TableKind::Targets);
        assert!(matches!(result, Err(SlcspError::MissingHeader { .. })));
    }

    #[test]
    fn test_wrong_field_count() {
        let data = "zipcode,rate\n64148,,extra\n";
        let mut source = RecordSource::from_reader(data.as_bytes(), "slcsp.csv", TableKind::Targets)
            .unwrap();

        match source.next_row::<Pair>() {
            Err(SlcspError::FieldCount { expected, found, line, .. }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
                assert_eq!(line, Some(2));
            }
            other => panic!("expected field count error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_field_count_checked() {
        let data = "zipcode\n64148\n";
        let result = RecordSource::from_reader(data.as_bytes(), "slcsp.csv", TableKind::Targets);
        assert!(matches!(result, Err(SlcspError::FieldCount { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = RecordSource::open("does/not/exist/zips.csv", TableKind::Zips);
        match result {
            Err(err @ SlcspError::Open { .. }) => {
                assert!(err.is_source_read());
                assert!(err.to_string().contains("zips.csv"));
            }
            _ => panic!("expected open error"),
        }
    }

    #[test]
    fn test_for_each_row_counts() {
        let data = "zipcode,rate\n1,\n2,\n3,\n";
        let mut source = RecordSource::from_reader(data.as_bytes(), "slcsp.csv", TableKind::Targets)
            .unwrap();
        let mut zips = Vec::new();
        let count = source
            .for_each_row(|row: SourceRow<Pair>| {
                zips.push(row.value.zipcode);
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(zips, vec!["1", "2", "3"]);
    }
}
