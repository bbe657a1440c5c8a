//! # Data block reader
//!
//! Everything after `META_END` is a table of time-tagged numeric records, one
//! per line, fields separated by whitespace:
//!
//! ```text
//! 2009-12-08T09:00:00.000  -2495.77  7055.08  -4.29  -7.57  -2.63  0.12
//! 54808 32460.0            -2949.05  6889.79  -155.59  -7.52  -2.88  -5.03
//! ```
//!
//! The epoch is either an isot timestamp in the first field, or a modified
//! julian day followed by the seconds of that day (CIC style). Blank lines and
//! `COMMENT` lines are skipped.
//!
//! The file-structure parser only depends on the [`TabularReader`] trait;
//! [`EphemerisTableReader`] is the implementation used by default.
//!
//! ## Time scale
//! -----------------
//! Epochs are read in the scale named by the `TIME_SYSTEM` metadata key when it
//! is one of `UTC`, `TAI`, `TT`, `TDB`, and in the reader default otherwise.
//! Rejecting an unsupported `TIME_SYSTEM` is left to the message validation.
use std::io::{BufRead, Read};

use csv::{ReaderBuilder, StringRecord};
use hifitime::{Epoch, TimeScale};
use itertools::Itertools;
use nalgebra::Vector3;
use tracing::{debug, trace};

use crate::{
    cic_errors::TableError,
    constants::{COMMENT_KEYWORD, TIME_SYSTEM},
    metadata::MetadataBlock,
    time::{mjd_seconds_to_epoch, parse_isot, time_scale_from_name},
};

/// Decodes the data block of a CIC file.
pub trait TabularReader {
    /// Read the whole remaining input into a table.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: the stream positioned right after the `META_END` line
    /// * `meta`: the metadata block already read from the same file
    fn read(&self, input: &mut dyn BufRead, meta: &MetadataBlock)
        -> Result<DataTable, TableError>;
}

/// Time-tagged numeric records.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    time_scale: TimeScale,
    epochs: Vec<Epoch>,
    rows: Vec<Vec<f64>>,
}

impl DataTable {
    /// Build a table from parallel epoch and row vectors.
    ///
    /// Return
    /// ------
    /// * `None` if `epochs` and `rows` differ in length
    pub fn new(time_scale: TimeScale, epochs: Vec<Epoch>, rows: Vec<Vec<f64>>) -> Option<Self> {
        (epochs.len() == rows.len()).then_some(DataTable {
            time_scale,
            epochs,
            rows,
        })
    }

    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Epoch, &[f64])> {
        self.epochs
            .iter()
            .zip(self.rows.iter().map(|row| row.as_slice()))
    }

    fn vectors(&self, offset: usize) -> Option<Vec<Vector3<f64>>> {
        self.rows
            .iter()
            .map(|row| {
                row.get(offset..offset + 3)
                    .map(|v| Vector3::new(v[0], v[1], v[2]))
            })
            .collect()
    }

    /// First three columns of each record as a vector (positions of an OEM).
    ///
    /// Return
    /// ------
    /// * `None` if a record has fewer than three values
    pub fn positions(&self) -> Option<Vec<Vector3<f64>>> {
        self.vectors(0)
    }

    /// Columns four to six of each record as a vector (velocities of an OEM).
    ///
    /// Return
    /// ------
    /// * `None` if a record has fewer than six values
    pub fn velocities(&self) -> Option<Vec<Vector3<f64>>> {
        self.vectors(3)
    }
}

/// Whitespace-separated reader built on the `csv` crate.
#[derive(Debug, Clone)]
pub struct EphemerisTableReader {
    default_time_scale: TimeScale,
}

impl Default for EphemerisTableReader {
    fn default() -> Self {
        EphemerisTableReader::new(TimeScale::UTC)
    }
}

impl EphemerisTableReader {
    /// Arguments
    /// ---------
    /// * `default_time_scale`: scale of the epochs when the metadata names none
    ///   this reader understands
    pub fn new(default_time_scale: TimeScale) -> Self {
        EphemerisTableReader { default_time_scale }
    }

    fn time_scale(&self, meta: &MetadataBlock) -> TimeScale {
        meta.get(TIME_SYSTEM)
            .and_then(time_scale_from_name)
            .unwrap_or(self.default_time_scale)
    }
}

/// Decode one record; `line` is the 1-based line number within the data block.
fn parse_record(
    record: &StringRecord,
    line: usize,
    time_scale: TimeScale,
) -> Result<(Epoch, Vec<f64>), TableError> {
    let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();

    let invalid_epoch = |count: usize| TableError::InvalidEpoch {
        line,
        value: fields.iter().take(count).join(" "),
    };

    let (epoch, values_start) = match fields.as_slice() {
        [first, ..] if first.contains('T') || first.contains('-') => {
            (
                parse_isot(first, time_scale).ok_or_else(|| invalid_epoch(1))?,
                1,
            )
        }
        [day, seconds, ..] => {
            let day = day.parse::<f64>().map_err(|_| invalid_epoch(2))?;
            let seconds = seconds.parse::<f64>().map_err(|_| invalid_epoch(2))?;
            (
                mjd_seconds_to_epoch(day, seconds, time_scale).ok_or_else(|| invalid_epoch(2))?,
                2,
            )
        }
        _ => return Err(invalid_epoch(fields.len())),
    };

    let values = fields[values_start..]
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value.parse::<f64>().map_err(|_| TableError::InvalidValue {
                line,
                field: values_start + index + 1,
                value: value.to_string(),
            })
        })
        .collect::<Result<Vec<f64>, TableError>>()?;

    Ok((epoch, values))
}

impl TabularReader for EphemerisTableReader {
    fn read(
        &self,
        input: &mut dyn BufRead,
        meta: &MetadataBlock,
    ) -> Result<DataTable, TableError> {
        let time_scale = self.time_scale(meta);

        let mut content = String::new();
        input.read_to_string(&mut content)?;

        // Runs of blanks are collapsed so that the csv reader sees one
        // delimiter between fields; the source line numbers are kept aside.
        let mut line_numbers = Vec::new();
        let mut normalized = String::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_KEYWORD) {
                trace!("data line {} skipped", index + 1);
                continue;
            }
            line_numbers.push(index + 1);
            normalized.push_str(&line.split_whitespace().join(" "));
            normalized.push('\n');
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(normalized.as_bytes());

        let mut epochs = Vec::with_capacity(line_numbers.len());
        let mut rows = Vec::with_capacity(line_numbers.len());
        for (record, line) in reader.records().zip(line_numbers) {
            let (epoch, values) = parse_record(&record?, line, time_scale)?;
            epochs.push(epoch);
            rows.push(values);
        }

        if epochs.is_empty() {
            return Err(TableError::Empty);
        }

        debug!("read {} data records in {:?}", epochs.len(), time_scale);
        Ok(DataTable {
            time_scale,
            epochs,
            rows,
        })
    }
}
