use hifitime::TimeScale;
use thiserror::Error;

use crate::header::MessageKind;

/// Validation failures raised while building a [`Header`](crate::header::Header).
#[derive(Error, Debug, PartialEq)]
pub enum HeaderError {
    #[error("Unsupported CIC type: {0}")]
    UnsupportedKind(String),

    #[error("Invalid version number: {0:?}")]
    InvalidVersion(String),

    #[error("Unsupported time scale: {0:?}")]
    UnsupportedTimeScale(TimeScale),

    #[error("Creation date must be a scalar, got {0} values")]
    NonScalarDate(usize),

    #[error("Invalid date format: {0:?}")]
    InvalidDateFormat(String),

    #[error("Invalid date type: {0}")]
    InvalidDateType(String),
}

/// Kind-specific validation failures raised while building a message variant.
#[derive(Error, Debug, PartialEq)]
pub enum MessageError {
    #[error("Expected a {expected} message, found {found}")]
    KindMismatch {
        expected: MessageKind,
        found: MessageKind,
    },

    #[error("Missing metadata: {0}")]
    MissingMetadata(String),

    #[error("Unsupported reference frame: {0}")]
    UnsupportedReferenceFrame(String),

    #[error("Unsupported time system: {0}")]
    UnsupportedTimeSystem(String),
}

/// Failures of the tabular reader on the data block.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("The data block contains no record")]
    Empty,

    #[error("Invalid epoch at data line {line}: {value:?}")]
    InvalidEpoch { line: usize, value: String },

    #[error("Invalid value at data line {line}, field {field}: {value:?}")]
    InvalidValue {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to read the data block: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for TableError {
    fn eq(&self, other: &Self) -> bool {
        use TableError::*;
        match (self, other) {
            (Empty, Empty) => true,
            (
                InvalidEpoch { line: a, value: x },
                InvalidEpoch { line: b, value: y },
            ) => a == b && x == y,
            (
                InvalidValue {
                    line: a,
                    field: f,
                    value: x,
                },
                InvalidValue {
                    line: b,
                    field: g,
                    value: y,
                },
            ) => a == b && f == g && x == y,

            // not comparable, same variant is enough
            (Csv(_), Csv(_)) => true,
            (Io(_), Io(_)) => true,

            _ => false,
        }
    }
}

/// Errors returned by the file-structure parser, one variant per failing stage.
#[derive(Error, Debug)]
pub enum CicError {
    #[error("Malformed header line {line_number}: {line:?}")]
    MalformedHeaderLine { line_number: usize, line: String },

    #[error("Invalid header: {0}")]
    InvalidHeader(#[from] HeaderError),

    #[error("No META_START line found")]
    MissingMetadataBlock,

    #[error("Reached end of file before META_END")]
    UnterminatedMetadataBlock,

    #[error("Error while parsing the data block: {0}")]
    DataParseError(#[from] TableError),

    #[error("{0} messages are not implemented")]
    UnimplementedKind(MessageKind),

    #[error("Expected a {expected} message, found {found}")]
    KindMismatch {
        expected: MessageKind,
        found: MessageKind,
    },

    #[error("Invalid message: {0}")]
    InvalidMessage(#[from] MessageError),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for CicError {
    fn eq(&self, other: &Self) -> bool {
        use CicError::*;
        match (self, other) {
            (
                MalformedHeaderLine {
                    line_number: a,
                    line: x,
                },
                MalformedHeaderLine {
                    line_number: b,
                    line: y,
                },
            ) => a == b && x == y,
            (InvalidHeader(a), InvalidHeader(b)) => a == b,
            (DataParseError(a), DataParseError(b)) => a == b,
            (UnimplementedKind(a), UnimplementedKind(b)) => a == b,
            (
                KindMismatch {
                    expected: a,
                    found: x,
                },
                KindMismatch {
                    expected: b,
                    found: y,
                },
            ) => a == b && x == y,
            (InvalidMessage(a), InvalidMessage(b)) => a == b,

            (MissingMetadataBlock, MissingMetadataBlock) => true,
            (UnterminatedMetadataBlock, UnterminatedMetadataBlock) => true,

            (Io(_), Io(_)) => true,

            _ => false,
        }
    }
}
