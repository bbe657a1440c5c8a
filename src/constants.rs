//! Keywords, sentinels and fixed value sets of the CIC file format.
use hifitime::TimeScale;

/// Prefix of the first header line key (`CIC_<KIND>_VERS`).
pub const HEADER_PREFIX: &str = "CIC";
/// Suffix of the first header line key (`CIC_<KIND>_VERS`).
pub const HEADER_SUFFIX: &str = "VERS";

/// Key of the header line carrying the creation date.
pub const CREATION_DATE: &str = "CREATION_DATE";
/// Key of the header line carrying the originator.
pub const ORIGINATOR: &str = "ORIGINATOR";

/// Keyword introducing a free-text comment line.
pub const COMMENT_KEYWORD: &str = "COMMENT";

/// Line opening the metadata block.
pub const META_START: &str = "META_START";
/// Line closing the metadata block.
pub const META_END: &str = "META_END";

pub const OBJECT_NAME: &str = "OBJECT_NAME";
pub const OBJECT_ID: &str = "OBJECT_ID";
pub const CENTER_NAME: &str = "CENTER_NAME";
pub const REF_FRAME: &str = "REF_FRAME";
pub const TIME_SYSTEM: &str = "TIME_SYSTEM";

/// Metadata keys an OEM must declare, in the order they are checked.
pub const OEM_REQUIRED_KEYS: [&str; 5] =
    [OBJECT_NAME, OBJECT_ID, CENTER_NAME, REF_FRAME, TIME_SYSTEM];

/// The only reference frame accepted for an OEM.
pub const OEM_REF_FRAME: &str = "EME2000";

/// Time scales accepted for a creation date and for an OEM `TIME_SYSTEM`.
pub const SUPPORTED_TIME_SCALES: [TimeScale; 4] = [
    TimeScale::UTC,
    TimeScale::TAI,
    TimeScale::TT,
    TimeScale::TDB,
];
