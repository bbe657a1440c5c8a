//! # CIC header
//!
//! Every CIC file opens with the same preamble:
//!
//! ```text
//! CIC_OEM_VERS = 1.0
//! COMMENT Sample position file for CubeSat
//! CREATION_DATE = 2009-12-08T09:00:00.000
//! ORIGINATOR = CNES
//! ```
//!
//! [`Header::new`] validates the values extracted from these lines and is the
//! only way to obtain a [`Header`]: an invalid combination never produces one.
//!
//! ## Validation rules
//! -----------------
//! * The message kind is upper-cased and must be one of `OEM`, `AEM`, `MEM`, `MPM`.
//! * The version must start with `<digits>.<digits>`.
//! * The creation date is either an [`Instant`] in UTC, TAI, TT or TDB that
//!   reduces to a single epoch, or an isot string read in UTC.
//!
//! ## See also
//! ------------
//! * [`crate::cic_file`] – extraction of the header lines from a file.
//! * [`crate::time`] – isot parsing and formatting.
use std::{fmt, str::FromStr, sync::LazyLock};

use hifitime::Epoch;
use regex::Regex;

use crate::{
    cic_errors::HeaderError,
    time::{format_isot, is_supported_scale, Instant},
};

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)").expect("version regex must compile"));

/// The four CIC message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Orbit Ephemeris Message
    Oem,
    /// Attitude Ephemeris Message
    Aem,
    /// Maneuver Ephemeris Message
    Mem,
    /// Mission Ephemeris Message
    Mpm,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Oem => "OEM",
            MessageKind::Aem => "AEM",
            MessageKind::Mem => "MEM",
            MessageKind::Mpm => "MPM",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a message kind from its label, ignoring the letter case.
impl FromStr for MessageKind {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OEM" => Ok(MessageKind::Oem),
            "AEM" => Ok(MessageKind::Aem),
            "MEM" => Ok(MessageKind::Mem),
            "MPM" => Ok(MessageKind::Mpm),
            _ => Err(HeaderError::UnsupportedKind(s.to_string())),
        }
    }
}

/// The accepted inputs for a creation date.
///
/// Strings go through isot parsing, instants through time scale and shape
/// checks. Numbers are representable so that callers handing over a raw
/// numeric date get [`HeaderError::InvalidDateType`] instead of a silent
/// conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationDate {
    Instant(Instant),
    Text(String),
    Unsupported(String),
}

impl From<Instant> for CreationDate {
    fn from(instant: Instant) -> Self {
        CreationDate::Instant(instant)
    }
}

impl From<Epoch> for CreationDate {
    fn from(epoch: Epoch) -> Self {
        CreationDate::Instant(Instant::Scalar(epoch))
    }
}

impl From<&str> for CreationDate {
    fn from(date: &str) -> Self {
        CreationDate::Text(date.to_string())
    }
}

impl From<String> for CreationDate {
    fn from(date: String) -> Self {
        CreationDate::Text(date)
    }
}

impl From<i64> for CreationDate {
    fn from(value: i64) -> Self {
        CreationDate::Unsupported(format!("integer {value}"))
    }
}

impl From<u64> for CreationDate {
    fn from(value: u64) -> Self {
        CreationDate::Unsupported(format!("integer {value}"))
    }
}

impl From<f64> for CreationDate {
    fn from(value: f64) -> Self {
        CreationDate::Unsupported(format!("float {value}"))
    }
}

/// Validated preamble of a CIC file.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    message_kind: MessageKind,
    version: String,
    creation_date: Epoch,
    originator: String,
    comment: Option<String>,
}

impl Header {
    /// Validate and build a header.
    ///
    /// Arguments
    /// -----------------
    /// * `message_kind`: the kind label, any letter case (`"oem"`, `"OEM"`, ...)
    /// * `version`: the format version, must start with `<digits>.<digits>`
    /// * `creation_date`: an [`Instant`], an [`Epoch`] or an isot string
    /// * `originator`: free text, kept as is
    /// * `comment`: optional free text, kept as is
    ///
    /// Return
    /// ----------
    /// * The header, or the first [`HeaderError`] met in the order above.
    pub fn new(
        message_kind: &str,
        version: &str,
        creation_date: impl Into<CreationDate>,
        originator: &str,
        comment: Option<&str>,
    ) -> Result<Self, HeaderError> {
        let message_kind = message_kind.parse::<MessageKind>()?;

        if !VERSION_REGEX.is_match(version) {
            return Err(HeaderError::InvalidVersion(version.to_string()));
        }

        let creation_date = match creation_date.into() {
            CreationDate::Instant(instant) => {
                if !is_supported_scale(instant.scale()) {
                    return Err(HeaderError::UnsupportedTimeScale(instant.scale()));
                }
                instant
                    .to_scalar()
                    .ok_or(HeaderError::NonScalarDate(instant.len()))?
            }
            CreationDate::Text(date) => Instant::parse(&date)?
                .to_scalar()
                .ok_or(HeaderError::InvalidDateFormat(date))?,
            CreationDate::Unsupported(value) => {
                return Err(HeaderError::InvalidDateType(value));
            }
        };

        Ok(Header {
            message_kind,
            version: version.to_string(),
            creation_date,
            originator: originator.to_string(),
            comment: comment.map(str::to_string),
        })
    }

    pub fn message_kind(&self) -> MessageKind {
        self.message_kind
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The major and minor revision numbers of the version.
    ///
    /// Return
    /// ------
    /// * `None` if a number does not fit in a `u32`
    pub fn version_numbers(&self) -> Option<(u32, u32)> {
        let caps = VERSION_REGEX.captures(&self.version)?;
        Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
    }

    pub fn creation_date(&self) -> Epoch {
        self.creation_date
    }

    /// The creation date as an isot UTC string, e.g. `2009-12-08T09:00:00.000`.
    pub fn creation_date_isot(&self) -> String {
        format_isot(&self.creation_date)
    }

    pub fn originator(&self) -> &str {
        &self.originator
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}
