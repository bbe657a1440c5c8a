//! Time values used by CIC files.
//!
//! CIC headers and data blocks tag their dates with an ISO-8601 extended
//! ("isot") timestamp such as `2009-12-08T09:00:00.000`, or with a modified
//! julian day followed by the seconds of that day. Both forms are turned into
//! [`hifitime::Epoch`] values here.
//!
//! [`Instant`] wraps one or several epochs sharing a time scale. A header
//! creation date must be reducible to a single epoch, see [`Instant::to_scalar`].
use std::sync::LazyLock;

use hifitime::{Epoch, TimeScale, Unit};
use regex::Regex;

use crate::{cic_errors::HeaderError, constants::SUPPORTED_TIME_SCALES};

static ISOT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})(?:T([0-9]{2}):([0-9]{2})(?::([0-9]{2})(?:\.([0-9]+))?)?)?$")
        .expect("isot regex must compile")
});

/// A time value tagged with a time scale.
///
/// `Scalar` holds one epoch, `Array` holds any number of epochs (possibly one)
/// expressed in the same time scale.
#[derive(Debug, Clone, PartialEq)]
pub enum Instant {
    Scalar(Epoch),
    Array {
        epochs: Vec<Epoch>,
        time_scale: TimeScale,
    },
}

impl Instant {
    /// Parse an isot timestamp in the UTC time scale.
    ///
    /// Arguments
    /// ---------
    /// * `date`: a string of the form `YYYY-MM-DDTHH:MM:SS[.fff]`
    ///
    /// Return
    /// ------
    /// * a scalar instant or [`HeaderError::InvalidDateFormat`]
    pub fn parse(date: &str) -> Result<Self, HeaderError> {
        Instant::parse_in(date, TimeScale::UTC)
    }

    /// Parse an isot timestamp expressed in `time_scale`.
    pub fn parse_in(date: &str, time_scale: TimeScale) -> Result<Self, HeaderError> {
        parse_isot(date, time_scale)
            .map(Instant::Scalar)
            .ok_or_else(|| HeaderError::InvalidDateFormat(date.to_string()))
    }

    /// Build an array instant, every epoch being converted into `time_scale`.
    pub fn from_epochs(epochs: Vec<Epoch>, time_scale: TimeScale) -> Self {
        Instant::Array {
            epochs: epochs
                .into_iter()
                .map(|epoch| epoch.to_time_scale(time_scale))
                .collect(),
            time_scale,
        }
    }

    pub fn scale(&self) -> TimeScale {
        match self {
            Instant::Scalar(epoch) => epoch.time_scale,
            Instant::Array { time_scale, .. } => *time_scale,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Instant::Scalar(_))
    }

    /// Number of epochs carried by this instant.
    pub fn len(&self) -> usize {
        match self {
            Instant::Scalar(_) => 1,
            Instant::Array { epochs, .. } => epochs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reduce the instant to a single epoch expressed in [`Instant::scale`].
    ///
    /// Return
    /// ------
    /// * `Some(epoch)` for a scalar or for an array holding exactly one epoch,
    ///   `None` otherwise.
    pub fn to_scalar(&self) -> Option<Epoch> {
        match self {
            Instant::Scalar(epoch) => Some(*epoch),
            Instant::Array { epochs, time_scale } => match epochs.as_slice() {
                [epoch] => Some(epoch.to_time_scale(*time_scale)),
                _ => None,
            },
        }
    }
}

impl From<Epoch> for Instant {
    fn from(epoch: Epoch) -> Self {
        Instant::Scalar(epoch)
    }
}

/// Parse an isot timestamp into an epoch of the given time scale.
///
/// The date part is mandatory, the time part may stop after the minutes or the
/// seconds. Fractional seconds beyond the nanosecond are truncated.
///
/// Arguments
/// ---------
/// * `date`: the timestamp, surrounding whitespace is ignored
/// * `time_scale`: the time scale the timestamp is expressed in
///
/// Return
/// ------
/// * `None` if the string does not have the isot shape or is not a valid calendar date
pub fn parse_isot(date: &str, time_scale: TimeScale) -> Option<Epoch> {
    let caps = ISOT_REGEX.captures(date.trim())?;

    let field = |index: usize| -> Option<u8> {
        caps.get(index)
            .map_or(Some(0), |m| m.as_str().parse::<u8>().ok())
    };

    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let month = field(2)?;
    let day = field(3)?;
    let hour = field(4)?;
    let minute = field(5)?;
    let second = field(6)?;

    let nanos = match caps.get(7) {
        Some(fraction) => {
            let digits: String = fraction.as_str().chars().take(9).collect();
            format!("{digits:0<9}").parse::<u32>().ok()?
        }
        None => 0,
    };

    Epoch::maybe_from_gregorian(year, month, day, hour, minute, second, nanos, time_scale).ok()
}

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Largest distance, in days, between an accepted date and the MJD origin.
pub const MJD_DAY_LIMIT: f64 = 1.0e7;

/// Build an epoch from a CIC style modified julian day and seconds of day.
///
/// Arguments
/// ---------
/// * `mjd_day`: the modified julian day number
/// * `seconds`: seconds elapsed since the start of that day
/// * `time_scale`: the time scale of the date
///
/// Return
/// ------
/// * `None` if a value is not finite or the date lies more than
///   [`MJD_DAY_LIMIT`] days away from the MJD origin
pub fn mjd_seconds_to_epoch(mjd_day: f64, seconds: f64, time_scale: TimeScale) -> Option<Epoch> {
    let in_range = |days: f64| days.is_finite() && days.abs() <= MJD_DAY_LIMIT;
    let second_days = seconds / SECONDS_PER_DAY;
    if !in_range(mjd_day) || !in_range(second_days) || !in_range(mjd_day + second_days) {
        return None;
    }
    Some(Epoch::from_mjd_in_time_scale(mjd_day, time_scale) + Unit::Second * seconds)
}

/// Format an epoch as an isot UTC timestamp with millisecond precision.
pub fn format_isot(epoch: &Epoch) -> String {
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
    format!(
        "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{:03}",
        nanos / 1_000_000
    )
}

/// Map a CIC `TIME_SYSTEM` value onto a supported time scale.
///
/// Matching is exact: `"UTC"`, `"TAI"`, `"TT"` and `"TDB"` only.
pub fn time_scale_from_name(name: &str) -> Option<TimeScale> {
    match name {
        "UTC" => Some(TimeScale::UTC),
        "TAI" => Some(TimeScale::TAI),
        "TT" => Some(TimeScale::TT),
        "TDB" => Some(TimeScale::TDB),
        _ => None,
    }
}

pub fn is_supported_scale(time_scale: TimeScale) -> bool {
    SUPPORTED_TIME_SCALES.contains(&time_scale)
}

#[cfg(test)]
mod time_test {
    use super::*;

    #[test]
    fn test_parse_isot() {
        let epoch = parse_isot("2009-12-08T09:00:00.000", TimeScale::UTC).unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc(2009, 12, 8, 9, 0, 0, 0));
        assert_eq!(epoch.time_scale, TimeScale::UTC);

        let epoch = parse_isot("2023-01-01T00:00:00", TimeScale::UTC).unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc_at_midnight(2023, 1, 1));

        let epoch = parse_isot("2023-01-01", TimeScale::UTC).unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc_at_midnight(2023, 1, 1));
    }

    #[test]
    fn test_parse_isot_fraction() {
        let epoch = parse_isot("2020-06-01T12:30:15.25", TimeScale::UTC).unwrap();
        assert_eq!(
            epoch,
            Epoch::from_gregorian_utc(2020, 6, 1, 12, 30, 15, 250_000_000)
        );

        let epoch = parse_isot("2020-06-01T12:30:15.0000000019", TimeScale::UTC).unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc(2020, 6, 1, 12, 30, 15, 1));
    }

    #[test]
    fn test_parse_isot_invalid() {
        assert!(parse_isot("invalid-date", TimeScale::UTC).is_none());
        assert!(parse_isot("", TimeScale::UTC).is_none());
        assert!(parse_isot("2023/01/01 00:00:00", TimeScale::UTC).is_none());
        assert!(parse_isot("2023-13-01T00:00:00", TimeScale::UTC).is_none());
        assert!(parse_isot("2023-01-01T00:00:00 UTC", TimeScale::UTC).is_none());
    }

    #[test]
    fn test_instant_parse() {
        let instant = Instant::parse("2023-01-01T00:00:00").unwrap();
        assert!(instant.is_scalar());
        assert_eq!(instant.scale(), TimeScale::UTC);

        assert_eq!(
            Instant::parse("invalid-date"),
            Err(HeaderError::InvalidDateFormat("invalid-date".into()))
        );
    }

    #[test]
    fn test_instant_to_scalar() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 1, 1);
        assert_eq!(Instant::from(epoch).to_scalar(), Some(epoch));

        let single = Instant::from_epochs(vec![epoch], TimeScale::UTC);
        assert!(!single.is_scalar());
        assert_eq!(single.to_scalar(), Some(epoch));

        let gpst = epoch.to_time_scale(TimeScale::GPST);
        let relabeled = Instant::Array {
            epochs: vec![gpst],
            time_scale: TimeScale::UTC,
        };
        let scalar = relabeled.to_scalar().unwrap();
        assert_eq!(scalar.time_scale, TimeScale::UTC);
        assert_eq!(scalar, epoch);

        let pair = Instant::from_epochs(vec![epoch, epoch], TimeScale::UTC);
        assert_eq!(pair.len(), 2);
        assert_eq!(pair.to_scalar(), None);

        let empty = Instant::from_epochs(vec![], TimeScale::TAI);
        assert!(empty.is_empty());
        assert_eq!(empty.scale(), TimeScale::TAI);
        assert_eq!(empty.to_scalar(), None);
    }

    #[test]
    fn test_format_isot() {
        let epoch = parse_isot("2009-12-08T09:00:00.000", TimeScale::UTC).unwrap();
        assert_eq!(format_isot(&epoch), "2009-12-08T09:00:00.000");

        let epoch = parse_isot("2020-06-01T12:30:15.25", TimeScale::UTC).unwrap();
        assert_eq!(format_isot(&epoch), "2020-06-01T12:30:15.250");
    }

    #[test]
    fn test_mjd_seconds_to_epoch() {
        // MJD 54808 is 2008-12-08
        let epoch = mjd_seconds_to_epoch(54808.0, 32400.0, TimeScale::UTC).unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc(2008, 12, 8, 9, 0, 0, 0));
    }

    #[test]
    fn test_mjd_seconds_out_of_range() {
        for (day, seconds) in [
            (f64::NAN, 0.0),
            (55173.0, f64::NAN),
            (55173.0, f64::INFINITY),
            (f64::NEG_INFINITY, 0.0),
            (1e300, 0.0),
            (55173.0, 1e300),
            (f64::MAX, f64::MAX),
            (-2.0e7, 0.0),
            (1e300, -1e300 * 86_400.0),
        ] {
            assert_eq!(
                mjd_seconds_to_epoch(day, seconds, TimeScale::UTC),
                None,
                "{day} {seconds} should be rejected"
            );
        }

        assert!(mjd_seconds_to_epoch(-MJD_DAY_LIMIT, 0.0, TimeScale::TAI).is_some());
    }

    #[test]
    fn test_time_scale_from_name() {
        assert_eq!(time_scale_from_name("UTC"), Some(TimeScale::UTC));
        assert_eq!(time_scale_from_name("TDB"), Some(TimeScale::TDB));
        assert_eq!(time_scale_from_name("GPS"), None);
        assert_eq!(time_scale_from_name("utc"), None);

        assert!(is_supported_scale(TimeScale::TT));
        assert!(!is_supported_scale(TimeScale::GPST));
    }
}
