//! Work out when a sounding was valid from the date and time fields of its header.
//!
//! Headers frequently lack one of the time fields, and IGRA files sometimes report the nominal
//! hour in local time. Each layout of missing fields maps to an ordered list of parse attempts,
//! the first one that succeeds wins.

use crate::{error::SkipReason, station::StationContext};
use chrono::{Duration, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike};

/// Anything that can report the UTC offset of a local wall clock time.
///
/// A local time that occurs twice when clocks fall back gets the earlier of its two offsets, the
/// daylight saving one, rather than standard time.
pub trait UtcOffsetSource {
    /// Local time minus UTC, in seconds, for the local time `local`.
    fn utc_offset_seconds(&self, local: &NaiveDateTime) -> Option<i32>;
}

impl<Tz: TimeZone> UtcOffsetSource for Tz {
    fn utc_offset_seconds(&self, local: &NaiveDateTime) -> Option<i32> {
        // Local times skipped by a DST change have no mapping, use the offset in effect at that
        // instant of UTC instead.
        let offset = self
            .offset_from_local_datetime(local)
            .earliest()
            .unwrap_or_else(|| self.offset_from_utc_datetime(local));

        Some(offset.fix().local_minus_utc())
    }
}

/// Raw date and time sub-fields of a header, borrowed from the header line.
///
/// For IGRA files `hour` is the two digit nominal hour and `release` the four digit HHMM release
/// time, `99` and `9999` mark them missing. For UCAR files `hour` is the four digit time field
/// (hour and hundredths of an hour) and `release` is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields<'a> {
    /// Four digit year
    pub year: &'a str,
    /// Month
    pub month: &'a str,
    /// Day of month
    pub day: &'a str,
    /// Nominal hour (IGRA) or packed time (UCAR)
    pub hour: &'a str,
    /// Release time, HHMM (IGRA)
    pub release: &'a str,
}

/// The times assigned to a sounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimes {
    /// Synoptic time slot.
    pub nominal: NaiveDateTime,
    /// Actual release time, re-anchored to the day closest to `nominal`.
    pub release: Option<NaiveDateTime>,
}

impl ResolvedTimes {
    /// Pair a nominal and release time, moving the release time to the closest day.
    pub fn new(nominal: NaiveDateTime, release: Option<NaiveDateTime>) -> Self {
        let release = release.map(|rel| reanchor_release(nominal, rel));
        ResolvedTimes { nominal, release }
    }
}

/// Round to the nearest hour, a minute of 30 or more rounds up.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use sounding_ingest::time::round_to_hour;
///
/// let day = NaiveDate::from_ymd_opt(2010, 12, 31).unwrap();
/// assert_eq!(round_to_hour(day.and_hms_opt(11, 29, 59).unwrap()), day.and_hms_opt(11, 0, 0).unwrap());
/// assert_eq!(
///     round_to_hour(day.and_hms_opt(23, 30, 0).unwrap()),
///     NaiveDate::from_ymd_opt(2011, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
/// );
/// ```
pub fn round_to_hour(t: NaiveDateTime) -> NaiveDateTime {
    let floored = t
        - Duration::minutes(i64::from(t.minute()))
        - Duration::seconds(i64::from(t.second()))
        - Duration::nanoseconds(i64::from(t.nanosecond()));

    floored + Duration::hours(i64::from(t.minute() / 30))
}

/// Move `release` to the previous, same or next calendar day of `nominal`, whichever is closest.
///
/// Ties keep the same day.
pub fn reanchor_release(nominal: NaiveDateTime, release: NaiveDateTime) -> NaiveDateTime {
    let this_day = nominal.date().and_time(release.time());
    let day_before = this_day - Duration::days(1);
    let day_after = this_day + Duration::days(1);

    let distance = |t: NaiveDateTime| nominal.signed_duration_since(t).num_seconds().abs();

    if distance(day_before) < distance(this_day) {
        day_before
    } else if distance(day_after) < distance(this_day) {
        day_after
    } else {
        this_day
    }
}

/// Resolve the times of an IGRA header.
///
/// Soundings that only report the nominal hour are assumed to be in the station's local time and
/// are shifted to UTC with the zone from `ctx`.
pub fn resolve_igra(
    fields: &DateFields<'_>,
    ctx: &StationContext,
) -> Result<ResolvedTimes, SkipReason> {
    use self::Attempt::*;

    if !all_digits(fields.hour, 2) || !all_digits(fields.release, 4) {
        return Err(SkipReason::UnrecognizedDateFields);
    }

    let hour_missing = fields.hour == "99";
    let release_missing = fields.release == "9999";
    let (rel_hour, rel_minute) = fields.release.split_at(2);
    let hour_only = rel_hour != "99" && rel_minute == "99";

    let attempts: &[Attempt] = match (hour_missing, release_missing) {
        (true, true) => return Err(SkipReason::MissingTimestamp),
        (true, false) if hour_only => &[ReleaseHour],
        (true, false) => &[ReleaseHourMinute],
        (false, true) => &[NominalHourShifted],
        (false, false) if hour_only => &[ReleaseHour, MinuteAsHourShifted],
        (false, false) => &[ReleaseHourMinute, ReleaseHour, MinuteAsHourShifted],
    };

    let date = parse_date(fields).ok_or(SkipReason::UnparseableTimestamp)?;

    attempts
        .iter()
        .find_map(|attempt| attempt.apply(date, fields, ctx))
        .ok_or(SkipReason::UnparseableTimestamp)
}

/// Resolve the times of a UCAR header. UCAR times are already UTC.
pub fn resolve_ucar(fields: &DateFields<'_>) -> Result<ResolvedTimes, SkipReason> {
    if fields.month == "99" || fields.day == "99" || fields.hour == "9999" {
        return Err(SkipReason::MissingTimestamp);
    }

    let (hh, frac) = match (fields.hour.get(..2), fields.hour.get(2..4)) {
        (Some(hh), Some(frac)) => (hh, frac),
        _ => return Err(SkipReason::UnrecognizedDateFields),
    };

    // Daily summary records use hour 31 and carry no profile.
    if hh == "31" {
        return Err(SkipReason::SummaryRecord);
    }

    let date = parse_date(fields).ok_or(SkipReason::UnparseableTimestamp)?;

    if hh == "24" {
        let nominal = date
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(SkipReason::UnparseableTimestamp)?;
        return Ok(ResolvedTimes::new(nominal, None));
    }

    let hour = fields
        .hour
        .trim()
        .parse::<u32>()
        .ok()
        .map(|packed| packed / 100)
        .ok_or(SkipReason::UnparseableTimestamp)?;

    let minute = if frac == "51" {
        Some(0)
    } else {
        frac.trim()
            .parse::<f64>()
            .ok()
            .map(|hundredths| (hundredths / 100.0 * 60.0) as u32)
    };

    let nominal = minute
        .and_then(|minute| date.and_hms_opt(hour, minute, 0))
        .ok_or(SkipReason::UnparseableTimestamp)?;

    // The release hour is the two digit hour field as written, a blank-padded hour gives none.
    let release = two_digits(hh).and_then(|hour| date.and_hms_opt(hour, 0, 0));

    Ok(ResolvedTimes::new(nominal, release))
}

#[derive(Debug, Clone, Copy)]
enum Attempt {
    // Release hour, minute missing. No zone correction.
    ReleaseHour,
    // Full HHMM release time. No zone correction.
    ReleaseHourMinute,
    // Local nominal hour shifted to UTC.
    NominalHourShifted,
    // Release minute digits read as an hour, shifted to UTC.
    MinuteAsHourShifted,
}

impl Attempt {
    fn apply(
        self,
        date: NaiveDate,
        fields: &DateFields<'_>,
        ctx: &StationContext,
    ) -> Option<ResolvedTimes> {
        let (rel_hour, rel_minute) = fields.release.split_at(2);

        match self {
            Attempt::ReleaseHour => {
                let release = date.and_hms_opt(two_digits(rel_hour)?, 0, 0)?;
                Some(ResolvedTimes::new(round_to_hour(release), Some(release)))
            }
            Attempt::ReleaseHourMinute => {
                let release =
                    date.and_hms_opt(two_digits(rel_hour)?, two_digits(rel_minute)?, 0)?;
                Some(ResolvedTimes::new(round_to_hour(release), Some(release)))
            }
            Attempt::NominalHourShifted => shifted(date, two_digits(fields.hour)?, fields, ctx),
            Attempt::MinuteAsHourShifted => shifted(date, two_digits(rel_minute)?, fields, ctx),
        }
    }
}

// The offset is always evaluated at the nominal local hour, even when another field supplies the
// clock reading.
fn shifted(
    date: NaiveDate,
    hour: u32,
    fields: &DateFields<'_>,
    ctx: &StationContext,
) -> Option<ResolvedTimes> {
    let local = date.and_hms_opt(hour, 0, 0)?;
    let nominal_local = date.and_hms_opt(two_digits(fields.hour)?, 0, 0)?;
    let offset = Duration::seconds(i64::from(ctx.utc_offset_seconds(&nominal_local)?));

    Some(ResolvedTimes::new(
        round_to_hour(local) - offset,
        Some(local - offset),
    ))
}

fn parse_date(fields: &DateFields<'_>) -> Option<NaiveDate> {
    let year = fields.year.trim().parse().ok()?;
    let month = fields.month.trim().parse().ok()?;
    let day = fields.day.trim().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn two_digits(field: &str) -> Option<u32> {
    if all_digits(field, 2) {
        field.parse().ok()
    } else {
        None
    }
}

fn all_digits(field: &str, len: usize) -> bool {
    field.len() == len && field.bytes().all(|b| b.is_ascii_digit())
}
