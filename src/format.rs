//! The two archive layouts this crate understands.
//!
//! Both are fixed width text with a header line followed by the declared number of level lines.
//! They differ in byte offsets, scale factors, missing value sentinels and in how the times are
//! encoded, so each gets an implementation of [`SoundingFormat`]. Everything downstream of the
//! header and level parsing is shared.

use crate::{
    error::SkipReason,
    keys::{Channel, DatasetOrigin, SoundingType},
    sounding::LevelRecord,
    station::StationContext,
    time::{DateFields, ResolvedTimes},
};
use optional::Optioned;

pub use self::{igra::Igra, ucar::Ucar};

mod igra;
mod ucar;

/// Fixed-width fields of a header line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawHeader<'a> {
    /// Raw date and time sub-fields.
    pub date: DateFields<'a>,
    /// Number of level lines following the header.
    pub level_count: usize,
    /// Latitude in decimal degrees.
    pub lat: Optioned<f64>,
    /// Longitude in decimal degrees.
    pub lon: Optioned<f64>,
    /// Sounding type code, only present in UCAR headers.
    pub record_type: Option<&'a str>,
}

/// How the dew point is derived when assembling a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DewPointRule {
    /// Temperature minus the dew point depression channel.
    FromDepression,
    /// Temperature minus itself. UCAR files carry no depression, this yields a zero channel
    /// wherever temperature was observed.
    Degenerate,
}

/// Interface shared by the IGRA and UCAR readers.
pub trait SoundingFormat {
    /// Tag recorded with every sounding read in this format.
    fn origin(&self) -> DatasetOrigin;

    /// Station id, taken from the first line of the file.
    fn station_id(&self, first_line: &str) -> Option<String>;

    /// Decode a header line. Level lines and garbage are rejected with a reason.
    fn parse_header<'a>(&self, line: &'a str) -> Result<RawHeader<'a>, SkipReason>;

    /// Assign the nominal and release times of a parsed header.
    fn resolve_times(
        &self,
        header: &RawHeader<'_>,
        ctx: &StationContext,
    ) -> Result<ResolvedTimes, SkipReason>;

    /// Slice a level line into its seven channels. Pressure comes back in Pa.
    fn parse_level(&self, line: &str) -> LevelRecord;

    /// Decide whether the sounding carried a temperature/humidity sensor.
    fn classify(&self, header: &RawHeader<'_>, levels: &[LevelRecord]) -> SoundingType;

    /// Values at or below this are missing (applies to the value channels and height).
    fn missing_threshold(&self) -> f64;

    /// Divisor converting a raw channel into physical units.
    fn scale(&self, channel: Channel) -> f64;

    /// How to derive the dew point.
    fn dew_point_rule(&self) -> DewPointRule;

    /// Pressures in Pa at or below this are missing.
    fn pressure_missing_threshold(&self) -> f64 {
        -8888.0
    }

    /// Is this raw pressure (Pa) an observation?
    #[inline]
    fn has_pressure(&self, pressure: f64) -> bool {
        pressure > self.pressure_missing_threshold()
    }

    /// Is this raw channel value an observation?
    #[inline]
    fn has_value(&self, value: f64) -> bool {
        value > self.missing_threshold()
    }
}

/// Runtime choice of archive format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// IGRA version 2 station files.
    Igra,
    /// UCAR upper air station files.
    Ucar,
}

impl Format {
    /// The reader implementing this format.
    pub fn reader(self) -> &'static dyn SoundingFormat {
        match self {
            Format::Igra => &Igra,
            Format::Ucar => &Ucar,
        }
    }
}

/// Slice `line[start..end]`, `None` if the line is too short.
#[inline]
pub(crate) fn field(line: &str, start: usize, end: usize) -> Option<&str> {
    line.get(start..end)
}

/// Parse a numeric field, NaN when absent or unreadable.
#[inline]
pub(crate) fn numeric(line: &str, start: usize, end: usize) -> f64 {
    field(line, start, end)
        .and_then(|f| f.trim().parse::<f64>().ok())
        .unwrap_or(std::f64::NAN)
}

/// Parse a coordinate field, scaled by `divisor`.
#[inline]
pub(crate) fn coordinate(line: &str, start: usize, end: usize, divisor: f64) -> Optioned<f64> {
    let val = numeric(line, start, end);
    if val.is_nan() {
        Optioned::default()
    } else {
        optional::some(val / divisor)
    }
}

/// Check the common header preconditions: minimum trimmed length and leading marker.
pub(crate) fn check_header(line: &str, marker: char, min_len: usize) -> Result<(), SkipReason> {
    if line.trim().len() < min_len {
        Err(SkipReason::ShortHeader)
    } else if !line.starts_with(marker) {
        Err(SkipReason::MissingMarker)
    } else {
        Ok(())
    }
}
