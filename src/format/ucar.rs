//! UCAR upper air station files.
//!
//! Every record starts with an `H` header line of at least 102 characters. The station id sits in
//! columns 16..21 of the very first line of the file. Times are UTC, packed as the hour followed by
//! hundredths of an hour. Level values are unscaled, pressure is in hPa and `-888` or lower is
//! missing.

use super::{
    check_header, coordinate, field, numeric, DewPointRule, RawHeader, SoundingFormat,
};
use crate::{
    error::SkipReason,
    keys::{Channel, DatasetOrigin, SoundingType},
    sounding::LevelRecord,
    station::StationContext,
    time::{self, DateFields, ResolvedTimes},
};

const MARKER: char = 'H';
const MIN_HEADER_LEN: usize = 102;
const HPA_TO_PA: f64 = 100.0;

// Byte ranges of the level line channels, in `Channel` order. The humidity column doubles as the
// depression channel.
const LEVEL_FIELDS: [(usize, usize); 7] = [
    (5, 13),  // pressure, hPa
    (14, 22), // geopotential height, m
    (23, 29), // temperature, C
    (30, 36), // relative humidity, %
    (30, 36), // relative humidity again
    (37, 43), // wind direction, degrees
    (44, 50), // wind speed, m/s
];

/// The UCAR layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ucar;

impl SoundingFormat for Ucar {
    fn origin(&self) -> DatasetOrigin {
        DatasetOrigin::Ucar
    }

    fn station_id(&self, first_line: &str) -> Option<String> {
        field(first_line, 16, 21).map(|id| id.trim().to_owned())
    }

    fn parse_header<'a>(&self, line: &'a str) -> Result<RawHeader<'a>, SkipReason> {
        check_header(line, MARKER, MIN_HEADER_LEN)?;

        let get = |start, end| field(line, start, end).ok_or(SkipReason::ShortHeader);

        let level_count = get(90, 93)?
            .trim()
            .parse()
            .map_err(|_| SkipReason::BadLevelCount)?;

        Ok(RawHeader {
            date: DateFields {
                year: get(38, 42)?,
                month: get(43, 45)?,
                day: get(46, 48)?,
                hour: get(49, 53)?,
                release: "",
            },
            level_count,
            lat: coordinate(line, 57, 67, 1.0),
            lon: coordinate(line, 68, 78, 1.0),
            record_type: field(line, 87, 88),
        })
    }

    fn resolve_times(
        &self,
        header: &RawHeader<'_>,
        _ctx: &StationContext,
    ) -> Result<ResolvedTimes, SkipReason> {
        time::resolve_ucar(&header.date)
    }

    fn parse_level(&self, line: &str) -> LevelRecord {
        let mut vals = [std::f64::NAN; 7];
        for (val, &(start, end)) in vals.iter_mut().zip(LEVEL_FIELDS.iter()) {
            *val = numeric(line, start, end);
        }
        vals[Channel::Pressure.index()] *= HPA_TO_PA;

        LevelRecord::from_channels(vals)
    }

    fn classify(&self, header: &RawHeader<'_>, levels: &[LevelRecord]) -> SoundingType {
        match header.record_type.and_then(|code| code.trim().parse::<u8>().ok()) {
            Some(1) | Some(3) => SoundingType::Radiosonde,
            Some(_) => SoundingType::PiBal,
            None => {
                if levels
                    .iter()
                    .any(|lvl| self.has_value(lvl.temperature) || self.has_value(lvl.humidity))
                {
                    SoundingType::Radiosonde
                } else {
                    SoundingType::PiBal
                }
            }
        }
    }

    fn missing_threshold(&self) -> f64 {
        -888.0
    }

    fn scale(&self, _channel: Channel) -> f64 {
        1.0
    }

    fn dew_point_rule(&self) -> DewPointRule {
        DewPointRule::Degenerate
    }
}
