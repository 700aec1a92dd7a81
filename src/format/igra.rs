//! Integrated Global Radiosonde Archive version 2 station files.
//!
//! Header, e.g.
//!
//! ```text
//! #USM00072520 1990 01 01 00 2315   87 ncdc-gts ncdc-gts  404700  -799600
//! ```
//!
//! Levels carry pressure in Pa, temperature, humidity, depression and wind speed in tenths.
//! `-9999` is missing and `-8888` removed by quality control.

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

const MARKER: char = '#';
const MIN_HEADER_LEN: usize = 71;
const COORD_DIVISOR: f64 = 10_000.0;
const NO_DATA: f64 = -9999.0;

// Byte ranges of the level line channels, in `Channel` order.
const LEVEL_FIELDS: [(usize, usize); 7] = [
    (9, 15),  // pressure, Pa
    (16, 21), // geopotential height, m
    (22, 27), // temperature, 0.1 C
    (28, 33), // relative humidity, 0.1 %
    (34, 39), // dew point depression, 0.1 C
    (40, 45), // wind direction, degrees
    (46, 51), // wind speed, 0.1 m/s
];

const SCALE: [f64; 7] = [1.0, 1.0, 10.0, 10.0, 10.0, 1.0, 10.0];

/// The IGRA2 layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Igra;

impl SoundingFormat for Igra {
    fn origin(&self) -> DatasetOrigin {
        DatasetOrigin::Igra
    }

    fn station_id(&self, first_line: &str) -> Option<String> {
        field(first_line, 1, 12).map(|id| id.trim().to_owned())
    }

    fn parse_header<'a>(&self, line: &'a str) -> Result<RawHeader<'a>, SkipReason> {
        check_header(line, MARKER, MIN_HEADER_LEN)?;

        let get = |start, end| field(line, start, end).ok_or(SkipReason::ShortHeader);

        let level_count = get(32, 36)?
            .trim()
            .parse()
            .map_err(|_| SkipReason::BadLevelCount)?;

        Ok(RawHeader {
            date: DateFields {
                year: get(13, 17)?,
                month: get(18, 20)?,
                day: get(21, 23)?,
                hour: get(24, 26)?,
                release: get(27, 31)?,
            },
            level_count,
            lat: coordinate(line, 55, 62, COORD_DIVISOR),
            lon: coordinate(line, 63, 71, COORD_DIVISOR),
            record_type: None,
        })
    }

    fn resolve_times(
        &self,
        header: &RawHeader<'_>,
        ctx: &StationContext,
    ) -> Result<ResolvedTimes, SkipReason> {
        time::resolve_igra(&header.date, ctx)
    }

    fn parse_level(&self, line: &str) -> LevelRecord {
        let mut vals = [std::f64::NAN; 7];
        for (val, &(start, end)) in vals.iter_mut().zip(LEVEL_FIELDS.iter()) {
            *val = numeric(line, start, end);
        }
        LevelRecord::from_channels(vals)
    }

    fn classify(&self, _header: &RawHeader<'_>, levels: &[LevelRecord]) -> SoundingType {
        if levels
            .iter()
            .any(|lvl| lvl.temperature != NO_DATA || lvl.humidity != NO_DATA)
        {
            SoundingType::Radiosonde
        } else {
            SoundingType::PiBal
        }
    }

    fn missing_threshold(&self) -> f64 {
        -8888.0
    }

    fn scale(&self, channel: Channel) -> f64 {
        SCALE[channel.index()]
    }

    fn dew_point_rule(&self) -> DewPointRule {
        DewPointRule::FromDepression
    }
}
