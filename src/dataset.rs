//! Assemble gridded soundings into a labeled, time ordered station series.

use crate::{
    format::{DewPointRule, SoundingFormat},
    interpolation::{grid_channel, GridMode},
    keys::{Channel, DatasetOrigin, SoundingType, Variable},
    reconcile::reconcile,
    sounding::Sounding,
};
use chrono::NaiveDateTime;
use itertools::izip;
use metfor::{Celsius, Kelvin};
use optional::Optioned;

/// One sounding on the standard grid, in physical units.
///
/// Every column has one value per grid level, NaN where nothing was observed.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileSeries {
    geopotential_height: Vec<f64>,
    air_temperature: Vec<f64>,
    relative_humidity: Vec<f64>,
    dew_point_temperature: Vec<f64>,
    wind_from_direction: Vec<f64>,
    wind_speed: Vec<f64>,
    kind_of_height: Vec<f64>,
}

impl ProfileSeries {
    /// Reconcile, grid and convert one sounding.
    pub fn from_sounding(snd: &Sounding, format: &dyn SoundingFormat, mode: GridMode) -> Self {
        let rec = reconcile(snd.levels(), format);
        let levels = &rec.levels;
        let column = |channel| grid_channel(levels, channel, format, mode);

        let air_temperature: Vec<f64> = column(Channel::Temperature)
            .into_iter()
            .map(celsius_to_kelvin)
            .collect();

        let dew_point_temperature: Vec<f64> = match format.dew_point_rule() {
            DewPointRule::FromDepression => izip!(&air_temperature, column(Channel::Depression))
                .map(|(t, dd)| t - dd)
                .collect(),
            DewPointRule::Degenerate => air_temperature.iter().map(|t| t - t).collect(),
        };

        ProfileSeries {
            geopotential_height: column(Channel::Height),
            air_temperature,
            relative_humidity: column(Channel::Humidity),
            dew_point_temperature,
            wind_from_direction: column(Channel::WindDirection),
            wind_speed: column(Channel::WindSpeed),
            kind_of_height: rec.kind_of_height,
        }
    }

    /// Get a column by variable.
    #[inline]
    pub fn get(&self, var: Variable) -> &[f64] {
        use crate::keys::Variable::*;

        match var {
            GeopotentialHeight => &self.geopotential_height,
            AirTemperature => &self.air_temperature,
            RelativeHumidity => &self.relative_humidity,
            DewPointTemperature => &self.dew_point_temperature,
            WindFromDirection => &self.wind_from_direction,
            WindSpeed => &self.wind_speed,
            KindOfHeight => &self.kind_of_height,
        }
    }
}

#[inline]
fn celsius_to_kelvin(t: f64) -> f64 {
    let Kelvin(k) = Kelvin::from(Celsius(t));
    k
}

/// One time step of a station series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesEntry {
    /// Nominal time.
    pub time: NaiveDateTime,
    /// Release time, if known.
    pub release_time: Option<NaiveDateTime>,
    /// Latitude in decimal degrees.
    pub lat: Optioned<f64>,
    /// Longitude in decimal degrees.
    pub lon: Optioned<f64>,
    /// Radiosonde or pilot balloon.
    pub kind: SoundingType,
    /// Archive the sounding was read from.
    pub origin: DatasetOrigin,
    /// The gridded profile.
    pub profile: ProfileSeries,
}

impl SeriesEntry {
    /// Grid a sounding read in `format`.
    pub fn from_sounding(snd: &Sounding, format: &dyn SoundingFormat, mode: GridMode) -> Self {
        SeriesEntry {
            time: snd.nominal_time(),
            release_time: snd.release_time(),
            lat: snd.lat(),
            lon: snd.lon(),
            kind: snd.kind(),
            origin: format.origin(),
            profile: ProfileSeries::from_sounding(snd, format, mode),
        }
    }
}

/// Gridded soundings of one station, strictly increasing in time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationSeries {
    station: String,
    entries: Vec<SeriesEntry>,
}

impl StationSeries {
    /// Create an empty series for `station`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_ingest::StationSeries;
    ///
    /// let series = StationSeries::new("72520");
    /// assert_eq!(series.station(), "72520");
    /// assert!(series.is_empty());
    /// ```
    #[inline]
    pub fn new<S>(station: S) -> Self
    where
        S: Into<String>,
    {
        StationSeries {
            station: station.into(),
            entries: vec![],
        }
    }

    /// Builder method to set the entries.
    ///
    /// Entries are stable sorted by time and only the first of several entries with the same time
    /// is kept.
    pub fn with_entries(mut self, mut entries: Vec<SeriesEntry>) -> Self {
        entries.sort_by_key(|entry| entry.time);
        entries.dedup_by_key(|entry| entry.time);

        self.entries = entries;
        self
    }

    /// Station id.
    #[inline]
    pub fn station(&self) -> &str {
        &self.station
    }

    /// Number of time steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no soundings in the series.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The time steps, ascending.
    #[inline]
    pub fn entries(&self) -> &[SeriesEntry] {
        &self.entries
    }

    /// Take the entries out of the series.
    #[inline]
    pub fn into_entries(self) -> Vec<SeriesEntry> {
        self.entries
    }

    /// Nominal times, ascending.
    pub fn times(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.entries.iter().map(|entry| entry.time)
    }

    /// A variable as rows of time by pressure.
    pub fn variable(&self, var: Variable) -> Vec<&[f64]> {
        self.entries
            .iter()
            .map(|entry| entry.profile.get(var))
            .collect()
    }
}

/// Grid a file worth of soundings and assemble them into a station series.
pub fn assemble(
    station: &str,
    soundings: &[Sounding],
    format: &dyn SoundingFormat,
    mode: GridMode,
) -> StationSeries {
    let entries = soundings
        .iter()
        .map(|snd| SeriesEntry::from_sounding(snd, format, mode))
        .collect();

    StationSeries::new(station).with_entries(entries)
}
