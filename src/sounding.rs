//! Data type to store one raw sounding as it was read from an archive.

use crate::keys::SoundingType;
use chrono::NaiveDateTime;
use optional::Optioned;

pub use self::level_record::LevelRecord;

mod level_record;

/// One balloon ascent: its times, location, sensor family and the raw levels.
///
/// Built once by a format reader and not changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Sounding {
    // Synoptic time slot the sounding is filed under
    nominal_time: NaiveDateTime,
    // Actual launch time, if known
    release_time: Option<NaiveDateTime>,

    lat: Optioned<f64>,
    lon: Optioned<f64>,

    kind: SoundingType,

    // Levels in file order
    levels: Vec<LevelRecord>,
}

impl Sounding {
    /// Create a new sounding valid at `nominal_time` with no levels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use sounding_ingest::{Sounding, SoundingType};
    ///
    /// let time = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let snd = Sounding::new(time);
    ///
    /// assert_eq!(snd.nominal_time(), time);
    /// assert!(snd.release_time().is_none());
    /// assert!(snd.levels().is_empty());
    /// assert_eq!(snd.kind(), SoundingType::Radiosonde);
    /// ```
    #[inline]
    pub fn new(nominal_time: NaiveDateTime) -> Self {
        Sounding {
            nominal_time,
            release_time: None,
            lat: Optioned::default(),
            lon: Optioned::default(),
            kind: SoundingType::Radiosonde,
            levels: vec![],
        }
    }

    /// Builder method for the release time.
    #[inline]
    pub fn with_release_time<T>(mut self, release_time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.release_time = Option::from(release_time);
        self
    }

    /// Builder method for the latitude and longitude in decimal degrees.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use optional::{none, some};
    /// use sounding_ingest::Sounding;
    ///
    /// let time = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    /// let snd = Sounding::new(time).with_location(some(40.47), some(-79.96));
    /// assert_eq!(snd.lat().unwrap(), 40.47);
    ///
    /// let snd = snd.with_location(none(), none());
    /// assert!(snd.lon().is_none());
    /// ```
    #[inline]
    pub fn with_location(mut self, lat: Optioned<f64>, lon: Optioned<f64>) -> Self {
        self.lat = lat;
        self.lon = lon;
        self
    }

    /// Builder method for the sensor family.
    #[inline]
    pub fn with_kind(mut self, kind: SoundingType) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method for the levels.
    #[inline]
    pub fn with_levels(mut self, levels: Vec<LevelRecord>) -> Self {
        self.levels = levels;
        self
    }

    /// Synoptic time the sounding is filed under.
    #[inline]
    pub fn nominal_time(&self) -> NaiveDateTime {
        self.nominal_time
    }

    /// Time the balloon was released.
    #[inline]
    pub fn release_time(&self) -> Option<NaiveDateTime> {
        self.release_time
    }

    /// Latitude in decimal degrees.
    #[inline]
    pub fn lat(&self) -> Optioned<f64> {
        self.lat
    }

    /// Longitude in decimal degrees.
    #[inline]
    pub fn lon(&self) -> Optioned<f64> {
        self.lon
    }

    /// Radiosonde or pilot balloon.
    #[inline]
    pub fn kind(&self) -> SoundingType {
        self.kind
    }

    /// The raw levels, in file order.
    #[inline]
    pub fn levels(&self) -> &[LevelRecord] {
        &self.levels
    }
}
