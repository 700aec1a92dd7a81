//! Read-only information about the station whose file is being read.

use crate::time::UtcOffsetSource;
use chrono::TimeZone;
use std::{fmt, sync::Arc};

/// Context for one file-reading session.
///
/// The local time zone is needed to correct IGRA soundings that only report the local nominal
/// hour. Looking up the zone from the station coordinates is left to the caller, any
/// `chrono::TimeZone` can be supplied. Without a zone all times are taken to be UTC.
#[derive(Clone, Default)]
pub struct StationContext {
    station: Option<String>,
    location: Option<(f64, f64)>,
    zone: Option<Arc<dyn UtcOffsetSource + Send + Sync>>,
}

impl fmt::Debug for StationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationContext")
            .field("station", &self.station)
            .field("location", &self.location)
            .field("has_zone", &self.zone.is_some())
            .finish()
    }
}

impl StationContext {
    /// Create a context with no station id, no location and UTC time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_ingest::StationContext;
    ///
    /// let ctx = StationContext::new();
    /// assert!(ctx.station().is_none());
    /// assert!(ctx.location().is_none());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to override the station id read from the file.
    #[inline]
    pub fn with_station<S>(mut self, station: S) -> Self
    where
        S: Into<String>,
    {
        self.station = Some(station.into());
        self
    }

    /// Builder method to add the station latitude and longitude.
    #[inline]
    pub fn with_location<T>(mut self, coords: T) -> Self
    where
        Option<(f64, f64)>: From<T>,
    {
        self.location = Option::from(coords);
        self
    }

    /// Builder method to set the local time zone of the station.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{FixedOffset, NaiveDate};
    /// use sounding_ingest::StationContext;
    ///
    /// let ctx = StationContext::new().with_timezone(FixedOffset::east_opt(3 * 3600).unwrap());
    /// let local = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(6, 0, 0).unwrap();
    ///
    /// assert_eq!(ctx.utc_offset_seconds(&local), Some(3 * 3600));
    /// ```
    #[inline]
    pub fn with_timezone<Tz>(mut self, zone: Tz) -> Self
    where
        Tz: TimeZone + Send + Sync + 'static,
    {
        self.zone = Some(Arc::new(zone));
        self
    }

    /// Station id override, if any.
    #[inline]
    pub fn station(&self) -> Option<&str> {
        self.station.as_deref()
    }

    /// Station latitude and longitude, if known.
    #[inline]
    pub fn location(&self) -> Option<(f64, f64)> {
        self.location
    }

    /// Offset of local time from UTC in seconds for a local wall clock time.
    ///
    /// Returns `Some(0)` when no zone is set, and `None` when the zone has no mapping for the
    /// local time.
    pub fn utc_offset_seconds(&self, local: &chrono::NaiveDateTime) -> Option<i32> {
        match self.zone {
            Some(ref zone) => zone.utc_offset_seconds(local),
            None => Some(0),
        }
    }
}
