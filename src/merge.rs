//! Fuse several series of the same station into one.
use crate::dataset::StationSeries;
use chrono::NaiveDateTime;
use log::debug;
use std::collections::HashSet;

/// Merge `secondaries` into `primary`, in order of priority.
///
/// A time step of a secondary series is only added if no earlier source already has that
/// nominal time, and a time step equal to the one just before it in the same secondary is
/// ignored. The result keeps the station id of `primary` and is sorted by time.
///
/// # Examples
///
/// ```rust
/// use sounding_ingest::{merge, StationSeries};
///
/// let merged = merge(StationSeries::new("72520"), vec![StationSeries::new("other")]);
///
/// assert_eq!(merged.station(), "72520");
/// assert!(merged.is_empty());
/// ```
pub fn merge<I>(primary: StationSeries, secondaries: I) -> StationSeries
where
    I: IntoIterator<Item = StationSeries>,
{
    let station = primary.station().to_owned();
    let mut entries = primary.into_entries();

    for secondary in secondaries {
        let existing: HashSet<NaiveDateTime> = entries.iter().map(|entry| entry.time).collect();
        let source = secondary.station().to_owned();

        let mut previous: Option<NaiveDateTime> = None;
        let mut added = 0;
        for entry in secondary.into_entries() {
            if previous == Some(entry.time) {
                continue;
            }
            previous = Some(entry.time);

            if existing.contains(&entry.time) {
                continue;
            }

            entries.push(entry);
            added += 1;
        }

        debug!("merged {} new soundings from station {}", added, source);
    }

    StationSeries::new(station).with_entries(entries)
}
