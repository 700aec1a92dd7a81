#![warn(missing_docs)]
//! Read upper air soundings from IGRA version 2 and UCAR station archives onto a common pressure
//! grid, and merge archives of the same station into one time series.
//!
//! Both archive formats are fixed width text. Each sounding starts with a header line giving the
//! date, time, location and number of levels, followed by that many level lines. Reading a file
//! goes through the same steps for both formats:
//!
//! 1. Decode the header and work out the nominal and release times ([`time`]).
//! 2. Slice the level lines into channels and classify the sounding as radiosonde or pilot
//!    balloon ([`format`]).
//! 3. Derive pressures for levels that only report a height ([`reconcile`]).
//! 4. Put every channel on the [`StandardGrid`] ([`interpolation`]).
//! 5. Convert units and label the result ([`StationSeries`]).
//!
//! Several series of one station can then be combined with [`merge`].
//!
//! ```rust,no_run
//! use sounding_ingest::{read_file, Format, ReadOptions, StationContext};
//!
//! let series = read_file(
//!     "USM00072520-data.txt.zip",
//!     Format::Igra,
//!     &StationContext::new(),
//!     &ReadOptions::new(),
//! )
//! .unwrap();
//!
//! for entry in series.entries() {
//!     println!("{} {}", entry.time, entry.kind.label());
//! }
//! ```

//
// API
//
pub use crate::{
    dataset::{assemble, ProfileSeries, SeriesEntry, StationSeries},
    error::{IngestError, Result, SkipReason},
    format::{DewPointRule, Format, Igra, RawHeader, SoundingFormat, Ucar},
    grid::StandardGrid,
    interpolation::GridMode,
    keys::{Channel, DatasetOrigin, SoundingType, Variable, COORDINATE_UNITS},
    merge::merge,
    reader::{
        parse_lines, parse_soundings, read_file, read_files, read_lines, read_station_archives,
        station_id, ReadOptions,
    },
    sounding::{LevelRecord, Sounding},
    station::StationContext,
};

pub mod format;
pub mod grid;
pub mod interpolation;
pub mod reconcile;
pub mod time;

//
// Internal use only
//
mod dataset;
mod error;
mod keys;
mod merge;
mod reader;
mod sounding;
mod station;

#[cfg(test)]
mod utility;
