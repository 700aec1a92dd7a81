//! Read archive files into station series.
//!
//! A file is scanned line by line. Every line that parses as a header starts a sounding, which
//! owns the declared number of level lines right after it. Records that cannot be used are logged
//! and skipped, they never abort reading the rest of the file.

use crate::{
    dataset::{assemble, StationSeries},
    error::{IngestError, Result, SkipReason},
    format::{Format, SoundingFormat},
    interpolation::GridMode,
    merge::merge,
    sounding::{LevelRecord, Sounding},
    station::StationContext,
};
use log::{debug, info, warn};
use std::{
    io::{Cursor, Read},
    path::Path,
};

const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

// Stands in for every byte outside ASCII, one for one, so the columns stay aligned.
const NON_ASCII_PLACEHOLDER: char = '?';

/// Options for turning soundings into a gridded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {
    mode: GridMode,
}

impl ReadOptions {
    /// Interpolate onto the grid, the default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to switch between log-pressure interpolation (`true`) and placing every
    /// observation in its nearest grid cell (`false`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_ingest::{interpolation::GridMode, ReadOptions};
    ///
    /// assert_eq!(ReadOptions::new().grid_mode(), GridMode::Interpolate);
    /// assert_eq!(
    ///     ReadOptions::new().with_interpolation(false).grid_mode(),
    ///     GridMode::Nearest
    /// );
    /// ```
    #[inline]
    pub fn with_interpolation(self, interpolate: bool) -> Self {
        let mode = if interpolate {
            GridMode::Interpolate
        } else {
            GridMode::Nearest
        };

        self.with_grid_mode(mode)
    }

    /// Builder method to set the grid mode.
    #[inline]
    pub fn with_grid_mode(mut self, mode: GridMode) -> Self {
        self.mode = mode;
        self
    }

    /// How observations are put on the grid.
    #[inline]
    pub fn grid_mode(&self) -> GridMode {
        self.mode
    }
}

/// Read the lines of an archive file.
///
/// Zip archives are recognized by their signature and the first member is read.
///
/// The layouts are fixed-width byte columns, so every byte outside ASCII is replaced by a single
/// `?`. A stray byte only spoils the field it sits in, the rest of the line reads normally.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let bytes = if bytes.starts_with(ZIP_SIGNATURE) {
        unzip_first_member(bytes)?
    } else {
        bytes
    };

    let (text, replaced) = ascii_text(&bytes);
    if replaced > 0 {
        warn!(
            "replaced {} non-ASCII bytes while reading {}",
            replaced,
            path.display()
        );
    }

    Ok(text.lines().map(ToOwned::to_owned).collect())
}

// Decode bytes one char per byte, returning the text and how many bytes were replaced.
fn ascii_text(bytes: &[u8]) -> (String, usize) {
    let mut replaced = 0;
    let text = bytes
        .iter()
        .map(|&b| {
            if b.is_ascii() {
                char::from(b)
            } else {
                replaced += 1;
                NON_ASCII_PLACEHOLDER
            }
        })
        .collect();

    (text, replaced)
}

fn unzip_first_member(bytes: Vec<u8>) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    if archive.len() == 0 {
        return Err(IngestError::EmptyArchive);
    }

    let mut member = archive.by_index(0)?;
    let mut buf = vec![];
    member.read_to_end(&mut buf)?;

    Ok(buf)
}

/// Station id for a file: the override in `ctx` if there is one, else the id on the first line.
pub fn station_id<S: AsRef<str>>(lines: &[S], format: Format, ctx: &StationContext) -> String {
    ctx.station()
        .map(ToOwned::to_owned)
        .or_else(|| {
            lines
                .first()
                .and_then(|line| format.reader().station_id(line.as_ref()))
        })
        .unwrap_or_default()
}

/// Scan the lines of a file for soundings.
///
/// Headers that cannot be used are skipped. A header that fails after its level count was read
/// skips its level lines too.
pub fn parse_soundings<S: AsRef<str>>(
    lines: &[S],
    format: Format,
    ctx: &StationContext,
) -> Vec<Sounding> {
    let reader = format.reader();

    let mut soundings = vec![];
    let mut skipped = 0;
    let mut cursor = 0;

    while cursor < lines.len() {
        let (step, result) = parse_record(lines, cursor, reader, ctx);

        match result {
            Ok(snd) => soundings.push(snd),
            Err(reason) => {
                debug!("skipping line {}: {}", cursor + 1, reason);
                skipped += 1;
            }
        }

        cursor += step;
    }

    info!(
        "read {} {} soundings, skipped {} records",
        soundings.len(),
        reader.origin().tag(),
        skipped
    );

    soundings
}

// Parse the record starting at `cursor`. Returns how many lines it used alongside the result.
fn parse_record<S: AsRef<str>>(
    lines: &[S],
    cursor: usize,
    reader: &dyn SoundingFormat,
    ctx: &StationContext,
) -> (usize, std::result::Result<Sounding, SkipReason>) {
    let header = match reader.parse_header(lines[cursor].as_ref()) {
        Ok(header) => header,
        Err(reason) => return (1, Err(reason)),
    };

    let step = header.level_count + 1;

    let times = match reader.resolve_times(&header, ctx) {
        Ok(times) => times,
        Err(reason) => return (step, Err(reason)),
    };

    let level_lines = match lines.get(cursor + 1..cursor + step) {
        Some(level_lines) => level_lines,
        None => return (step, Err(SkipReason::TruncatedLevels)),
    };

    let levels: Vec<LevelRecord> = level_lines
        .iter()
        .map(|line| reader.parse_level(line.as_ref()))
        .collect();

    let (lat, lon) = match (header.lat.into_option(), header.lon.into_option(), ctx.location()) {
        (None, None, Some((lat, lon))) => (optional::some(lat), optional::some(lon)),
        _ => (header.lat, header.lon),
    };

    let snd = Sounding::new(times.nominal)
        .with_release_time(times.release)
        .with_location(lat, lon)
        .with_kind(reader.classify(&header, &levels))
        .with_levels(levels);

    (step, Ok(snd))
}

/// Scan the lines of a file and assemble the soundings into a gridded series.
pub fn parse_lines<S: AsRef<str>>(
    lines: &[S],
    format: Format,
    ctx: &StationContext,
    options: &ReadOptions,
) -> Result<StationSeries> {
    let station = station_id(lines, format, ctx);
    let soundings = parse_soundings(lines, format, ctx);

    if soundings.is_empty() {
        return Err(IngestError::NoValidSoundings(station));
    }

    Ok(assemble(
        &station,
        &soundings,
        format.reader(),
        options.grid_mode(),
    ))
}

/// Read one archive file, plain text or zipped, into a gridded series.
pub fn read_file<P: AsRef<Path>>(
    path: P,
    format: Format,
    ctx: &StationContext,
    options: &ReadOptions,
) -> Result<StationSeries> {
    let path = path.as_ref();
    let lines = read_lines(path)?;

    parse_lines(&lines, format, ctx, options).map_err(|err| match err {
        IngestError::NoValidSoundings(_) => {
            IngestError::NoValidSoundings(path.display().to_string())
        }
        err => err,
    })
}

/// Read archive files of several stations, one series per file in the order given.
///
/// Unlike [`read_station_archives`] every file must read, the first failure is returned.
pub fn read_files<P: AsRef<Path>>(
    paths: &[P],
    format: Format,
    ctx: &StationContext,
    options: &ReadOptions,
) -> Result<Vec<StationSeries>> {
    paths
        .iter()
        .map(|path| read_file(path, format, ctx, options))
        .collect()
}

/// Read an IGRA archive and any number of UCAR archives of the same station and merge them.
///
/// All files are placed on the grid without interpolation. The IGRA archive takes priority,
/// then the UCAR archives in the order given. A UCAR archive that cannot be read is logged and
/// left out, a failure to read the IGRA archive is an error.
pub fn read_station_archives<P, Q>(
    primary: P,
    secondaries: &[Q],
    ctx: &StationContext,
) -> Result<StationSeries>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let options = ReadOptions::new().with_interpolation(false);

    let base = read_file(primary, Format::Igra, ctx, &options)?;

    let others: Vec<StationSeries> = secondaries
        .iter()
        .filter_map(|path| {
            let path = path.as_ref();
            match read_file(path, Format::Ucar, ctx, &options) {
                Ok(series) => Some(series),
                Err(err) => {
                    warn!("leaving out {}: {}", path.display(), err);
                    None
                }
            }
        })
        .collect();

    Ok(merge(base, others))
}
