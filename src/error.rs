//! Error types for the sounding-ingest crate.
use thiserror::Error;

/// Error type for the crate.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The archive could not be opened or read.
    #[error("Unable to read sounding archive: {0}")]
    Io(#[from] std::io::Error),
    /// The archive looked like a zip file but could not be unpacked.
    #[error("Unable to unpack zipped sounding archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// A zip archive without any members.
    #[error("Zipped sounding archive has no members.")]
    EmptyArchive,
    /// Every header in the file was skipped.
    #[error("No valid soundings found in {0}.")]
    NoValidSoundings(String),
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, IngestError>;

/// Why a header line did not produce a sounding.
///
/// These never abort reading a file, the reader logs them and moves on to the next record.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum SkipReason {
    /// The header line is shorter than the layout requires.
    #[error("Header line too short.")]
    ShortHeader,
    /// The header line does not start with the format's marker character.
    #[error("Header line missing record marker.")]
    MissingMarker,
    /// The declared number of levels could not be read.
    #[error("Unreadable level count.")]
    BadLevelCount,
    /// Both the nominal hour and the release time are reported missing.
    #[error("Sounding time reported as missing.")]
    MissingTimestamp,
    /// Every interpretation of the date and time fields failed.
    #[error("Unable to parse sounding time.")]
    UnparseableTimestamp,
    /// The date and time fields match none of the known layouts.
    #[error("Unrecognized date and time fields.")]
    UnrecognizedDateFields,
    /// A summary record (daily total) that carries no profile.
    #[error("Summary record without a profile.")]
    SummaryRecord,
    /// The file ended before all declared levels were read.
    #[error("Fewer level lines than declared in the header.")]
    TruncatedLevels,
}
