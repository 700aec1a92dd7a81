//! Enums used as keys for channels, output variables and labels.
use std::fmt::{self, Display};
use strum_macros::EnumIter;

/// The seven raw channels on a level line, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Channel {
    /// Pressure (Pa)
    Pressure,
    /// Geopotential height (m)
    Height,
    /// Temperature
    Temperature,
    /// Relative humidity
    Humidity,
    /// Dew point depression. UCAR files repeat the humidity here.
    Depression,
    /// Wind direction (degrees from north)
    WindDirection,
    /// Wind speed
    WindSpeed,
}

impl Channel {
    /// Position of the channel on the level line.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Variables in an assembled station series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Variable {
    /// Geopotential height
    GeopotentialHeight,
    /// Air temperature
    AirTemperature,
    /// Relative humidity
    RelativeHumidity,
    /// Dew point temperature
    DewPointTemperature,
    /// Direction the wind blows from
    WindFromDirection,
    /// Wind speed
    WindSpeed,
    /// Whether a grid cell was placed by a measured pressure (+1) or from height alone (-1).
    KindOfHeight,
}

impl Variable {
    /// Name of the variable in the output dataset.
    pub fn name(self) -> &'static str {
        use self::Variable::*;

        match self {
            GeopotentialHeight => "geopotential_height",
            AirTemperature => "air_temperature",
            RelativeHumidity => "relative_humidity",
            DewPointTemperature => "dew_point_temperature",
            WindFromDirection => "wind_from_direction",
            WindSpeed => "wind_speed",
            KindOfHeight => "kind_of_height",
        }
    }

    /// Unit string attached to the variable.
    pub fn units(self) -> &'static str {
        use self::Variable::*;

        match self {
            GeopotentialHeight => "gpm",
            AirTemperature | DewPointTemperature => "K",
            RelativeHumidity | KindOfHeight => "1",
            WindFromDirection => "degree",
            WindSpeed => "m s-1",
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sensor family of a sounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundingType {
    /// Instrumented ascent with temperature and humidity.
    Radiosonde,
    /// Pilot balloon, winds only.
    PiBal,
}

impl SoundingType {
    /// Label used in the `typesounding` coordinate.
    pub fn label(self) -> &'static str {
        match self {
            SoundingType::Radiosonde => "Radiosounding",
            SoundingType::PiBal => "PiBal",
        }
    }
}

/// Which archive format a series entry was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetOrigin {
    /// Integrated Global Radiosonde Archive, version 2.
    Igra,
    /// UCAR upper air archive.
    Ucar,
}

impl DatasetOrigin {
    /// Tag used in the `dataset` coordinate.
    pub fn tag(self) -> &'static str {
        match self {
            DatasetOrigin::Igra => "IGRA",
            DatasetOrigin::Ucar => "UCAR",
        }
    }
}

/// Coordinate names and their unit strings in an assembled station series.
pub const COORDINATE_UNITS: [(&str, &str); 7] = [
    ("air_pressure", "Pa"),
    ("lat", "degrees_north"),
    ("lon", "degrees_east"),
    ("releasetime", "time"),
    ("date", "date"),
    ("typesounding", "txt"),
    ("dataset", "txt"),
];
