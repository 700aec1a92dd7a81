use crate::keys::Channel;

/// One observation row of a sounding, in the raw scale of the source file.
///
/// Pressure is always stored in Pa. Everything else keeps the file's units (tenths of a degree,
/// tenths of a percent, ...) and its missing value sentinels. Fields that could not be read at all
/// are NaN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelRecord {
    /// Pressure in Pa
    pub pressure: f64,
    /// Geopotential height in meters
    pub height: f64,
    /// Temperature
    pub temperature: f64,
    /// Relative humidity
    pub humidity: f64,
    /// Dew point depression, or a copy of the humidity for UCAR files.
    pub depression: f64,
    /// Wind direction in degrees
    pub wind_direction: f64,
    /// Wind speed
    pub wind_speed: f64,
}

impl Default for LevelRecord {
    fn default() -> Self {
        let nan = std::f64::NAN;
        LevelRecord {
            pressure: nan,
            height: nan,
            temperature: nan,
            humidity: nan,
            depression: nan,
            wind_direction: nan,
            wind_speed: nan,
        }
    }
}

impl LevelRecord {
    /// Get the raw value of a channel.
    #[inline]
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Pressure => self.pressure,
            Channel::Height => self.height,
            Channel::Temperature => self.temperature,
            Channel::Humidity => self.humidity,
            Channel::Depression => self.depression,
            Channel::WindDirection => self.wind_direction,
            Channel::WindSpeed => self.wind_speed,
        }
    }

    /// Build a record from the seven channel values in file order.
    #[inline]
    pub fn from_channels(vals: [f64; 7]) -> Self {
        LevelRecord {
            pressure: vals[0],
            height: vals[1],
            temperature: vals[2],
            humidity: vals[3],
            depression: vals[4],
            wind_direction: vals[5],
            wind_speed: vals[6],
        }
    }
}
