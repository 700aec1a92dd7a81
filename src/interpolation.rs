//! Put the observations of one channel onto the standard pressure grid.
use crate::{
    format::SoundingFormat, grid::StandardGrid, keys::Channel, sounding::LevelRecord,
};
use itertools::Itertools;
use strum::IntoEnumIterator;

/// How observations are mapped onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    /// Linear interpolation in the logarithm of pressure between the observations.
    Interpolate,
    /// Each observation is written into its closest grid cell, nothing in between.
    Nearest,
}

impl Default for GridMode {
    fn default() -> Self {
        GridMode::Interpolate
    }
}

/// Resample `(pressure, value)` pairs onto the standard grid.
///
/// The pairs are stable sorted by decreasing pressure first. In [`GridMode::Interpolate`] cells
/// outside the observed pressure range are NaN, and the highest and lowest pressure observations
/// are then written verbatim into their closest cells. Where several observations share a
/// pressure, the first one in the input wins. In [`GridMode::Nearest`] later pairs overwrite
/// earlier ones that land in the same cell.
///
/// With no pairs the whole column is NaN.
///
/// # Examples
///
/// ```rust
/// use sounding_ingest::{interpolation::{resample, GridMode}, StandardGrid};
///
/// let col = resample(&[(100_000.0, 10.0), (50_000.0, -20.0)], GridMode::Interpolate);
///
/// assert_eq!(col[StandardGrid.nearest_index(100_000.0)], 10.0);
/// assert_eq!(col[StandardGrid.nearest_index(50_000.0)], -20.0);
/// assert!(col[StandardGrid.nearest_index(101_000.0)].is_nan());
/// ```
pub fn resample(pairs: &[(f64, f64)], mode: GridMode) -> Vec<f64> {
    let grid = StandardGrid;

    // Stable, so pairs with equal pressures keep their input order.
    let sorted: Vec<(f64, f64)> = pairs
        .iter()
        .cloned()
        .sorted_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal))
        .collect();

    match mode {
        GridMode::Interpolate => {
            let mut col = log_interp(&sorted);

            if let (Some(&(p_high, v_high)), Some(&(p_low, v_low))) =
                (sorted.first(), sorted.last())
            {
                col[grid.nearest_index(p_high)] = v_high;
                col[grid.nearest_index(p_low)] = v_low;
            }

            col
        }
        GridMode::Nearest => {
            let mut col = grid.empty_column();
            for &(p, v) in &sorted {
                col[grid.nearest_index(p)] = v;
            }
            col
        }
    }
}

/// Grid one channel of a reconciled sounding.
///
/// Only levels where both the pressure and the channel value are observations are used, and the
/// values are divided by the format's scale factor first.
pub fn grid_channel(
    levels: &[LevelRecord],
    channel: Channel,
    format: &dyn SoundingFormat,
    mode: GridMode,
) -> Vec<f64> {
    let scale = format.scale(channel);

    let pairs: Vec<(f64, f64)> = levels
        .iter()
        .map(|lvl| (lvl.pressure, lvl.value(channel)))
        .filter(|&(p, v)| format.has_pressure(p) && format.has_value(v))
        .map(|(p, v)| (p, v / scale))
        .collect();

    resample(&pairs, mode)
}

// Piecewise linear in ln(p) over `sorted` (decreasing pressure), NaN outside the observed range.
//
// In ascending ln(p) each grid point uses the right-most observation at or below it, so among
// equal pressures the one that came first in `sorted` is the one used.
fn log_interp(sorted: &[(f64, f64)]) -> Vec<f64> {
    let grid = StandardGrid;

    let (xs, ys): (Vec<f64>, Vec<f64>) = sorted
        .iter()
        .rev()
        .filter(|(p, _)| *p > 0.0)
        .map(|&(p, v)| (p.ln(), v))
        .unzip();

    let (x_min, x_max) = match (xs.first(), xs.last()) {
        (Some(&x_min), Some(&x_max)) => (x_min, x_max),
        _ => return grid.empty_column(),
    };

    grid.pressures()
        .map(|p| {
            let x = p.ln();
            if x < x_min || x > x_max {
                return std::f64::NAN;
            }

            // Number of observations at or below x, at least one given the range check.
            let j = xs.partition_point(|&xp| xp <= x) - 1;
            if j + 1 == xs.len() {
                return ys[j];
            }

            linear_interp(x, xs[j], xs[j + 1], ys[j], ys[j + 1])
        })
        .collect()
}

#[inline]
pub(crate) fn linear_interp(x_val: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    debug_assert!(x1 != x2);

    let run = x2 - x1;
    let rise = y2 - y1;
    let dx = x_val - x1;

    y1 + dx * (rise / run)
}

/// Grid every value channel of a reconciled sounding, in `Channel` order without pressure.
pub fn grid_channels(
    levels: &[LevelRecord],
    format: &dyn SoundingFormat,
    mode: GridMode,
) -> Vec<Vec<f64>> {
    Channel::iter()
        .filter(|&ch| ch != Channel::Pressure)
        .map(|ch| grid_channel(levels, ch, format, mode))
        .collect()
}
