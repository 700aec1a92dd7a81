//! Cross-derive pressure and height so levels that only report one of them can still be placed on
//! the pressure grid.
//!
//! Two slightly different barometric formulas are in play. The one used to flag the grid cell a
//! height-only level lands in uses a scale height of 8400 m, the one used to assign the level a
//! pressure uses an isothermal 288 K atmosphere.

use crate::{format::SoundingFormat, grid::StandardGrid, sounding::LevelRecord};

const SURFACE_PRESSURE_PA: f64 = 101_300.0;
const SCALE_HEIGHT_M: f64 = 8400.0;
const GRAVITY: f64 = 9.81;
const REFERENCE_TEMPERATURE_K: f64 = 288.0;
const DRY_AIR_GAS_CONSTANT: f64 = 287.0;

/// Marks a grid cell placed by a measured pressure.
pub const FROM_PRESSURE: f64 = 1.0;

/// Marks a grid cell placed by a pressure estimated from the height.
pub const FROM_HEIGHT: f64 = -1.0;

/// Levels of one sounding after reconciliation together with the `kind_of_height` column.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciled {
    /// The levels, in file order, with missing pressures filled from the height where possible.
    pub levels: Vec<LevelRecord>,
    /// One flag per grid cell, [`FROM_PRESSURE`], [`FROM_HEIGHT`] or NaN.
    pub kind_of_height: Vec<f64>,
}

/// Pressure estimate used to flag the grid cell of a height-only level.
///
/// # Examples
///
/// ```rust
/// use sounding_ingest::reconcile::flag_pressure;
///
/// assert_eq!(flag_pressure(0.0), 101_300.0);
/// assert!(flag_pressure(5_000.0) < 60_000.0);
/// ```
#[inline]
pub fn flag_pressure(height: f64) -> f64 {
    SURFACE_PRESSURE_PA * (-height / SCALE_HEIGHT_M).exp()
}

/// Pressure estimate assigned to a height-only level before it is snapped to the grid.
#[inline]
pub fn barometric_pressure(height: f64) -> f64 {
    SURFACE_PRESSURE_PA
        / (GRAVITY * height / (REFERENCE_TEMPERATURE_K * DRY_AIR_GAS_CONSTANT)).exp()
}

/// Build the `kind_of_height` column.
///
/// Levels are visited in order and later levels overwrite earlier ones in the same cell.
pub fn kind_of_height(levels: &[LevelRecord], format: &dyn SoundingFormat) -> Vec<f64> {
    let grid = StandardGrid;
    let mut kinds = grid.empty_column();

    for lvl in levels {
        if format.has_pressure(lvl.pressure) {
            kinds[grid.nearest_index(lvl.pressure)] = FROM_PRESSURE;
        } else if format.has_value(lvl.height) {
            kinds[grid.nearest_index(flag_pressure(lvl.height))] = FROM_HEIGHT;
        }
    }

    kinds
}

/// Give every level with a missing pressure and an observed height the grid pressure closest to
/// its barometric estimate.
pub fn fill_pressures(levels: &[LevelRecord], format: &dyn SoundingFormat) -> Vec<LevelRecord> {
    let grid = StandardGrid;

    levels
        .iter()
        .map(|lvl| {
            if !format.has_pressure(lvl.pressure) && format.has_value(lvl.height) {
                LevelRecord {
                    pressure: grid.snap(barometric_pressure(lvl.height)),
                    ..*lvl
                }
            } else {
                *lvl
            }
        })
        .collect()
}

/// Flag the grid cells and fill in missing pressures for one sounding.
///
/// The flags are computed from the levels as read, before any pressure is filled.
pub fn reconcile(levels: &[LevelRecord], format: &dyn SoundingFormat) -> Reconciled {
    Reconciled {
        kind_of_height: kind_of_height(levels, format),
        levels: fill_pressures(levels, format),
    }
}
