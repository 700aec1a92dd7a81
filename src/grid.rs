//! The standard pressure grid every sounding is resampled onto.
//!
//! The grid runs from 500 Pa to 105000 Pa in steps of 100 Pa, ascending. It is a plain constant,
//! so it can be shared freely between threads reading different files.

/// Number of levels in the standard grid.
pub const GRID_LEN: usize = 1046;

/// Lowest pressure on the grid in Pa.
pub const GRID_BOTTOM_PA: f64 = 500.0;

/// Spacing of the grid in Pa.
pub const GRID_STEP_PA: f64 = 100.0;

/// The standard pressure grid, 500 Pa to 105000 Pa in 100 Pa steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandardGrid;

impl StandardGrid {
    /// Number of grid levels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_ingest::StandardGrid;
    ///
    /// assert_eq!(StandardGrid.len(), 1046);
    /// ```
    #[inline]
    pub const fn len(self) -> usize {
        GRID_LEN
    }

    /// Always false, the grid is never empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Pressure in Pa at grid index `idx`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_ingest::StandardGrid;
    ///
    /// assert_eq!(StandardGrid.pressure(0), 500.0);
    /// assert_eq!(StandardGrid.pressure(1045), 105_000.0);
    /// ```
    #[inline]
    pub fn pressure(self, idx: usize) -> f64 {
        debug_assert!(idx < GRID_LEN);
        GRID_BOTTOM_PA + GRID_STEP_PA * idx as f64
    }

    /// Iterate over the grid pressures in Pa, ascending.
    pub fn pressures(self) -> impl Iterator<Item = f64> + Clone {
        (0..GRID_LEN).map(move |i| self.pressure(i))
    }

    /// Index of the grid level closest to `pressure` (Pa).
    ///
    /// Values off either end of the grid snap to the end levels. A pressure exactly half way
    /// between two levels goes to the lower index, and NaN maps to index 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_ingest::StandardGrid;
    ///
    /// assert_eq!(StandardGrid.nearest_index(85_040.0), 845);
    /// assert_eq!(StandardGrid.nearest_index(550.0), 0);
    /// assert_eq!(StandardGrid.nearest_index(-9999.0), 0);
    /// assert_eq!(StandardGrid.nearest_index(200_000.0), 1045);
    /// ```
    pub fn nearest_index(self, pressure: f64) -> usize {
        if pressure.is_nan() {
            return 0;
        }

        let pos = (pressure - GRID_BOTTOM_PA) / GRID_STEP_PA;
        if pos <= 0.0 {
            return 0;
        }
        if pos >= (GRID_LEN - 1) as f64 {
            return GRID_LEN - 1;
        }

        let below = pos.floor() as usize;
        let above = below + 1;
        let d_below = (pressure - self.pressure(below)).abs();
        let d_above = (self.pressure(above) - pressure).abs();

        if d_above < d_below {
            above
        } else {
            below
        }
    }

    /// Snap `pressure` (Pa) onto the closest grid level.
    #[inline]
    pub fn snap(self, pressure: f64) -> f64 {
        self.pressure(self.nearest_index(pressure))
    }

    /// A new array the size of the grid with every cell unset.
    #[inline]
    pub fn empty_column(self) -> Vec<f64> {
        vec![std::f64::NAN; GRID_LEN]
    }
}
