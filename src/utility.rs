//! Helpers shared by the unit tests.

pub mod test_tools {
    pub fn approx_equal(val1: f64, val2: f64, eps: f64) -> bool {
        assert!(eps > 0.0);

        (val1 - val2).abs() < eps
    }

    /// Exact equality where two missing (NaN) values count as equal.
    pub fn same_value(val1: f64, val2: f64) -> bool {
        (val1.is_nan() && val2.is_nan()) || val1 == val2
    }

    pub fn same_values(vals1: &[f64], vals2: &[f64]) -> bool {
        vals1.len() == vals2.len()
            && vals1
                .iter()
                .zip(vals2)
                .all(|(&val1, &val2)| same_value(val1, val2))
    }
}
