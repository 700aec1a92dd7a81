#![allow(dead_code)]

use chrono::{Datelike, Duration, NaiveDate};
use sounding_ingest::{parse_soundings, Format, Sounding, StationContext};

/// A synthetic IGRA2 archive, two soundings a day for `days` days with `levels` levels each.
///
/// Every seventh level is missing its pressure and only every fifth reports a height, so the
/// reconciliation has something to do.
pub fn igra_archive(days: i64, levels: usize) -> Vec<String> {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();

    let mut lines = Vec::with_capacity(days as usize * 2 * (levels + 1));
    for day in 0..days {
        let date = start + Duration::days(day);

        for &(hour, release) in &[(0, 23), (12, 11)] {
            lines.push(format!(
                "#{:<11} {:04} {:02} {:02} {:02} {:02}05 {:>4} ncdc-gts ncdc-gts {:>7} {:>8}",
                "USM00072520",
                date.year(),
                date.month(),
                date.day(),
                hour,
                release,
                levels,
                404700,
                -799600
            ));

            for i in 0..levels {
                let frac = i as f64 / levels as f64;
                let p = (101_000.0 * (-3.0 * frac).exp()) as i32;
                let z = (8400.0 * 3.0 * frac) as i32;
                let t = (150.0 - 700.0 * frac) as i32;

                let pressure = if i % 7 == 6 { -9999 } else { p };
                let height = if i % 7 == 6 || i % 5 == 4 { z } else { -9999 };

                lines.push(format!(
                    "{:<2} {:>5} {:>6}A{:>5}B{:>5}B{:>5} {:>5} {:>5} {:>5}",
                    "21", -9999, pressure, height, t, 800, 30, 270, 100
                ));
            }
        }
    }

    lines
}

pub fn igra_soundings() -> Vec<Sounding> {
    parse_soundings(&igra_archive(30, 120), Format::Igra, &StationContext::new())
}
