//! Builders for fixed-width archive lines and scratch files.
#![allow(dead_code)]

use std::{
    io::{Cursor, Write},
    path::PathBuf,
};

#[allow(unused_macros)]
macro_rules! assert_approx {
    ($left:expr, $right:expr) => {
        assert_approx!($left, $right, 1.0e-6)
    };
    ($left:expr, $right:expr, $eps:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < $eps,
            "{} != {} (tolerance {})",
            left,
            right,
            $eps
        );
    }};
}

/// An IGRA2 header. Latitude and longitude are in ten-thousandths of a degree.
pub fn igra_header(
    date: (&str, &str, &str),
    hour: &str,
    release: &str,
    level_count: usize,
    lat: i32,
    lon: i32,
) -> String {
    let (year, month, day) = date;
    format!(
        "#{:<11} {:>4} {:>2} {:>2} {:>2} {:>4} {:>4} ncdc-gts ncdc-gts {:>7} {:>8}",
        "USM00072520", year, month, day, hour, release, level_count, lat, lon
    )
}

/// An IGRA2 level line, values in the file's raw units.
pub fn igra_level(p: i32, z: i32, t: i32, rh: i32, dpd: i32, wdir: i32, wspd: i32) -> String {
    format!(
        "{:<2} {:>5} {:>6}A{:>5}B{:>5}B{:>5} {:>5} {:>5} {:>5}",
        "21", -9999, p, z, t, rh, dpd, wdir, wspd
    )
}

/// A UCAR header with a packed HHFF time.
pub fn ucar_header(
    date: (&str, &str, &str),
    time: &str,
    type_code: &str,
    level_count: usize,
) -> String {
    let (year, month, day) = date;
    let count = level_count.to_string();

    let mut line = layout(
        104,
        &[
            (16, 21, "72520"),
            (38, 42, year),
            (43, 45, month),
            (46, 48, day),
            (49, 53, time),
            (57, 67, "40.53"),
            (68, 78, "-80.22"),
            (87, 88, type_code),
            (90, 93, &count),
            (94, 104, "12345"),
        ],
    );
    line.replace_range(0..1, "H");
    line
}

/// A UCAR level line, pressure in hPa and everything else unscaled.
pub fn ucar_level(p: f64, z: f64, t: f64, rh: f64, wdir: f64, wspd: f64) -> String {
    let fields = [
        format!("{:.1}", p),
        format!("{:.0}", z),
        format!("{:.1}", t),
        format!("{:.1}", rh),
        format!("{:.0}", wdir),
        format!("{:.1}", wspd),
    ];

    layout(
        50,
        &[
            (0, 4, "1"),
            (5, 13, &fields[0]),
            (14, 22, &fields[1]),
            (23, 29, &fields[2]),
            (30, 36, &fields[3]),
            (37, 43, &fields[4]),
            (44, 50, &fields[5]),
        ],
    )
}

// Right align each text in its byte range of a blank line.
fn layout(len: usize, fields: &[(usize, usize, &str)]) -> String {
    let mut line = " ".repeat(len);
    for &(start, end, text) in fields {
        let width = end - start;
        assert!(text.len() <= width, "{} does not fit {}..{}", text, start, end);
        line.replace_range(start..end, &format!("{:>width$}", text, width = width));
    }
    line
}

/// Join lines into file contents.
pub fn file_contents(lines: &[String]) -> Vec<u8> {
    let mut text = lines.join("\n");
    text.push('\n');
    text.into_bytes()
}

/// Pack `contents` as the only member of a zip archive.
pub fn zipped(member: &str, contents: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);

    writer.start_file(member, options).unwrap();
    writer.write_all(contents).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Write a scratch file unique to this test process.
pub fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("sounding-ingest-{}-{}", std::process::id(), name));

    std::fs::write(&path, contents).unwrap();
    path
}
