#[macro_use]
mod utils;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime};
use sounding_ingest::{
    parse_lines, parse_soundings, read_file, DatasetOrigin, Format, IngestError, ReadOptions,
    SoundingType, StandardGrid, StationContext, Variable,
};
use utils::*;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn archive() -> Vec<String> {
    vec![
        igra_header(("1990", "01", "01"), "00", "2315", 3, 404700, -799600),
        igra_level(97800, 360, -50, 832, 22, 270, 51),
        igra_level(85000, 1500, -100, 500, 40, 280, 100),
        igra_level(-9999, 3000, -200, -9999, -9999, 290, 150),
        igra_header(("1990", "01", "02"), "12", "1105", 2, 404700, -799600),
        igra_level(100000, 100, 20, 900, 10, -9999, -9999),
        igra_level(50000, 5600, -250, -9999, -9999, -9999, -9999),
    ]
}

#[test]
fn test_reads_every_sounding() {
    let series = parse_lines(
        &archive(),
        Format::Igra,
        &StationContext::new(),
        &ReadOptions::new(),
    )
    .unwrap();

    assert_eq!(series.station(), "USM00072520");
    assert_eq!(
        series.times().collect::<Vec<_>>(),
        vec![dt(1990, 1, 1, 23, 0), dt(1990, 1, 2, 11, 0)]
    );

    let first = &series.entries()[0];
    assert_eq!(first.release_time, Some(dt(1990, 1, 1, 23, 15)));
    assert_eq!(first.kind, SoundingType::Radiosonde);
    assert_eq!(first.origin, DatasetOrigin::Igra);
    assert_approx!(first.lat.unwrap(), 40.47);
    assert_approx!(first.lon.unwrap(), -79.96);
}

#[test]
fn test_profile_values() {
    let grid = StandardGrid;
    let series = parse_lines(
        &archive(),
        Format::Igra,
        &StationContext::new(),
        &ReadOptions::new(),
    )
    .unwrap();
    let prof = &series.entries()[0].profile;

    let temp = prof.get(Variable::AirTemperature);
    assert_approx!(temp[grid.nearest_index(97_800.0)], 268.15);
    assert_approx!(temp[grid.nearest_index(85_000.0)], 263.15);
    let between = temp[grid.nearest_index(90_000.0)];
    assert!(between > 263.15 && between < 268.15);

    // The height-only level gets a pressure of 71000 Pa and is the top of the profile.
    assert_approx!(temp[grid.nearest_index(71_000.0)], 253.15);
    assert!(temp[grid.nearest_index(70_900.0)].is_nan());

    let dew_point = prof.get(Variable::DewPointTemperature);
    assert_approx!(dew_point[grid.nearest_index(97_800.0)], 265.95);

    let kinds = prof.get(Variable::KindOfHeight);
    assert_eq!(kinds[grid.nearest_index(97_800.0)], 1.0);
    assert_eq!(kinds[grid.nearest_index(85_000.0)], 1.0);
    assert_eq!(kinds[grid.nearest_index(70_900.0)], -1.0);
    assert_eq!(kinds.iter().filter(|k| !k.is_nan()).count(), 3);

    assert_approx!(prof.get(Variable::RelativeHumidity)[grid.nearest_index(97_800.0)], 83.2);
    assert_approx!(prof.get(Variable::WindSpeed)[grid.nearest_index(97_800.0)], 5.1);
    assert_approx!(prof.get(Variable::WindSpeed)[grid.nearest_index(71_000.0)], 15.0);
}

#[test]
fn test_levels_belong_to_their_header() {
    // The first header only owns one level line, so the second header is read as a level and
    // its own levels are passed over.
    let lines = vec![
        igra_header(("1990", "01", "01"), "00", "0005", 1, 404700, -799600),
        igra_header(("1990", "01", "01"), "12", "1105", 2, 404700, -799600),
        igra_level(100000, 100, 20, 900, 10, 0, 0),
        igra_level(50000, 5600, -250, -9999, -9999, 0, 0),
    ];

    let snds = parse_soundings(&lines, Format::Igra, &StationContext::new());
    assert_eq!(snds.len(), 1);
    assert_eq!(snds[0].nominal_time(), dt(1990, 1, 1, 0, 0));
    assert_eq!(snds[0].levels().len(), 1);
}

#[test]
fn test_missing_time_skips_record_and_levels() {
    let mut lines = vec![
        igra_header(("1990", "01", "01"), "99", "9999", 2, 404700, -799600),
        igra_level(100000, 100, 20, 900, 10, 0, 0),
        igra_level(50000, 5600, -250, -9999, -9999, 0, 0),
    ];
    lines.extend(archive());

    let snds = parse_soundings(&lines, Format::Igra, &StationContext::new());
    assert_eq!(snds.len(), 2);
    assert_eq!(snds[0].nominal_time(), dt(1990, 1, 1, 23, 0));
}

#[test]
fn test_truncated_sounding_skipped() {
    let mut lines = archive();
    lines.pop();

    let snds = parse_soundings(&lines, Format::Igra, &StationContext::new());
    assert_eq!(snds.len(), 1);
}

#[test]
fn test_local_nominal_hour_shifted() {
    let lines = vec![
        igra_header(("1990", "01", "01"), "12", "9999", 1, 404700, -799600),
        igra_level(100000, 100, 20, 900, 10, 0, 0),
    ];
    let ctx = StationContext::new().with_timezone(FixedOffset::west_opt(5 * 3600).unwrap());

    let snds = parse_soundings(&lines, Format::Igra, &ctx);
    assert_eq!(snds[0].nominal_time(), dt(1990, 1, 1, 17, 0));
    assert_eq!(snds[0].release_time(), Some(dt(1990, 1, 1, 17, 0)));
}

#[test]
fn test_pibal_classification() {
    let lines = vec![
        igra_header(("1990", "01", "01"), "00", "2315", 2, 404700, -799600),
        igra_level(97800, 360, -9999, -9999, -9999, 270, 51),
        igra_level(85000, 1500, -9999, -9999, -9999, 280, 100),
    ];

    let snds = parse_soundings(&lines, Format::Igra, &StationContext::new());
    assert_eq!(snds[0].kind(), SoundingType::PiBal);
}

#[test]
fn test_plain_and_zipped_files_agree() {
    let contents = file_contents(&archive());
    let plain = scratch_file("igra-plain.txt", &contents);
    let zip = scratch_file("igra-zipped.zip", &zipped("USM00072520-data.txt", &contents));

    let ctx = StationContext::new();
    let opts = ReadOptions::new();
    let from_plain = read_file(&plain, Format::Igra, &ctx, &opts).unwrap();
    let from_zip = read_file(&zip, Format::Igra, &ctx, &opts).unwrap();

    assert_eq!(from_plain.len(), 2);
    assert_eq!(
        from_plain.times().collect::<Vec<_>>(),
        from_zip.times().collect::<Vec<_>>()
    );

    std::fs::remove_file(plain).unwrap();
    std::fs::remove_file(zip).unwrap();
}

#[test]
fn test_file_without_soundings() {
    let lines = vec!["garbage".to_owned(), igra_level(100000, 100, 20, 900, 10, 0, 0)];
    let path = scratch_file("igra-empty.txt", &file_contents(&lines));

    match read_file(&path, Format::Igra, &StationContext::new(), &ReadOptions::new()) {
        Err(IngestError::NoValidSoundings(name)) => assert!(name.contains("igra-empty.txt")),
        other => panic!("unexpected result: {:?}", other.map(|s| s.len())),
    }

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_missing_file() {
    let result = read_file(
        "/this/path/does/not/exist.txt",
        Format::Igra,
        &StationContext::new(),
        &ReadOptions::new(),
    );

    match result {
        Err(IngestError::Io(_)) => {}
        other => panic!("unexpected result: {:?}", other.map(|s| s.len())),
    }
}
