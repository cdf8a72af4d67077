// tests/csv_loading_test.rs

use std::path::PathBuf;

use three_phase_csv_render::data_input::csv_parser::{load_sensor_csv, parse_sensor_csv};
use three_phase_csv_render::error::SensorError;
use three_phase_csv_render::signal_names::{Phase, SignalType};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample_sensor.csv")
}

#[test]
fn test_load_sample_file() {
    let frame = load_sensor_csv(&sample_path()).unwrap();
    assert_eq!(frame.len(), 60);
    assert_eq!(frame.columns.len(), 12);

    let start = frame.start().unwrap();
    assert_eq!(start.to_string(), "2020-10-20 10:00:00");
    assert_eq!(frame.time_span_secs(), Some((0.0, 295.0)));

    let l2_v = frame.column("l2_v").unwrap();
    assert_eq!(l2_v.phase, Phase::new(2).unwrap());
    assert_eq!(l2_v.signal_type, SignalType::Voltage);
    assert_eq!(l2_v.values.len(), 60);
    assert!(l2_v.values[41].is_nan());
}

#[test]
fn test_missing_file_reports_path() {
    let err = load_sensor_csv(&PathBuf::from("does/not/exist.csv")).unwrap_err();
    assert!(matches!(err, SensorError::Open { .. }));
    assert!(err.to_string().contains("does/not/exist.csv"));
}

#[test]
fn test_rows_with_bad_timestamps_are_skipped() {
    let csv = "\
day,time,l1_p
2020-10-20,10:00:00,1.0
not-a-day,10:00:01,2.0
2020-10-20,25h,3.0
2020-10-20,10:00:03,4.0
";
    let frame = parse_sensor_csv(csv.as_bytes()).unwrap();
    assert_eq!(frame.len(), 2);
    assert_eq!(frame.columns[0].values, vec![1.0, 4.0]);
}

#[test]
fn test_unclassified_columns_are_ignored() {
    let csv = "day,time,id,l1_p,l9_p,l3_x\n2020-10-20,10:00:00,7,1.0,2.0,3.0\n";
    let frame = parse_sensor_csv(csv.as_bytes()).unwrap();
    let names: Vec<&str> = frame.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["l1_p"]);
}

#[test]
fn test_timedelta_style_time_column() {
    let csv = "day,time,l1_i\n2020-10-20,0 days 00:00:01.500000,1.0\n";
    let frame = parse_sensor_csv(csv.as_bytes()).unwrap();
    assert_eq!(frame.start().unwrap().to_string(), "2020-10-20 00:00:01.500");
}

#[test]
fn test_missing_day_column() {
    let csv = "time,l1_p\n10:00:00,1.0\n";
    let err = parse_sensor_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, SensorError::MissingColumn("day")));
}
