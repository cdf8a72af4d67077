// src/data_input/csv_parser.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::constants::{DAY_COLUMN, TIME_COLUMN};
use crate::data_input::datetime::prep_datetime;
use crate::data_input::sensor_data::{SensorFrame, SignalColumn};
use crate::error::{SensorError, SensorResult};
use crate::signal_names::classify_column;

/// Loads the sensor CSV at `input_file_path`.
pub fn load_sensor_csv(input_file_path: &Path) -> SensorResult<SensorFrame> {
    let file = File::open(input_file_path).map_err(|source| SensorError::Open {
        path: input_file_path.to_path_buf(),
        source,
    })?;
    info!("Reading sensor data from '{}'", input_file_path.display());
    parse_sensor_csv(BufReader::new(file))
}

/// Parses sensor CSV content.
///
/// The `day` and `time` columns are merged into the timestamp index and
/// dropped; every other column that follows the phase/type naming scheme
/// becomes a `SignalColumn`. Rows with an unparseable timestamp are skipped.
pub fn parse_sensor_csv<R: Read>(reader: R) -> SensorResult<SensorFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let header_record = reader.headers()?.clone();
    debug!("Headers found in CSV: {:?}", header_record);

    let day_idx = header_record
        .iter()
        .position(|h| h == DAY_COLUMN)
        .ok_or(SensorError::MissingColumn(DAY_COLUMN))?;
    let time_idx = header_record
        .iter()
        .position(|h| h == TIME_COLUMN)
        .ok_or(SensorError::MissingColumn(TIME_COLUMN))?;

    // (csv index, column under construction)
    let mut value_columns: Vec<(usize, SignalColumn)> = Vec::new();
    for (csv_idx, name) in header_record.iter().enumerate() {
        if csv_idx == day_idx || csv_idx == time_idx {
            continue;
        }
        match classify_column(name) {
            Some((phase, signal_type)) => {
                debug!("  '{}': phase {} / {}", name, phase.number(), signal_type.label());
                value_columns.push((
                    csv_idx,
                    SignalColumn {
                        name: name.to_string(),
                        phase,
                        signal_type,
                        values: Vec::new(),
                    },
                ));
            }
            None => warn!("Ignoring column '{}': not a phase signal column", name),
        }
    }

    if value_columns.is_empty() {
        return Err(SensorError::NoSignalColumns);
    }
    info!("Found {} phase signal columns", value_columns.len());

    let mut timestamps = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping row {} due to CSV read error: {}", row_index + 1, e);
                continue;
            }
        };

        let day = record.get(day_idx).unwrap_or("");
        let time = record.get(time_idx).unwrap_or("");
        let timestamp = match prep_datetime(day, time) {
            Ok(ts) => ts,
            Err(e) => {
                warn!("Skipping row {}: {}", row_index + 1, e);
                continue;
            }
        };

        timestamps.push(timestamp);
        for (csv_idx, column) in value_columns.iter_mut() {
            let value = record
                .get(*csv_idx)
                .and_then(|val_str| val_str.parse::<f64>().ok())
                .unwrap_or(f64::NAN);
            column.values.push(value);
        }
    }

    info!("Finished reading {} data rows.", timestamps.len());

    Ok(SensorFrame {
        timestamps,
        columns: value_columns.into_iter().map(|(_, c)| c).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_day_and_time_columns() {
        let csv = "day,time,l1_p,l1_v\n2020-10-20,00:00:00,1.5,230\n";
        let frame = parse_sensor_csv(csv.as_bytes()).unwrap();
        assert_eq!(frame.len(), 1);
        let names: Vec<&str> = frame.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["l1_p", "l1_v"]);
    }

    #[test]
    fn test_missing_time_column() {
        let csv = "day,l1_p\n2020-10-20,1.0\n";
        let err = parse_sensor_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SensorError::MissingColumn("time")));
    }

    #[test]
    fn test_no_signal_columns() {
        let csv = "day,time,temperature\n2020-10-20,00:00:00,21.0\n";
        let err = parse_sensor_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SensorError::NoSignalColumns));
    }

    #[test]
    fn test_blank_cells_become_nan() {
        let csv = "day,time,l2_i\n2020-10-20,00:00:00,\n2020-10-20,00:00:01,3\n";
        let frame = parse_sensor_csv(csv.as_bytes()).unwrap();
        let values = &frame.columns[0].values;
        assert!(values[0].is_nan());
        assert_eq!(values[1], 3.0);
    }

    #[test]
    fn test_out_of_range_time_rows_are_skipped() {
        let csv = "day,time,l1_p\n\
                   2020-10-20,00:00:00,1.0\n\
                   2020-10-20,99999999999:00:00,2.0\n\
                   2020-10-20,999999999 days 00:00:00,3.0\n\
                   2020-10-20,00:00:05,4.0\n";
        let frame = parse_sensor_csv(csv.as_bytes()).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.columns[0].values, vec![1.0, 4.0]);
    }
}
