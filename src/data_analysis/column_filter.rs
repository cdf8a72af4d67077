// src/data_analysis/column_filter.rs

use crate::data_analysis::selection::TypeSelection;
use crate::data_input::sensor_data::{SensorFrame, SignalColumn};

/// Columns whose signal-type suffix is part of the selection, in frame order.
pub fn filter_columns_by_type<'a>(
    frame: &'a SensorFrame,
    selection: &TypeSelection,
) -> Vec<&'a SignalColumn> {
    frame
        .columns
        .iter()
        .filter(|column| selection.contains(column.signal_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_names::classify_column;

    fn frame_with(names: &[&str]) -> SensorFrame {
        let columns = names
            .iter()
            .map(|name| {
                let (phase, signal_type) = classify_column(name).unwrap();
                SignalColumn {
                    name: name.to_string(),
                    phase,
                    signal_type,
                    values: Vec::new(),
                }
            })
            .collect();
        SensorFrame {
            timestamps: Vec::new(),
            columns,
        }
    }

    #[test]
    fn test_filter_keeps_frame_order() {
        let frame = frame_with(&["l1_p", "l1_v", "l2_p", "l2_v", "l3_i"]);
        let selection: TypeSelection = "v,p".parse().unwrap();
        let names: Vec<&str> = filter_columns_by_type(&frame, &selection)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["l1_p", "l1_v", "l2_p", "l2_v"]);
    }

    #[test]
    fn test_empty_selection_keeps_nothing() {
        let frame = frame_with(&["l1_p", "l2_q"]);
        let selection = TypeSelection::new([]);
        assert!(filter_columns_by_type(&frame, &selection).is_empty());
    }
}
