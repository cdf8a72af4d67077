// src/data_input/mod.rs

pub mod csv_parser;
pub mod datetime;
pub mod sensor_data;

// src/data_input/mod.rs
