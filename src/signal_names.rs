//! Centralized signal and phase naming utilities
//!
//! Column names in the sensor CSV encode the phase as the digit at character
//! index 1 and the signal type as the final character, e.g. `l1_p` or `L3v`.

use std::fmt;
use std::str::FromStr;

use plotters::style::RGBColor;

use crate::constants::{COLOR_PHASE_1, COLOR_PHASE_2, COLOR_PHASE_3};
use crate::error::SensorError;

pub const PHASE_COUNT: usize = 3;

/// Kind of measurement carried by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalType {
    RealPower,
    ImaginaryPower,
    Current,
    Voltage,
}

/// All signal types in default display order.
pub const SIGNAL_TYPES: [SignalType; 4] = [
    SignalType::RealPower,
    SignalType::ImaginaryPower,
    SignalType::Current,
    SignalType::Voltage,
];

impl SignalType {
    /// Single-character code used as a column suffix.
    pub fn code(self) -> char {
        match self {
            SignalType::RealPower => 'p',
            SignalType::ImaginaryPower => 'q',
            SignalType::Current => 'i',
            SignalType::Voltage => 'v',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignalType::RealPower => "real power",
            SignalType::ImaginaryPower => "imaginary power",
            SignalType::Current => "current",
            SignalType::Voltage => "voltage",
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'p' => Some(SignalType::RealPower),
            'q' => Some(SignalType::ImaginaryPower),
            'i' => Some(SignalType::Current),
            'v' => Some(SignalType::Voltage),
            _ => None,
        }
    }

    /// Subplot title, e.g. "current (i)".
    pub fn subplot_title(self) -> String {
        format!("{} ({})", self.label(), self.code())
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SignalType {
    type Err = SensorError;

    /// Accepts either the one-letter code or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(signal_type) = SignalType::from_code(c) {
                return Ok(signal_type);
            }
        }
        SIGNAL_TYPES
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SensorError::UnknownSignalType(trimmed.to_string()))
    }
}

/// Electrical phase, 1 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Phase(u8);

impl Phase {
    pub fn new(number: u8) -> Option<Self> {
        (1..=PHASE_COUNT as u8).contains(&number).then_some(Phase(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn color(self) -> RGBColor {
        match self.0 {
            1 => *COLOR_PHASE_1,
            2 => *COLOR_PHASE_2,
            _ => *COLOR_PHASE_3,
        }
    }

    /// Legend group name, e.g. "phase 2".
    pub fn legend_name(self) -> String {
        format!("phase {}", self.0)
    }
}

/// Split a column name into its phase and signal type.
///
/// Returns `None` when the name does not follow the `?<phase>...<type>` layout.
pub fn classify_column(name: &str) -> Option<(Phase, SignalType)> {
    let phase_digit = name.chars().nth(1)?.to_digit(10)?;
    let phase = Phase::new(phase_digit as u8)?;
    let signal_type = SignalType::from_code(name.chars().last()?)?;
    Some((phase, signal_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_column() {
        assert_eq!(
            classify_column("l1_p"),
            Some((Phase(1), SignalType::RealPower))
        );
        assert_eq!(classify_column("L3v"), Some((Phase(3), SignalType::Voltage)));
        assert_eq!(classify_column("l2_I"), Some((Phase(2), SignalType::Current)));
    }

    #[test]
    fn test_classify_column_rejects_bad_names() {
        assert_eq!(classify_column("l4_p"), None);
        assert_eq!(classify_column("l0_p"), None);
        assert_eq!(classify_column("lx_p"), None);
        assert_eq!(classify_column("l1_x"), None);
        assert_eq!(classify_column("p"), None);
        assert_eq!(classify_column(""), None);
    }

    #[test]
    fn test_signal_type_parsing() {
        assert_eq!("p".parse::<SignalType>().unwrap(), SignalType::RealPower);
        assert_eq!(" Q ".parse::<SignalType>().unwrap(), SignalType::ImaginaryPower);
        assert_eq!("voltage".parse::<SignalType>().unwrap(), SignalType::Voltage);
        assert!("watts".parse::<SignalType>().is_err());
    }

    #[test]
    fn test_subplot_titles() {
        assert_eq!(SignalType::RealPower.subplot_title(), "real power (p)");
        assert_eq!(SignalType::ImaginaryPower.subplot_title(), "imaginary power (q)");
        assert_eq!(SignalType::Current.subplot_title(), "current (i)");
        assert_eq!(SignalType::Voltage.subplot_title(), "voltage (v)");
    }

    #[test]
    fn test_phase_colors_are_distinct() {
        let colors: Vec<RGBColor> = (1..=3).filter_map(Phase::new).map(Phase::color).collect();
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_eq!(Phase::new(2).map(Phase::legend_name).as_deref(), Some("phase 2"));
        assert!(Phase::new(4).is_none());
    }
}
