//! Display formatting for magnitudes and selections.
//!
//! The unit strings here are part of the configurator's contract with its
//! view: data volumes render in MB below 1024 and in GB with one decimal at
//! or above it, voice renders as "Min", SMS as "SMS", longevity pluralizes
//! "Day", and the missed call alert reads "On" or "Off". Bubble labels are
//! the shorter unit-less form drawn inside the bubbles themselves.

use strum::IntoEnumIterator;

use crate::selection::Selection;
use crate::types::{Attribute, Unit};

/// Megabytes per gigabyte; the threshold where data flips units
const MB_PER_GB: u32 = 1024;

/// Render a magnitude in its unit family
pub fn format_magnitude(value: u32, unit: Unit) -> String {
    match unit {
        Unit::DataVolume => {
            if value >= MB_PER_GB {
                format!("{:.1} GB", f64::from(value) / f64::from(MB_PER_GB))
            } else {
                format!("{value} MB")
            }
        }
        Unit::Minutes => format!("{value} Min"),
        Unit::Sms => format!("{value} SMS"),
        Unit::Days => {
            if value == 1 {
                "1 Day".to_string()
            } else {
                format!("{value} Days")
            }
        }
        Unit::OnOff => format_toggle(value != 0),
    }
}

/// Render an on/off toggle
pub fn format_toggle(enabled: bool) -> String {
    if enabled { "On" } else { "Off" }.to_string()
}

/// The display string for one attribute of a selection
pub fn display_value(selection: &Selection, attribute: Attribute) -> String {
    match attribute {
        Attribute::MissedCallAlert => format_toggle(selection.missed_call_alert),
        other => format_magnitude(selection.amount(other).unwrap_or(0), other.unit()),
    }
}

/// The short unit-less label drawn inside a selectable bubble
///
/// Data-family values at or above 1024 shed their unit and divide down to
/// GB, keeping the exact quotient; everything else is the bare number.
pub fn bubble_label(value: u32) -> String {
    if value >= MB_PER_GB {
        if value % MB_PER_GB == 0 {
            (value / MB_PER_GB).to_string()
        } else {
            format!("{}", f64::from(value) / f64::from(MB_PER_GB))
        }
    } else {
        value.to_string()
    }
}

/// The full "your selection" summary: every attribute with its display
/// string, in declaration order
pub fn summary(selection: &Selection) -> Vec<(Attribute, String)> {
    Attribute::iter()
        .map(|attribute| (attribute, display_value(selection, attribute)))
        .collect()
}
