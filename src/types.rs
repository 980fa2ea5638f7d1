//! Type-safe attribute and validity vocabulary for the Flexiplan engine
//!
//! This module replaces stringly-typed attribute and period lookups with
//! proper Rust enums that provide compile-time validation and exhaustive
//! matching. The serialized forms are the wire keys used by the bubble
//! catalog, eligibility table, and selection documents.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A configurable attribute of a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Validity period; gates which values of the other attributes are selectable
    Longevity,
    /// Regular internet allowance in MB
    Data,
    /// 4G-only internet allowance in MB
    FourG,
    /// Voice minutes
    Voice,
    /// SMS count
    Sms,
    /// Bioscope streaming allowance in MB
    Bioscope,
    /// Missed call alert on/off
    #[strum(serialize = "mca")]
    #[serde(rename = "mca")]
    MissedCallAlert,
}

impl Attribute {
    /// Display-unit family for this attribute's magnitudes
    pub fn unit(&self) -> Unit {
        match self {
            Self::Longevity => Unit::Days,
            Self::Data | Self::FourG | Self::Bioscope => Unit::DataVolume,
            Self::Voice => Unit::Minutes,
            Self::Sms => Unit::Sms,
            Self::MissedCallAlert => Unit::OnOff,
        }
    }

    /// Check if this attribute is revalidated when the validity period changes
    ///
    /// Longevity itself drives the revalidation, and the missed call alert is
    /// a boolean toggled independently of the eligibility table.
    pub fn is_reconciled(&self) -> bool {
        matches!(
            self,
            Self::Data | Self::FourG | Self::Voice | Self::Sms | Self::Bioscope
        )
    }

    /// Section heading shown for this attribute in the configurator
    pub fn title(&self) -> &'static str {
        match self {
            Self::Longevity => "Validity",
            Self::Data => "Internet",
            Self::FourG => "4G Internet",
            Self::Voice => "Minutes",
            Self::Sms => "SMS",
            Self::Bioscope => "Bioscope",
            Self::MissedCallAlert => "Missed Call Alert",
        }
    }

    /// Secondary heading line, where the configurator shows one
    pub fn subtitle(&self) -> Option<&'static str> {
        match self {
            Self::Data => Some("Regular"),
            Self::FourG => Some("4G enabled handset + SIM required"),
            Self::Voice => Some("Any Local Number"),
            Self::Bioscope => Some("Only used to watch Bioscope"),
            Self::Longevity | Self::Sms | Self::MissedCallAlert => None,
        }
    }
}

/// A validity period offered by the catalog
///
/// The serialized `day_N` form keys the eligibility table; the numeric day
/// count is what the bubble catalog's longevity row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum Validity {
    #[strum(serialize = "day_1")]
    #[serde(rename = "day_1")]
    Day1,
    #[strum(serialize = "day_3")]
    #[serde(rename = "day_3")]
    Day3,
    #[strum(serialize = "day_7")]
    #[serde(rename = "day_7")]
    Day7,
    #[default]
    #[strum(serialize = "day_30")]
    #[serde(rename = "day_30")]
    Day30,
}

impl Validity {
    /// The period length in days
    pub fn days(&self) -> u32 {
        match self {
            Self::Day1 => 1,
            Self::Day3 => 3,
            Self::Day7 => 7,
            Self::Day30 => 30,
        }
    }

    /// Map a day-count magnitude back to its validity period
    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            1 => Some(Self::Day1),
            3 => Some(Self::Day3),
            7 => Some(Self::Day7),
            30 => Some(Self::Day30),
            _ => None,
        }
    }
}

/// Display-unit family governing how a magnitude renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Megabytes below 1024, gigabytes at or above
    DataVolume,
    /// Voice minutes
    Minutes,
    /// SMS count
    Sms,
    /// Validity days
    Days,
    /// Boolean on/off toggle
    OnOff,
}
