//! The bubble catalog and the eligibility table.
//!
//! These are the two read-only tables of the configurator. The bubble
//! catalog lists every magnitude an attribute can ever offer; the
//! eligibility table narrows that per validity period. Both are immutable
//! once built and backed by ordered maps, so iteration order is stable.
//!
//! Lookups never fail: an absent row or entry is an empty option set, which
//! the reconciler treats as "nothing selectable here". Compilation from raw
//! documents is equally tolerant and only logs what it skips.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::document::{self, BubbleMapDocument, EligibilityDocument};
use crate::error::{FlexiplanError, Result};
use crate::types::{Attribute, Validity};

/// The empty option set returned for absent rows and entries
const NO_OPTIONS: &[u32] = &[];

// ============================================================================
// Bubble Catalog
// ============================================================================

/// Every magnitude each attribute can offer, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BubbleCatalog {
    rows: BTreeMap<Attribute, Vec<u32>>,
}

impl BubbleCatalog {
    /// Create a catalog with no rows at all
    pub fn empty() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// Set the ordered magnitude row for an attribute
    pub fn with_row(mut self, attribute: Attribute, magnitudes: &[u32]) -> Self {
        self.rows.insert(attribute, magnitudes.to_vec());
        self
    }

    /// The ordered magnitudes offered for an attribute
    ///
    /// An absent row is an empty slice, never an error.
    pub fn magnitudes(&self, attribute: Attribute) -> &[u32] {
        self.rows
            .get(&attribute)
            .map_or(NO_OPTIONS, Vec::as_slice)
    }

    /// Check whether the catalog carries a row for this attribute at all
    pub fn has_row(&self, attribute: Attribute) -> bool {
        self.rows.contains_key(&attribute)
    }

    /// The validity periods offered by the longevity row
    ///
    /// Day counts with no matching period are skipped with a warning.
    pub fn validities(&self) -> Vec<Validity> {
        self.magnitudes(Attribute::Longevity)
            .iter()
            .filter_map(|&days| {
                let validity = Validity::from_days(days);
                if validity.is_none() {
                    warn!("bubble map: no validity period spans {days} days, skipping");
                }
                validity
            })
            .collect()
    }

    /// Compile a raw bubble map document into a catalog
    ///
    /// Unknown attribute keys and non-array rows are skipped with a warning.
    pub fn from_document(doc: &BubbleMapDocument) -> Self {
        let mut catalog = Self::empty();
        for (key, value) in &doc.0 {
            let Ok(attribute) = Attribute::from_str(key) else {
                warn!("bubble map: unknown attribute key {key:?}, skipping");
                continue;
            };
            if let Some(row) = document::magnitude_row("bubble map", key, value) {
                catalog.rows.insert(attribute, row);
            }
        }
        catalog
    }

    /// Parse and compile a bubble map from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::from_document(&BubbleMapDocument::from_json(text)?))
    }
}

impl Default for BubbleCatalog {
    /// The stock Flexiplan catalog
    fn default() -> Self {
        Self::empty()
            .with_row(Attribute::Longevity, stock::LONGEVITY_DAYS)
            .with_row(Attribute::Data, stock::DATA_MB)
            .with_row(Attribute::FourG, stock::FOURG_MB)
            .with_row(Attribute::Voice, stock::VOICE_MIN)
            .with_row(Attribute::Sms, stock::SMS_COUNT)
            .with_row(Attribute::Bioscope, stock::BIOSCOPE_MB)
            .with_row(Attribute::MissedCallAlert, stock::MCA)
    }
}

// ============================================================================
// Eligibility Table
// ============================================================================

/// The eligible magnitudes per attribute under one validity period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EligibilityEntry {
    rows: BTreeMap<Attribute, Vec<u32>>,
}

impl EligibilityEntry {
    /// The eligible magnitudes for an attribute, in display order
    ///
    /// An absent row is an empty slice.
    pub fn options(&self, attribute: Attribute) -> &[u32] {
        self.rows
            .get(&attribute)
            .map_or(NO_OPTIONS, Vec::as_slice)
    }

    /// Check whether this entry carries no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Eligible magnitudes per attribute, keyed by validity period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EligibilityTable {
    entries: BTreeMap<Validity, EligibilityEntry>,
}

impl EligibilityTable {
    /// Create a table with no entries at all
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Set the eligible magnitudes for one validity period and attribute
    pub fn with_options(
        mut self,
        validity: Validity,
        attribute: Attribute,
        magnitudes: &[u32],
    ) -> Self {
        self.entries
            .entry(validity)
            .or_default()
            .rows
            .insert(attribute, magnitudes.to_vec());
        self
    }

    /// The entry for a validity period, if the table carries one
    pub fn entry(&self, validity: Validity) -> Option<&EligibilityEntry> {
        self.entries.get(&validity)
    }

    /// The eligible magnitudes for an attribute under a validity period
    ///
    /// An absent entry and an absent row are both the empty set.
    pub fn options(&self, validity: Validity, attribute: Attribute) -> &[u32] {
        self.entries
            .get(&validity)
            .map_or(NO_OPTIONS, |entry| entry.options(attribute))
    }

    /// Compile a raw eligibility document into a table
    ///
    /// Unknown validity keys, unknown attribute keys, and malformed rows are
    /// skipped with a warning; the surviving rows still compile.
    pub fn from_document(doc: &EligibilityDocument) -> Self {
        let mut table = Self::empty();
        for (key, value) in &doc.0 {
            let Ok(validity) = Validity::from_str(key) else {
                warn!("eligibility table: unknown validity key {key:?}, skipping");
                continue;
            };
            let Value::Object(rows) = value else {
                warn!("eligibility table: entry {key:?} is not an object, treating as absent");
                continue;
            };
            let mut entry = EligibilityEntry::default();
            for (attribute_key, row_value) in rows {
                let Ok(attribute) = Attribute::from_str(attribute_key) else {
                    warn!(
                        "eligibility table: unknown attribute key {attribute_key:?} under {key}, skipping"
                    );
                    continue;
                };
                if let Some(row) =
                    document::magnitude_row("eligibility table", attribute_key, row_value)
                {
                    entry.rows.insert(attribute, row);
                }
            }
            table.entries.insert(validity, entry);
        }
        table
    }

    /// Parse and compile an eligibility table from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::from_document(&EligibilityDocument::from_json(text)?))
    }

    /// Check that every eligible magnitude also appears in the catalog
    ///
    /// The tables ship as separate documents, so nothing forces them to
    /// agree. This makes the cross-check available to table authors.
    pub fn validate_against(&self, catalog: &BubbleCatalog) -> Result<()> {
        for (validity, entry) in &self.entries {
            for (attribute, row) in &entry.rows {
                for magnitude in row {
                    if !catalog.magnitudes(*attribute).contains(magnitude) {
                        return Err(FlexiplanError::validation(format!(
                            "{validity} offers {magnitude} for {attribute}, \
                             which the bubble map does not carry"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for EligibilityTable {
    /// The stock Flexiplan eligibility table
    fn default() -> Self {
        Self::empty()
            .with_options(Validity::Day1, Attribute::Data, stock::day_1::DATA_MB)
            .with_options(Validity::Day1, Attribute::FourG, stock::day_1::FOURG_MB)
            .with_options(Validity::Day1, Attribute::Voice, stock::day_1::VOICE_MIN)
            .with_options(Validity::Day1, Attribute::Sms, stock::day_1::SMS_COUNT)
            .with_options(Validity::Day1, Attribute::Bioscope, stock::day_1::BIOSCOPE_MB)
            .with_options(Validity::Day3, Attribute::Data, stock::day_3::DATA_MB)
            .with_options(Validity::Day3, Attribute::FourG, stock::day_3::FOURG_MB)
            .with_options(Validity::Day3, Attribute::Voice, stock::day_3::VOICE_MIN)
            .with_options(Validity::Day3, Attribute::Sms, stock::day_3::SMS_COUNT)
            .with_options(Validity::Day3, Attribute::Bioscope, stock::day_3::BIOSCOPE_MB)
            .with_options(Validity::Day7, Attribute::Data, stock::day_7::DATA_MB)
            .with_options(Validity::Day7, Attribute::FourG, stock::day_7::FOURG_MB)
            .with_options(Validity::Day7, Attribute::Voice, stock::day_7::VOICE_MIN)
            .with_options(Validity::Day7, Attribute::Sms, stock::day_7::SMS_COUNT)
            .with_options(Validity::Day7, Attribute::Bioscope, stock::day_7::BIOSCOPE_MB)
            .with_options(Validity::Day30, Attribute::Data, stock::day_30::DATA_MB)
            .with_options(Validity::Day30, Attribute::FourG, stock::day_30::FOURG_MB)
            .with_options(Validity::Day30, Attribute::Voice, stock::day_30::VOICE_MIN)
            .with_options(Validity::Day30, Attribute::Sms, stock::day_30::SMS_COUNT)
            .with_options(
                Validity::Day30,
                Attribute::Bioscope,
                stock::day_30::BIOSCOPE_MB,
            )
    }
}

// ============================================================================
// Stock Tables
// ============================================================================

/// Stock Flexiplan plan data, compiled in as the defaults.
///
/// Magnitudes are in the attribute's native unit: MB for the internet rows,
/// minutes for voice, counts for SMS, days for longevity.
pub mod stock {
    /// Validity periods offered, as day counts.
    pub const LONGEVITY_DAYS: &[u32] = &[1, 3, 7, 30];

    /// Regular internet bubbles.
    pub const DATA_MB: &[u32] = &[
        0, 75, 250, 512, 1024, 2048, 3072, 5120, 10240, 15360, 25600,
    ];

    /// 4G internet bubbles.
    pub const FOURG_MB: &[u32] = &[0, 512, 1024, 2048, 4096, 10240];

    /// Voice bubbles.
    pub const VOICE_MIN: &[u32] = &[0, 25, 50, 75, 100, 150, 200, 300, 500];

    /// SMS bubbles.
    pub const SMS_COUNT: &[u32] = &[0, 10, 20, 50, 100, 200];

    /// Bioscope bubbles.
    pub const BIOSCOPE_MB: &[u32] = &[0, 512, 1024, 2048];

    /// Missed-call-alert row as later catalog revisions carry it.
    pub const MCA: &[u32] = &[0, 1];

    /// Eligible magnitudes under the 1-day period.
    pub mod day_1 {
        pub const DATA_MB: &[u32] = &[0, 75, 250, 512, 1024];
        pub const FOURG_MB: &[u32] = &[0, 512, 1024];
        pub const VOICE_MIN: &[u32] = &[0, 25, 50, 75, 100];
        pub const SMS_COUNT: &[u32] = &[0, 10, 20, 50];
        pub const BIOSCOPE_MB: &[u32] = &[0, 512];
    }

    /// Eligible magnitudes under the 3-day period.
    pub mod day_3 {
        pub const DATA_MB: &[u32] = &[0, 250, 512, 1024, 2048, 3072];
        pub const FOURG_MB: &[u32] = &[0, 512, 1024, 2048];
        pub const VOICE_MIN: &[u32] = &[0, 25, 50, 75, 100, 150, 200];
        pub const SMS_COUNT: &[u32] = &[0, 10, 20, 50, 100];
        pub const BIOSCOPE_MB: &[u32] = &[0, 512, 1024];
    }

    /// Eligible magnitudes under the 7-day period.
    pub mod day_7 {
        pub const DATA_MB: &[u32] = &[0, 512, 1024, 2048, 3072, 5120, 10240];
        pub const FOURG_MB: &[u32] = &[0, 1024, 2048, 4096];
        pub const VOICE_MIN: &[u32] = &[0, 50, 100, 150, 200, 300];
        pub const SMS_COUNT: &[u32] = &[0, 20, 50, 100, 200];
        pub const BIOSCOPE_MB: &[u32] = &[0, 512, 1024, 2048];
    }

    /// Eligible magnitudes under the 30-day period.
    pub mod day_30 {
        pub const DATA_MB: &[u32] = &[0, 1024, 2048, 3072, 5120, 10240, 15360, 25600];
        pub const FOURG_MB: &[u32] = &[0, 1024, 2048, 4096, 10240];
        pub const VOICE_MIN: &[u32] = &[0, 100, 200, 300, 500];
        pub const SMS_COUNT: &[u32] = &[0, 50, 100, 200];
        pub const BIOSCOPE_MB: &[u32] = &[0, 1024, 2048];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_absent_rows_are_empty_sets() {
        let catalog = BubbleCatalog::empty();
        assert_eq!(catalog.magnitudes(Attribute::Data), NO_OPTIONS);
        assert!(!catalog.has_row(Attribute::Data));

        let table = EligibilityTable::empty();
        assert!(table.entry(Validity::Day7).is_none());
        assert_eq!(table.options(Validity::Day7, Attribute::Data), NO_OPTIONS);
    }

    #[test]
    fn test_absent_row_within_present_entry() {
        let table = EligibilityTable::empty().with_options(
            Validity::Day7,
            Attribute::Data,
            &[512, 1024],
        );
        let entry = table.entry(Validity::Day7).unwrap();
        assert_eq!(entry.options(Attribute::Data), &[512, 1024]);
        assert_eq!(entry.options(Attribute::Voice), NO_OPTIONS);
        assert!(!entry.is_empty());
    }

    #[test]
    fn test_stock_catalog_covers_every_attribute() {
        let catalog = BubbleCatalog::default();
        for attribute in Attribute::iter() {
            assert!(
                catalog.has_row(attribute),
                "stock catalog is missing {attribute}"
            );
            assert!(!catalog.magnitudes(attribute).is_empty());
        }
    }

    #[test]
    fn test_stock_validities_in_catalog_order() {
        let catalog = BubbleCatalog::default();
        assert_eq!(
            catalog.validities(),
            vec![
                Validity::Day1,
                Validity::Day3,
                Validity::Day7,
                Validity::Day30
            ]
        );
    }

    #[test]
    fn test_unknown_day_counts_are_skipped() {
        let catalog = BubbleCatalog::empty().with_row(Attribute::Longevity, &[1, 14, 30]);
        assert_eq!(catalog.validities(), vec![Validity::Day1, Validity::Day30]);
    }

    #[test]
    fn test_stock_eligibility_is_consistent_with_stock_catalog() {
        let table = EligibilityTable::default();
        table.validate_against(&BubbleCatalog::default()).unwrap();
    }

    #[test]
    fn test_stock_eligibility_covers_every_period_and_quantity() {
        let table = EligibilityTable::default();
        for validity in Validity::iter() {
            for attribute in Attribute::iter().filter(Attribute::is_reconciled) {
                let options = table.options(validity, attribute);
                assert!(
                    !options.is_empty(),
                    "stock table is missing {attribute} under {validity}"
                );
                assert_eq!(options.first(), Some(&0), "{attribute} under {validity}");
            }
        }
    }

    #[test]
    fn test_validate_against_flags_stray_magnitude() {
        let catalog = BubbleCatalog::empty().with_row(Attribute::Data, &[0, 512]);
        let table = EligibilityTable::empty().with_options(
            Validity::Day7,
            Attribute::Data,
            &[0, 512, 1024],
        );
        let err = table.validate_against(&catalog).unwrap_err();
        assert!(err.to_string().contains("1024"));
    }

    #[test]
    fn test_catalog_compilation_skips_unknown_keys() {
        let catalog = BubbleCatalog::from_json(
            r#"{"data": [0, 512], "ringtone": [1, 2], "voice": "lots"}"#,
        )
        .unwrap();
        assert_eq!(catalog.magnitudes(Attribute::Data), &[0, 512]);
        assert!(!catalog.has_row(Attribute::Voice));
        assert_eq!(catalog.rows.len(), 1);
    }

    #[test]
    fn test_eligibility_compilation_is_tolerant() {
        let table = EligibilityTable::from_json(
            r#"{
                "day_7": {"data": [0, 512], "ringtone": [9], "voice": 5},
                "day_90": {"data": [0]},
                "day_1": []
            }"#,
        )
        .unwrap();
        assert_eq!(table.options(Validity::Day7, Attribute::Data), &[0, 512]);
        assert_eq!(table.options(Validity::Day7, Attribute::Voice), NO_OPTIONS);
        assert!(table.entry(Validity::Day1).is_none());
        assert_eq!(table.entries.len(), 1);
    }

    #[test]
    fn test_table_serde_roundtrip() {
        let table = EligibilityTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let parsed: EligibilityTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, parsed);

        let catalog = BubbleCatalog::default();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: BubbleCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(catalog, parsed);
    }
}
