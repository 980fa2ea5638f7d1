//! The bundle selection: one value per attribute.
//!
//! A [`Selection`] is the single mutable entity of the configurator, and it
//! is deliberately a plain `Copy` value rather than a shared instance.
//! Callers own their selection outright and replace it with the output of
//! [`crate::reconcile::select`]; nothing in this crate holds selection state
//! behind the caller's back.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::warn;

use crate::catalog::{BubbleCatalog, EligibilityTable};
use crate::document::SelectionDocument;
use crate::error::{FlexiplanError, Result};
use crate::reconcile::OFF_VALUE;
use crate::types::{Attribute, Validity};

/// A complete bundle selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Validity period; gates the eligible sets of every other attribute
    pub longevity: Validity,
    /// Regular internet in MB
    pub data: u32,
    /// 4G internet in MB
    pub fourg: u32,
    /// Voice minutes
    pub voice: u32,
    /// SMS count
    pub sms: u32,
    /// Bioscope streaming in MB
    pub bioscope: u32,
    /// Missed call alert; never filtered by the eligibility table
    #[serde(rename = "mca")]
    pub missed_call_alert: bool,
}

impl Default for Selection {
    /// The stock starting selection: a 30-day bundle
    fn default() -> Self {
        Self {
            longevity: Validity::Day30,
            data: 1024,
            fourg: 0,
            voice: 100,
            sms: 50,
            bioscope: 0,
            missed_call_alert: false,
        }
    }
}

impl Selection {
    /// The numeric magnitude held for an attribute
    ///
    /// Longevity reads back as its day count. The missed call alert is a
    /// boolean rather than a magnitude, so it has no amount.
    pub fn amount(&self, attribute: Attribute) -> Option<u32> {
        match attribute {
            Attribute::Longevity => Some(self.longevity.days()),
            Attribute::Data => Some(self.data),
            Attribute::FourG => Some(self.fourg),
            Attribute::Voice => Some(self.voice),
            Attribute::Sms => Some(self.sms),
            Attribute::Bioscope => Some(self.bioscope),
            Attribute::MissedCallAlert => None,
        }
    }

    /// Overwrite the magnitude held for a quantity attribute
    pub(crate) fn set_amount(&mut self, attribute: Attribute, value: u32) {
        match attribute {
            Attribute::Data => self.data = value,
            Attribute::FourG => self.fourg = value,
            Attribute::Voice => self.voice = value,
            Attribute::Sms => self.sms = value,
            Attribute::Bioscope => self.bioscope = value,
            // Longevity is typed and the alert is boolean; the reconciler
            // never sweeps either as a magnitude.
            Attribute::Longevity | Attribute::MissedCallAlert => {}
        }
    }

    /// Compile a raw selection document into a typed selection
    ///
    /// A longevity with no matching validity period falls back to the
    /// default period with a warning rather than failing.
    pub fn from_document(doc: &SelectionDocument) -> Self {
        let longevity = Validity::from_days(doc.longevity).unwrap_or_else(|| {
            warn!(
                "selection document: no validity period spans {} days, falling back to {}",
                doc.longevity,
                Validity::default()
            );
            Validity::default()
        });
        Self {
            longevity,
            data: doc.data,
            fourg: doc.fourg,
            voice: doc.voice,
            sms: doc.sms,
            bioscope: doc.bioscope,
            missed_call_alert: doc.mca.as_bool(),
        }
    }

    /// Parse and compile a selection document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::from_document(&SelectionDocument::from_json(text)?))
    }

    /// Check this selection against the tables it was built from
    ///
    /// Verifies that the validity period is offered by the bubble map and
    /// that every quantity attribute holds an eligible magnitude, or the off
    /// value when its eligible set is empty. The reconciler maintains this
    /// on its own; the check exists so tests and table authors can assert it
    /// explicitly.
    pub fn validate(&self, catalog: &BubbleCatalog, eligibility: &EligibilityTable) -> Result<()> {
        if !catalog
            .magnitudes(Attribute::Longevity)
            .contains(&self.longevity.days())
        {
            return Err(FlexiplanError::validation(format!(
                "validity {} is not offered by the bubble map",
                self.longevity
            )));
        }
        for attribute in Attribute::iter().filter(Attribute::is_reconciled) {
            let held = self.amount(attribute).unwrap_or(OFF_VALUE);
            let options = eligibility.options(self.longevity, attribute);
            let allowed = options.contains(&held) || (options.is_empty() && held == OFF_VALUE);
            if !allowed {
                return Err(FlexiplanError::validation(format!(
                    "{attribute} holds {held}, which is not eligible under {}",
                    self.longevity
                )));
            }
        }
        Ok(())
    }
}

/// A change request: one attribute together with its new value
///
/// This is the entire write surface of the configurator. Values arrive
/// exactly as chosen; whether the pick triggers revalidation of the rest of
/// the selection depends only on which variant it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Choose a validity period, revalidating every quantity attribute
    Longevity(Validity),
    /// Choose a regular internet bubble in MB
    Data(u32),
    /// Choose a 4G internet bubble in MB
    FourG(u32),
    /// Choose a voice bubble in minutes
    Voice(u32),
    /// Choose an SMS bubble
    Sms(u32),
    /// Choose a bioscope bubble in MB
    Bioscope(u32),
    /// Switch the missed call alert on or off
    MissedCallAlert(bool),
}

impl Pick {
    /// The attribute this pick targets
    pub fn attribute(&self) -> Attribute {
        match self {
            Self::Longevity(_) => Attribute::Longevity,
            Self::Data(_) => Attribute::Data,
            Self::FourG(_) => Attribute::FourG,
            Self::Voice(_) => Attribute::Voice,
            Self::Sms(_) => Attribute::Sms,
            Self::Bioscope(_) => Attribute::Bioscope,
            Self::MissedCallAlert(_) => Attribute::MissedCallAlert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_is_valid_against_stock_tables() {
        let selection = Selection::default();
        assert_eq!(selection.longevity, Validity::Day30);
        assert_eq!(selection.data, 1024);
        assert_eq!(selection.voice, 100);
        assert!(!selection.missed_call_alert);
        selection
            .validate(&BubbleCatalog::default(), &EligibilityTable::default())
            .unwrap();
    }

    #[test]
    fn test_amount_mapping() {
        let selection = Selection {
            longevity: Validity::Day7,
            data: 512,
            fourg: 1024,
            voice: 50,
            sms: 20,
            bioscope: 0,
            missed_call_alert: true,
        };
        assert_eq!(selection.amount(Attribute::Longevity), Some(7));
        assert_eq!(selection.amount(Attribute::Data), Some(512));
        assert_eq!(selection.amount(Attribute::FourG), Some(1024));
        assert_eq!(selection.amount(Attribute::MissedCallAlert), None);
    }

    #[test]
    fn test_from_document_with_unknown_longevity_falls_back() {
        let doc = SelectionDocument {
            longevity: 14,
            data: 512,
            ..SelectionDocument::default()
        };
        let selection = Selection::from_document(&doc);
        assert_eq!(selection.longevity, Validity::Day30);
        assert_eq!(selection.data, 512);
    }

    #[test]
    fn test_from_json() {
        let selection = Selection::from_json(
            r#"{"longevity":7,"data":1024,"fourg":0,"voice":50,"sms":20,"bioscope":512,"mca":1}"#,
        )
        .unwrap();
        assert_eq!(selection.longevity, Validity::Day7);
        assert_eq!(selection.bioscope, 512);
        assert!(selection.missed_call_alert);
    }

    #[test]
    fn test_validate_rejects_ineligible_magnitude() {
        let selection = Selection {
            longevity: Validity::Day1,
            data: 25600,
            ..Selection::default()
        };
        let err = selection
            .validate(&BubbleCatalog::default(), &EligibilityTable::default())
            .unwrap_err();
        assert!(err.to_string().contains("data"));
    }

    #[test]
    fn test_validate_allows_off_value_when_set_is_empty() {
        let catalog = BubbleCatalog::empty().with_row(Attribute::Longevity, &[7]);
        let eligibility = EligibilityTable::empty();
        let off = Selection {
            longevity: Validity::Day7,
            data: 0,
            fourg: 0,
            voice: 0,
            sms: 0,
            bioscope: 0,
            missed_call_alert: false,
        };
        off.validate(&catalog, &eligibility).unwrap();

        let held = Selection { voice: 100, ..off };
        assert!(held.validate(&catalog, &eligibility).is_err());
    }

    #[test]
    fn test_validate_rejects_unoffered_validity() {
        let catalog = BubbleCatalog::empty().with_row(Attribute::Longevity, &[1, 3]);
        let selection = Selection {
            longevity: Validity::Day30,
            data: 0,
            fourg: 0,
            voice: 0,
            sms: 0,
            bioscope: 0,
            missed_call_alert: false,
        };
        let err = selection
            .validate(&catalog, &EligibilityTable::empty())
            .unwrap_err();
        assert!(err.to_string().contains("day_30"));
    }

    #[test]
    fn test_selection_serde_roundtrip() {
        let original = Selection {
            longevity: Validity::Day3,
            missed_call_alert: true,
            ..Selection::default()
        };
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"day_3\""));
        assert!(json.contains("\"mca\":true"));
        let parsed: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_pick_targets() {
        assert_eq!(Pick::Longevity(Validity::Day7).attribute(), Attribute::Longevity);
        assert_eq!(Pick::Data(512).attribute(), Attribute::Data);
        assert_eq!(
            Pick::MissedCallAlert(true).attribute(),
            Attribute::MissedCallAlert
        );
    }
}
