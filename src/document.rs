//! Raw collaborator documents: the bubble map, eligibility table, and
//! default selection as they arrive over the wire.
//!
//! Parsing happens in two layers. This module models the literal JSON shape
//! with serde; the typed tables in [`crate::catalog`] and the typed selection
//! in [`crate::selection`] compile these raw documents into their working
//! forms. The split keeps wire tolerance in one place: a document either
//! parses as JSON or fails with a [`crate::error::FlexiplanError::Document`],
//! and everything softer (unknown keys, malformed rows, unknown periods)
//! degrades during compilation with a warning instead of an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

/// Raw bubble map document: attribute key to ordered magnitude row
///
/// Rows are kept as loose JSON values so a single malformed row cannot sink
/// the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BubbleMapDocument(pub BTreeMap<String, Value>);

/// Raw eligibility document: `day_N` key to per-attribute magnitude rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EligibilityDocument(pub BTreeMap<String, Value>);

/// Raw default-selection document: one value per attribute key
///
/// Every field is defaulted so partial documents still compile; a missing
/// longevity falls back to the default validity period downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionDocument {
    #[serde(default)]
    pub longevity: u32,
    #[serde(default)]
    pub data: u32,
    #[serde(default)]
    pub fourg: u32,
    #[serde(default)]
    pub voice: u32,
    #[serde(default)]
    pub sms: u32,
    #[serde(default)]
    pub bioscope: u32,
    #[serde(default)]
    pub mca: ToggleField,
}

/// A missed-call-alert value as documents carry it
///
/// Later catalog revisions write the alert as a boolean, earlier ones as a
/// 0/1 magnitude. Both forms are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToggleField {
    Flag(bool),
    Magnitude(u32),
}

impl ToggleField {
    /// Normalize to a boolean, treating any non-zero magnitude as on
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Flag(on) => *on,
            Self::Magnitude(n) => *n != 0,
        }
    }
}

impl Default for ToggleField {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl BubbleMapDocument {
    /// Parse a bubble map document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl EligibilityDocument {
    /// Parse an eligibility document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl SelectionDocument {
    /// Parse a selection document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Interpret one raw document row as an ordered magnitude list
///
/// A row that is not an array counts as absent. Array elements that are not
/// non-negative integers within `u32` range are dropped individually, so one
/// stray element does not take out the rest of the row. Both degradations are
/// logged.
pub(crate) fn magnitude_row(document: &str, key: &str, value: &Value) -> Option<Vec<u32>> {
    let Value::Array(items) = value else {
        warn!("{document}: row {key:?} is not an array, treating as absent");
        return None;
    };
    let mut row = Vec::with_capacity(items.len());
    for item in items {
        match item.as_u64() {
            Some(n) if n <= u64::from(u32::MAX) => row.push(n as u32),
            _ => warn!("{document}: dropping non-magnitude entry {item} in row {key:?}"),
        }
    }
    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_document_with_boolean_mca() {
        let doc = SelectionDocument::from_json(
            r#"{"longevity":30,"data":1024,"fourg":0,"voice":100,"sms":50,"bioscope":0,"mca":true}"#,
        )
        .unwrap();
        assert_eq!(doc.longevity, 30);
        assert_eq!(doc.data, 1024);
        assert!(doc.mca.as_bool());
    }

    #[test]
    fn test_selection_document_with_magnitude_mca() {
        let doc = SelectionDocument::from_json(r#"{"longevity":7,"mca":1}"#).unwrap();
        assert_eq!(doc.mca, ToggleField::Magnitude(1));
        assert!(doc.mca.as_bool());

        let doc = SelectionDocument::from_json(r#"{"longevity":7,"mca":0}"#).unwrap();
        assert!(!doc.mca.as_bool());
    }

    #[test]
    fn test_partial_selection_document_defaults() {
        let doc = SelectionDocument::from_json(r#"{"data":512}"#).unwrap();
        assert_eq!(doc.longevity, 0);
        assert_eq!(doc.data, 512);
        assert_eq!(doc.voice, 0);
        assert!(!doc.mca.as_bool());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(BubbleMapDocument::from_json("{\"data\": [").is_err());
        assert!(EligibilityDocument::from_json("not json at all").is_err());
        assert!(SelectionDocument::from_json("\"promo\"").is_err());
    }

    #[test]
    fn test_magnitude_row_accepts_integers() {
        let value: Value = serde_json::from_str("[0, 512, 1024]").unwrap();
        assert_eq!(
            magnitude_row("bubble map", "data", &value),
            Some(vec![0, 512, 1024])
        );
    }

    #[test]
    fn test_magnitude_row_drops_stray_elements() {
        let value: Value = serde_json::from_str(r#"[0, "512", -3, 1024, 2.5]"#).unwrap();
        assert_eq!(
            magnitude_row("bubble map", "data", &value),
            Some(vec![0, 1024])
        );
    }

    #[test]
    fn test_magnitude_row_rejects_non_arrays() {
        let value: Value = serde_json::from_str(r#"{"a": 1}"#).unwrap();
        assert_eq!(magnitude_row("bubble map", "data", &value), None);
        let value: Value = serde_json::from_str("42").unwrap();
        assert_eq!(magnitude_row("bubble map", "data", &value), None);
    }
}
