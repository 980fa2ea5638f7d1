//! Flexiplan Selection Engine
//!
//! This library provides the core logic for a build-your-own mobile bundle:
//! one selection (validity period, internet, 4G internet, voice, SMS,
//! bioscope, missed call alert) kept internally consistent against a bubble
//! catalog and a per-period eligibility table.
//!
//! The view layer, event wiring, and document transport are external
//! collaborators: callers hand in documents and picks, and read back
//! selections and display strings.

pub mod catalog;
pub mod document;
pub mod error;
pub mod format;
pub mod reconcile;
pub mod selection;
pub mod types;

// Re-export main types for convenience
pub use catalog::{BubbleCatalog, EligibilityEntry, EligibilityTable};
pub use document::{BubbleMapDocument, EligibilityDocument, SelectionDocument, ToggleField};
pub use error::{FlexiplanError, Result};
pub use format::{bubble_label, display_value, format_magnitude, format_toggle, summary};
pub use reconcile::{OFF_VALUE, select, selectable_values};
pub use selection::{Pick, Selection};
pub use types::{Attribute, Unit, Validity};
