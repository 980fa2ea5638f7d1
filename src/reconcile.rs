//! The selection reconciler.
//!
//! [`select`] is the single state-transition function of the configurator:
//! it takes the current selection plus one pick and returns the next,
//! internally consistent selection.
//!
//! # Design
//!
//! - **Pure logic**: No I/O, no side effects. The next selection is the only output
//! - **One writer**: The caller owns the `Selection` and replaces it with the result
//! - **Fail-soft**: A validity period with no eligibility entry is a valid state, not an error; dependent attributes reset to their off value
//!
//! # Transition Rules
//!
//! | Pick                | Effect |
//! |---------------------|--------|
//! | `Longevity`         | Set the period, revalidate every quantity attribute |
//! | Quantity attributes | Assign the one field, touch nothing else |
//! | `MissedCallAlert`   | Flip the toggle, exempt from eligibility |

use strum::IntoEnumIterator;
use tracing::debug;

use crate::catalog::{BubbleCatalog, EligibilityTable};
use crate::selection::{Pick, Selection};
use crate::types::{Attribute, Validity};

/// The value a quantity attribute falls back to when its eligible set is
/// empty. Every stock row carries it as the "none" bubble.
pub const OFF_VALUE: u32 = 0;

/// Apply one pick to a selection.
///
/// Choosing a validity period revalidates every quantity attribute against
/// the period's eligibility entry: a held value that is no longer eligible
/// is replaced by the first entry of its new eligible set, or by
/// [`OFF_VALUE`] when that set is empty. The period itself is accepted
/// as-is.
///
/// Every other pick assigns its one field and touches nothing else. No
/// eligibility check happens on direct picks, even if the held value is
/// stale relative to the current period; staleness is resolved by the next
/// validity change. The missed call alert is never filtered at all.
pub fn select(current: Selection, pick: Pick, eligibility: &EligibilityTable) -> Selection {
    match pick {
        Pick::Longevity(validity) => retarget(current, validity, eligibility),
        Pick::Data(value) => Selection {
            data: value,
            ..current
        },
        Pick::FourG(value) => Selection {
            fourg: value,
            ..current
        },
        Pick::Voice(value) => Selection {
            voice: value,
            ..current
        },
        Pick::Sms(value) => Selection {
            sms: value,
            ..current
        },
        Pick::Bioscope(value) => Selection {
            bioscope: value,
            ..current
        },
        Pick::MissedCallAlert(on) => Selection {
            missed_call_alert: on,
            ..current
        },
    }
}

/// Move a selection to a new validity period, revalidating every quantity
/// attribute against the period's eligibility entry.
fn retarget(current: Selection, validity: Validity, eligibility: &EligibilityTable) -> Selection {
    let mut next = current;
    next.longevity = validity;

    for attribute in Attribute::iter().filter(Attribute::is_reconciled) {
        let options = eligibility.options(validity, attribute);
        let held = current.amount(attribute).unwrap_or(OFF_VALUE);
        if !options.contains(&held) {
            let replacement = options.first().copied().unwrap_or(OFF_VALUE);
            debug!("{validity}: {attribute} {held} no longer eligible, resetting to {replacement}");
            next.set_amount(attribute, replacement);
        }
    }

    next
}

/// The values the view may offer for an attribute right now.
///
/// Validity bubbles come straight from the bubble map; every other attribute
/// shows its eligible set under the currently selected period. Either lookup
/// degrades to an empty slice when its table has nothing to offer.
pub fn selectable_values<'a>(
    current: &Selection,
    attribute: Attribute,
    catalog: &'a BubbleCatalog,
    eligibility: &'a EligibilityTable,
) -> &'a [u32] {
    if attribute == Attribute::Longevity {
        catalog.magnitudes(attribute)
    } else {
        eligibility.options(current.longevity, attribute)
    }
}
