//! Severity-to-category configuration.
//!
//! Severity is an opaque 0..=100 knob selecting which PII categories are
//! eligible for detection. The mapping is configuration, not core logic:
//! the engine only requires that it is total, so every severity value
//! (including "nothing selected") resolves to a defined label set.

use super::patterns::labels;
use std::collections::BTreeMap;

/// Cumulative severity tiers.
///
/// Each tier adds categories on top of the tiers below it; `labels_for`
/// unions every tier whose threshold is at or below the requested severity.
/// The mapping is therefore total and monotone: raising severity never
/// removes a category.
#[derive(Debug, Clone)]
pub struct SeverityMap {
    tiers: BTreeMap<u8, Vec<&'static str>>,
}

impl SeverityMap {
    /// The standard tiers: financial identifiers first, contact and ticket
    /// data at mid severity, entity-recognition categories at the top.
    pub fn standard() -> Self {
        let mut tiers = BTreeMap::new();
        tiers.insert(20, vec![labels::CREDIT_CARD, labels::SSN]);
        tiers.insert(
            40,
            vec![
                labels::EMAIL,
                labels::PHONE,
                labels::PNR,
                labels::TRANSACTION_ID,
                labels::INVOICE_NUMBER,
            ],
        );
        tiers.insert(60, vec![labels::PERSON]);
        tiers.insert(80, vec![labels::GPE, labels::DATE]);
        tiers.insert(100, vec![labels::ORG]);
        Self { tiers }
    }

    /// Builds a map from explicit `(threshold, added labels)` pairs.
    pub fn from_tiers(tiers: impl IntoIterator<Item = (u8, Vec<&'static str>)>) -> Self {
        Self {
            tiers: tiers.into_iter().collect(),
        }
    }

    /// All labels eligible at `severity`, in ascending tier order and
    /// declared order within a tier.
    pub fn labels_for(&self, severity: u8) -> Vec<&'static str> {
        self.tiers
            .range(..=severity)
            .flat_map(|(_, added)| added.iter().copied())
            .collect()
    }
}

impl Default for SeverityMap {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_severity_selects_nothing() {
        assert!(SeverityMap::standard().labels_for(0).is_empty());
    }

    #[test]
    fn test_mapping_is_total() {
        let map = SeverityMap::standard();
        for severity in 0..=u8::MAX {
            // Every value resolves; off-tier values inherit the tiers below.
            let _ = map.labels_for(severity);
        }
        assert_eq!(map.labels_for(30), map.labels_for(20));
    }

    #[test]
    fn test_tiers_are_cumulative() {
        let map = SeverityMap::standard();
        let low = map.labels_for(20);
        assert_eq!(low, vec![labels::CREDIT_CARD, labels::SSN]);

        let mid = map.labels_for(40);
        assert!(mid.contains(&labels::CREDIT_CARD));
        assert!(mid.contains(&labels::EMAIL));
        assert!(!mid.contains(&labels::PERSON));

        let top = map.labels_for(100);
        assert!(top.contains(&labels::ORG));
        assert_eq!(top.len(), 11);
    }

    #[test]
    fn test_monotone() {
        let map = SeverityMap::standard();
        let mut prev = 0;
        for severity in 0..=100 {
            let n = map.labels_for(severity).len();
            assert!(n >= prev);
            prev = n;
        }
    }
}
