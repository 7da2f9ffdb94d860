//! Tier labels and the points they are worth.

use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::lenient;

/// Shown wherever a category has no tier.
pub const PLACEHOLDER: &str = "-";

/// Trims and upper-cases a raw tier label. Blank or missing labels have no
/// tier. Normalizing an already normalized label returns it unchanged.
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_uppercase())
}

/// Display form of a raw tier label.
///
/// `LT*` and `HT*` codes are ordinary labels here; they render as themselves.
pub fn label(raw: Option<&str>) -> String {
    normalize(raw).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Scoring rule of a data set, keyed by normalized tier label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsByTier(HashMap<String, f64>);

impl PointsByTier {
    /// Builds the table from the document's raw keys.
    ///
    /// Keys that normalize to the same tier collapse into one entry: a key
    /// already in normalized form wins, otherwise the last key in sort order.
    pub fn from_raw(raw: BTreeMap<String, f64>) -> Self {
        let mut points = HashMap::new();
        let mut exact = HashSet::new();

        for (key, value) in raw {
            let Some(tier) = normalize(Some(&key)) else {
                continue;
            };
            if key == tier {
                exact.insert(tier.clone());
                points.insert(tier, value);
            } else if !exact.contains(&tier) {
                points.insert(tier, value);
            }
        }

        Self(points)
    }

    /// Points for a raw tier label. Missing, blank and unknown tiers are worth 0.
    pub fn points_for(&self, raw: Option<&str>) -> f64 {
        normalize(raw)
            .and_then(|tier| self.0.get(&tier).copied())
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for PointsByTier {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Self::from_raw(lenient::number_map(d)?))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for PointsByTier {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self::from_raw(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Free-function form of [`PointsByTier::points_for`].
pub fn points_for(points_by_tier: &PointsByTier, raw: Option<&str>) -> f64 {
    points_by_tier.points_for(raw)
}
