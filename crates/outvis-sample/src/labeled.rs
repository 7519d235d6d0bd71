use serde::{Deserialize, Serialize};

/// Category of a point in a [`LabeledDistribution`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    #[display("valid")]
    Valid,
    #[display("outlier")]
    Outlier,
}

/// A single labeled value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub value: f64,
    pub label: Label,
}

/// An ordered collection of labeled values.
///
/// Built once from its source pools and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDistribution {
    entries: Vec<LabeledValue>,
}

impl LabeledDistribution {
    /// Builds a distribution from groups of values sharing a label, keeping group order.
    pub fn from_groups<'a, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (Label, &'a [f64])>,
    {
        let entries = groups
            .into_iter()
            .flat_map(|(label, values)| {
                values.iter().map(move |&value| LabeledValue { value, label })
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledValue> + '_ {
        self.entries.iter()
    }

    /// All values, in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Values carrying `label`, in insertion order.
    #[must_use]
    pub fn values_with(&self, label: Label) -> Vec<f64> {
        self.entries
            .iter()
            .filter(|e| e.label == label)
            .map(|e| e.value)
            .collect()
    }

    #[must_use]
    pub fn count(&self, label: Label) -> usize {
        self.entries.iter().filter(|e| e.label == label).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_groups_keeps_order() {
        let distribution = LabeledDistribution::from_groups([
            (Label::Valid, &[1.0, 2.0][..]),
            (Label::Outlier, &[9.0][..]),
        ]);
        assert_eq!(distribution.len(), 3);
        assert_eq!(distribution.values(), vec![1.0, 2.0, 9.0]);
        assert_eq!(distribution.values_with(Label::Outlier), vec![9.0]);
        assert_eq!(distribution.count(Label::Valid), 2);
        assert!(distribution.iter().last().unwrap().label.is_outlier());
    }

    #[test]
    fn test_label_display_and_json() {
        assert_eq!(Label::Valid.to_string(), "valid");
        assert_eq!(Label::Outlier.to_string(), "outlier");
        assert_eq!(serde_json::to_string(&Label::Outlier).unwrap(), "\"outlier\"");
    }

    #[test]
    fn test_empty() {
        let distribution = LabeledDistribution::from_groups(Vec::<(Label, &[f64])>::new());
        assert!(distribution.is_empty());
        assert_eq!(distribution.count(Label::Outlier), 0);
    }
}
