/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Translation between symbolic state labels and axis values.

use itertools::Itertools;
use itertools::izip;

use crate::Assignment;
use crate::AxisError;
use crate::AxisSpace;
use crate::Configuration;

/// Maps symbolic labels to axis values and back. A resolver rejects
/// labels outside an axis's domain, so everything it hands on is in
/// bounds.
pub trait LabelResolver {
    /// The value of `label` on `axis`.
    fn resolve(&self, axis: &str, label: &str) -> Result<usize, AxisError>;

    /// The label of `value` on `axis`, if it has one.
    fn label(&self, axis: &str, value: usize) -> Option<&str>;
}

/// Per-axis state labels over an [`AxisSpace`].
///
/// Axes without labels accept the decimal form of their values.
#[derive(Debug, Clone, PartialEq)]
pub struct StateLabels {
    space: AxisSpace,
    labels: Vec<Option<Vec<String>>>,
}

impl StateLabels {
    pub fn new(space: &AxisSpace) -> Self {
        Self {
            space: space.clone(),
            labels: vec![None; space.len()],
        }
    }

    /// Names the values of `axis`, in value order. There must be one
    /// distinct label per value.
    pub fn with_labels<I, S>(mut self, axis: &str, labels: I) -> Result<Self, AxisError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let position = self.space.position(axis)?;
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let cardinality = self.space.axes()[position].cardinality();
        if labels.len() != cardinality {
            return Err(AxisError::LengthMismatch {
                expected: cardinality,
                actual: labels.len(),
            });
        }
        if let Some(label) = labels.iter().duplicates().next() {
            return Err(AxisError::DuplicateLabel {
                axis: axis.to_string(),
                label: label.clone(),
            });
        }
        self.labels[position] = Some(labels);
        Ok(self)
    }

    pub fn space(&self) -> &AxisSpace {
        &self.space
    }

    pub fn labels(&self, axis: &str) -> Option<&[String]> {
        let position = self.space.position(axis).ok()?;
        self.labels[position].as_deref()
    }

    /// Resolves `(axis, label)` pairs into an [`Assignment`].
    pub fn resolve_assignment<'a, I>(&self, pairs: I) -> Result<Assignment, AxisError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .map(|(axis, label)| self.resolve(axis, label).map(|value| (axis, value)))
            .collect()
    }

    /// Renders `configuration` with labels where the axis has them,
    /// e.g. `{rain=yes,sprinkler=0}`.
    pub fn format_configuration(&self, configuration: &Configuration) -> String {
        format!(
            "{{{}}}",
            configuration
                .iter()
                .map(|(axis, value)| match self.label(axis, value) {
                    Some(label) => format!("{}={}", axis, label),
                    None => format!("{}={}", axis, value),
                })
                .join(",")
        )
    }
}

impl LabelResolver for StateLabels {
    fn resolve(&self, axis: &str, label: &str) -> Result<usize, AxisError> {
        let position = self.space.position(axis)?;
        let unknown = || AxisError::UnknownLabel {
            axis: axis.to_string(),
            label: label.to_string(),
        };
        match &self.labels[position] {
            Some(labels) => labels.iter().position(|l| l == label).ok_or_else(unknown),
            None => {
                let value: usize = label.parse().map_err(|_| unknown())?;
                let cardinality = self.space.axes()[position].cardinality();
                if value >= cardinality {
                    return Err(AxisError::OutOfBounds {
                        axis: axis.to_string(),
                        value,
                        cardinality,
                    });
                }
                Ok(value)
            }
        }
    }

    fn label(&self, axis: &str, value: usize) -> Option<&str> {
        izip!(self.space.names(), &self.labels)
            .find(|(name, _)| *name == axis)
            .and_then(|(_, labels)| labels.as_ref())
            .and_then(|labels| labels.get(value))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign;
    use crate::axes;

    fn test_labels() -> StateLabels {
        StateLabels::new(&axes!(rain = 2, sprinkler = 2, season = 4))
            .with_labels("rain", ["no", "yes"])
            .unwrap()
            .with_labels("season", ["winter", "spring", "summer", "fall"])
            .unwrap()
    }

    #[test]
    fn test_resolve() {
        let labels = test_labels();
        assert_eq!(labels.resolve("rain", "yes").unwrap(), 1);
        assert_eq!(labels.resolve("season", "summer").unwrap(), 2);
        assert_eq!(labels.resolve("sprinkler", "1").unwrap(), 1);
        assert_eq!(labels.label("season", 3), Some("fall"));
        assert_eq!(labels.label("sprinkler", 0), None);
        assert_eq!(labels.label("rain", 2), None);
        assert_eq!(labels.labels("rain").unwrap(), &["no", "yes"]);
    }

    #[test]
    fn test_resolve_bad() {
        let labels = test_labels();
        assert_eq!(
            labels.resolve("rain", "maybe").unwrap_err(),
            AxisError::UnknownLabel {
                axis: "rain".to_string(),
                label: "maybe".to_string()
            }
        );
        assert!(matches!(
            labels.resolve("sprinkler", "on"),
            Err(AxisError::UnknownLabel { .. })
        ));
        assert!(matches!(
            labels.resolve("sprinkler", "2"),
            Err(AxisError::OutOfBounds { value: 2, .. })
        ));
        assert!(matches!(
            labels.resolve("hail", "yes"),
            Err(AxisError::UnknownAxis { .. })
        ));
    }

    #[test]
    fn test_with_labels_bad() {
        let space = axes!(rain = 2);
        assert_eq!(
            StateLabels::new(&space)
                .with_labels("rain", ["no"])
                .unwrap_err(),
            AxisError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            StateLabels::new(&space)
                .with_labels("rain", ["no", "no"])
                .unwrap_err(),
            AxisError::DuplicateLabel {
                axis: "rain".to_string(),
                label: "no".to_string()
            }
        );
        assert!(
            StateLabels::new(&space)
                .with_labels("snow", ["no", "yes"])
                .is_err()
        );
    }

    #[test]
    fn test_resolve_assignment() {
        let labels = test_labels();
        let assignment = labels
            .resolve_assignment([("season", "spring"), ("rain", "yes")])
            .unwrap();
        assert_eq!(assignment, assign!(season = 1, rain = 1));
        assert!(
            labels
                .resolve_assignment([("season", "monsoon")])
                .is_err()
        );
    }

    #[test]
    fn test_format_configuration() {
        let labels = test_labels();
        let configuration = Configuration::new(
            labels.space(),
            &assign!(rain = 1, sprinkler = 0, season = 3),
        )
        .unwrap();
        assert_eq!(
            labels.format_configuration(&configuration),
            "{rain=yes,sprinkler=0,season=fall}"
        );
    }
}
