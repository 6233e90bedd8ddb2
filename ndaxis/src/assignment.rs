/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;
use serde::ser::SerializeMap;

use crate::AxisError;
use crate::AxisSpace;

/// A partial mapping from axis names to values: the frozen set of an
/// [`crate::Odometer`], or the selector of a [`crate::StridedTable`]
/// sub-view.
///
/// An assignment is not tied to any [`AxisSpace`]; it is validated
/// each time it is used against one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pairs: Vec<(String, usize)>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `axis` to `value`, replacing any previous value for it.
    pub fn insert(&mut self, axis: impl Into<String>, value: usize) {
        let axis = axis.into();
        match self.pairs.iter_mut().find(|(name, _)| *name == axis) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((axis, value)),
        }
    }

    /// Builder-style [`Assignment::insert`].
    pub fn with(mut self, axis: impl Into<String>, value: usize) -> Self {
        self.insert(axis, value);
        self
    }

    pub fn get(&self, axis: &str) -> Option<usize> {
        self.pairs
            .iter()
            .find_map(|(name, value)| (name == axis).then_some(*value))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.pairs.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Validates this assignment against `space` and lays it out in
    /// declaration order: entry `i` is the pinned value of axis `i`,
    /// if any.
    ///
    /// Every name is checked before any value, so an undeclared axis
    /// is reported ahead of an out-of-bounds value regardless of the
    /// order of the pairs.
    pub(crate) fn resolve(&self, space: &AxisSpace) -> Result<Vec<Option<usize>>, AxisError> {
        let positions = self
            .pairs
            .iter()
            .map(|(name, _)| space.position(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut pinned = vec![None; space.len()];
        for ((name, value), position) in self.pairs.iter().zip(&positions) {
            if pinned[*position].replace(*value).is_some() {
                return Err(AxisError::DuplicateAxis { axis: name.clone() });
            }
        }

        for ((name, value), position) in self.pairs.iter().zip(positions) {
            let cardinality = space.axes()[position].cardinality();
            if *value >= cardinality {
                return Err(AxisError::OutOfBounds {
                    axis: name.clone(),
                    value: *value,
                    cardinality,
                });
            }
        }
        Ok(pinned)
    }
}

/// Collects pairs as given. Unlike [`Assignment::insert`], repeated
/// names are kept and later rejected with
/// [`AxisError::DuplicateAxis`] when the assignment is resolved.
impl<S: Into<String>> FromIterator<(S, usize)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

impl From<&Configuration> for Assignment {
    fn from(configuration: &Configuration) -> Self {
        configuration.iter().collect()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter()
                .format_with(",", |(name, value), f| f(&format_args!("{}={}", name, value)))
        )
    }
}

/// Construct an [`Assignment`] from `name = value` pairs.
///
/// ```
/// let frozen = ndaxis::assign!(x = 1, z = 0);
/// assert_eq!(frozen.get("z"), Some(0));
/// assert_eq!(frozen.to_string(), "{x=1,z=0}");
/// ```
#[macro_export]
macro_rules! assign {
    ( $( $name:ident = $value:expr ),* $(,)? ) => {
        {
            #[allow(unused_mut)]
            let mut assignment = $crate::Assignment::new();
            $(
                assignment.insert(stringify!($name), $value);
            )*
            assignment
        }
    };
}

/// One value for every axis of an [`AxisSpace`], each within the
/// axis's cardinality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    space: AxisSpace,
    values: Vec<usize>,
}

impl Configuration {
    /// Builds a configuration from an assignment that covers every
    /// axis of `space`.
    pub fn new(space: &AxisSpace, assignment: &Assignment) -> Result<Self, AxisError> {
        let pinned = assignment.resolve(space)?;
        let values = pinned.iter().copied().collect::<Option<Vec<_>>>().ok_or(
            AxisError::LengthMismatch {
                expected: space.len(),
                actual: assignment.len(),
            },
        )?;
        Ok(Self::from_values(space.clone(), values))
    }

    /// The all-zero configuration.
    pub fn zero(space: &AxisSpace) -> Self {
        Self::from_values(space.clone(), vec![0; space.len()])
    }

    // Callers guarantee one in-bounds value per axis.
    pub(crate) fn from_values(space: AxisSpace, values: Vec<usize>) -> Self {
        debug_assert_eq!(space.len(), values.len());
        Self { space, values }
    }

    pub fn space(&self) -> &AxisSpace {
        &self.space
    }

    /// Values in declaration order.
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    pub fn get(&self, axis: &str) -> Option<usize> {
        self.space
            .position(axis)
            .ok()
            .map(|position| self.values[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.space.names().zip(self.values.iter().copied())
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter()
                .format_with(",", |(name, value), f| f(&format_args!("{}={}", name, value)))
        )
    }
}

impl Serialize for Configuration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes;

    #[test]
    fn test_insert_replaces() {
        let mut assignment = assign!(x = 1);
        assignment.insert("y", 2);
        assignment.insert("x", 3);
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.get("x"), Some(3));
        assert_eq!(assignment.get("w"), None);
        assert_eq!(assignment.to_string(), "{x=3,y=2}");
    }

    #[test]
    fn test_resolve() {
        let space = axes!(x = 4, y = 3, z = 2);
        assert_eq!(
            assign!(z = 1, x = 3).resolve(&space).unwrap(),
            vec![Some(3), None, Some(1)]
        );
        assert_eq!(
            Assignment::new().resolve(&space).unwrap(),
            vec![None, None, None]
        );
    }

    #[test]
    fn test_resolve_order() {
        let space = axes!(x = 4, y = 3, z = 2);

        // The out-of-bounds value comes first, but the unknown name wins.
        let assignment: Assignment = vec![("x", 9), ("w", 0)].into_iter().collect();
        assert_eq!(
            assignment.resolve(&space).unwrap_err(),
            AxisError::UnknownAxis {
                axis: "w".to_string()
            }
        );

        assert_eq!(
            assign!(y = 3).resolve(&space).unwrap_err(),
            AxisError::OutOfBounds {
                axis: "y".to_string(),
                value: 3,
                cardinality: 3
            }
        );

        let assignment: Assignment = vec![("x", 0), ("x", 1)].into_iter().collect();
        assert_eq!(
            assignment.resolve(&space).unwrap_err(),
            AxisError::DuplicateAxis {
                axis: "x".to_string()
            }
        );
    }

    #[test]
    fn test_configuration() {
        let space = axes!(x = 4, y = 3, z = 2);
        let configuration = Configuration::new(&space, &assign!(z = 1, y = 2, x = 0)).unwrap();
        assert_eq!(configuration.values(), &[0, 2, 1]);
        assert_eq!(configuration.get("y"), Some(2));
        assert_eq!(configuration.get("w"), None);
        assert_eq!(configuration.to_string(), "{x=0,y=2,z=1}");
        assert_eq!(
            serde_json::to_string(&configuration).unwrap(),
            r#"{"x":0,"y":2,"z":1}"#
        );
        assert_eq!(
            Assignment::from(&configuration),
            assign!(x = 0, y = 2, z = 1)
        );
    }

    #[test]
    fn test_configuration_partial() {
        let space = axes!(x = 4, y = 3, z = 2);
        assert_eq!(
            Configuration::new(&space, &assign!(x = 1)).unwrap_err(),
            AxisError::LengthMismatch {
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn test_configuration_equality() {
        let space = axes!(x = 2, y = 2);
        let a = Configuration::new(&space, &assign!(x = 1, y = 0)).unwrap();
        let b = Configuration::new(&space, &assign!(y = 0, x = 1)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Configuration::zero(&space));

        // Same values over differently named axes are not equal.
        let other = axes!(u = 2, v = 2);
        let c = Configuration::new(&other, &assign!(u = 1, v = 0)).unwrap();
        assert_ne!(a, c);
    }
}
