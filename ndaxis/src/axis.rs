/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::AxisError;

/// A named, finite, discrete dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAxisSpec")]
pub struct AxisSpec {
    name: String,
    cardinality: usize,
}

// The unvalidated wire form of an [`AxisSpec`].
#[derive(Deserialize)]
struct RawAxisSpec {
    name: String,
    cardinality: usize,
}

impl TryFrom<RawAxisSpec> for AxisSpec {
    type Error = AxisError;

    fn try_from(raw: RawAxisSpec) -> Result<Self, Self::Error> {
        AxisSpec::new(raw.name, raw.cardinality)
    }
}

impl AxisSpec {
    /// Creates a new axis. The cardinality must be at least 1.
    pub fn new(name: impl Into<String>, cardinality: usize) -> Result<Self, AxisError> {
        let name = name.into();
        if cardinality < 1 {
            return Err(AxisError::InvalidCardinality {
                axis: name,
                cardinality,
            });
        }
        Ok(Self { name, cardinality })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of values the axis takes; values range over
    /// `0..cardinality`.
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }
}

/// An immutable, ordered set of uniquely named axes.
///
/// Declaration order is the canonical order: the first-declared axis
/// is the least significant digit both when enumerating with an
/// [`crate::Odometer`] and when striding into a
/// [`crate::StridedTable`]. Spaces are built with an
/// [`AxisSpaceBuilder`], the [`crate::axes`] macro, or
/// [`AxisSpace::new`]; once built they cannot change. Clones share
/// the same axis list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<AxisSpec>", into = "Vec<AxisSpec>")]
pub struct AxisSpace {
    axes: Arc<[AxisSpec]>,
}

impl AxisSpace {
    pub fn builder() -> AxisSpaceBuilder {
        AxisSpaceBuilder::new()
    }

    /// Declares every `(name, cardinality)` pair in order and seals
    /// the result.
    pub fn new<I, S>(axes: I) -> Result<Self, AxisError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut builder = AxisSpaceBuilder::new();
        for (name, cardinality) in axes {
            builder.declare(name, cardinality)?;
        }
        Ok(builder.build())
    }

    /// The space with no axes. It has exactly one (empty)
    /// configuration.
    pub fn empty() -> Self {
        AxisSpaceBuilder::new().build()
    }

    /// The axis layout of a node's table: the node itself, followed by
    /// each of its parents in the order given.
    pub fn family<S, I, P>(node: S, cardinality: usize, parents: I) -> Result<Self, AxisError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (P, usize)>,
        P: Into<String>,
    {
        let mut builder = AxisSpaceBuilder::new();
        builder.declare(node, cardinality)?;
        for (parent, cardinality) in parents {
            builder.declare(parent, cardinality)?;
        }
        Ok(builder.build())
    }

    pub fn axes(&self) -> &[AxisSpec] {
        &self.axes
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AxisSpec> {
        self.axes.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.axes.iter().map(AxisSpec::name)
    }

    /// The declaration index of the named axis.
    pub fn position(&self, name: &str) -> Result<usize, AxisError> {
        self.axes
            .iter()
            .position(|axis| axis.name == name)
            .ok_or_else(|| AxisError::UnknownAxis {
                axis: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.axes.iter().any(|axis| axis.name == name)
    }

    pub fn cardinality(&self, name: &str) -> Result<usize, AxisError> {
        Ok(self.axes[self.position(name)?].cardinality)
    }

    /// The number of configurations over all axes (the product of
    /// cardinalities; 1 for the empty space). Declaration guarantees
    /// the product fits in a `usize`.
    pub fn size(&self) -> usize {
        self.axes.iter().map(AxisSpec::cardinality).product()
    }

    /// Per-axis strides in declaration order. The first axis has
    /// stride 1, and each following stride is the previous stride
    /// times the previous cardinality.
    pub fn strides(&self) -> Vec<usize> {
        self.axes
            .iter()
            .scan(1, |stride, axis| {
                let current = *stride;
                *stride *= axis.cardinality;
                Some(current)
            })
            .collect()
    }
}

impl fmt::Display for AxisSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, axis) in self.axes.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}={}", axis.name, axis.cardinality)?;
        }
        write!(f, "}}")
    }
}

impl TryFrom<Vec<AxisSpec>> for AxisSpace {
    type Error = AxisError;

    fn try_from(axes: Vec<AxisSpec>) -> Result<Self, Self::Error> {
        AxisSpace::new(
            axes.into_iter()
                .map(|axis| (axis.name, axis.cardinality)),
        )
    }
}

impl From<AxisSpace> for Vec<AxisSpec> {
    fn from(space: AxisSpace) -> Self {
        space.axes.to_vec()
    }
}

/// Accumulates axis declarations. [`AxisSpaceBuilder::build`] seals
/// the declaration order into an [`AxisSpace`].
#[derive(Debug, Clone)]
pub struct AxisSpaceBuilder {
    axes: Vec<AxisSpec>,
    /// Product of the declared cardinalities.
    size: usize,
}

impl Default for AxisSpaceBuilder {
    fn default() -> Self {
        Self {
            axes: Vec::new(),
            size: 1,
        }
    }
}

impl AxisSpaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an axis. Fails if the name is already declared, if the
    /// cardinality is zero, or if the product of all cardinalities
    /// would overflow a `usize`. A failed declaration leaves the
    /// builder unchanged.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        cardinality: usize,
    ) -> Result<&mut Self, AxisError> {
        let axis = AxisSpec::new(name, cardinality)?;
        if self.axes.iter().any(|existing| existing.name == axis.name) {
            return Err(AxisError::DuplicateAxis { axis: axis.name });
        }
        let Some(size) = self.size.checked_mul(axis.cardinality) else {
            return Err(AxisError::SizeOverflow {
                axis: axis.name,
                cardinality: axis.cardinality,
            });
        };
        self.size = size;
        self.axes.push(axis);
        Ok(self)
    }

    pub fn build(self) -> AxisSpace {
        let space = AxisSpace {
            axes: self.axes.into(),
        };
        tracing::debug!("sealed axis space {} of size {}", space, space.size());
        space
    }
}

/// Construct an [`AxisSpace`] from `name = cardinality` pairs in
/// declaration order. Panics on a duplicate name or a zero
/// cardinality.
///
/// ```
/// let space = ndaxis::axes!(x = 4, y = 3, z = 2);
/// assert_eq!(space.to_string(), "{x=4,y=3,z=2}");
/// assert_eq!(space.strides(), vec![1, 4, 12]);
/// ```
#[macro_export]
macro_rules! axes {
    ( $( $name:ident = $cardinality:expr ),* $(,)? ) => {
        {
            #[allow(unused_mut)]
            let mut builder = $crate::axis::AxisSpaceBuilder::new();
            $(
                builder.declare(stringify!($name), $cardinality).unwrap();
            )*
            builder.build()
        }
    };
}
