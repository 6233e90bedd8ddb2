/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Strided addressing of a flat buffer by [`Configuration`] and by
//! partial [`Assignment`].
//!
//! A [`StridedTable`] lays its buffer out in canonical order: with
//! axes `a0, a1, ..., an` declared in that order, `stride(a0) = 1` and
//! `stride(ai) = stride(ai-1) * cardinality(ai-1)`, and a
//! configuration lives at `sum(value(ai) * stride(ai))`. Walking the
//! buffer front to back therefore visits configurations in the same
//! order as an [`Odometer`].
//!
//! A partial assignment selects a *sub-view*: every cell whose
//! configuration agrees with the assigned axes, ordered as an
//! [`Odometer`] with those axes frozen would order them.
//!
//! ```
//! use ndaxis::StridedTable;
//!
//! // P(e | b, a): e is the node, b and a its parents.
//! let space = ndaxis::axes!(e = 2, b = 2, a = 2);
//! let mut table = StridedTable::filled(&space, 0.0);
//! table.write_all(&ndaxis::assign!(b = 1, a = 0), &[0.3, 0.7]).unwrap();
//! assert_eq!(table.read(&ndaxis::assign!(b = 1, a = 0)).unwrap(), vec![0.3, 0.7]);
//! assert_eq!(table.read(&ndaxis::assign!(e = 1, b = 1)).unwrap(), vec![0.7, 0.0]);
//! ```

use enum_as_inner::EnumAsInner;
use itertools::izip;

use crate::Assignment;
use crate::AxisError;
use crate::AxisSpace;
use crate::Configuration;
use crate::Odometer;

/// The right-hand side of a sub-view write.
#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum Values<T> {
    /// Assigned to every cell of the sub-view.
    Scalar(T),
    /// Element `i` is assigned to the `i`-th cell of the sub-view.
    Sequence(Vec<T>),
}

impl<T> From<Vec<T>> for Values<T> {
    fn from(values: Vec<T>) -> Self {
        Values::Sequence(values)
    }
}

/// A flat buffer of `space.size()` values addressed by configurations
/// of an [`AxisSpace`]. See the [module documentation](self).
#[derive(Debug, Clone, PartialEq)]
pub struct StridedTable<T> {
    space: AxisSpace,
    strides: Vec<usize>,
    buffer: Vec<T>,
}

impl<T> StridedTable<T> {
    /// Adopts `buffer`, which must hold exactly one value per
    /// configuration of `space`, laid out in canonical order.
    pub fn new(space: &AxisSpace, buffer: Vec<T>) -> Result<Self, AxisError> {
        if buffer.len() != space.size() {
            return Err(AxisError::LengthMismatch {
                expected: space.size(),
                actual: buffer.len(),
            });
        }
        Ok(Self {
            strides: space.strides(),
            space: space.clone(),
            buffer,
        })
    }

    /// A table with every cell set to `value`.
    pub fn filled(space: &AxisSpace, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            strides: space.strides(),
            space: space.clone(),
            buffer: vec![value; space.size()],
        }
    }

    pub fn space(&self) -> &AxisSpace {
        &self.space
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false: the smallest table (over the empty space) holds
    /// one value.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<T> {
        self.buffer
    }

    fn locate(&self, values: &[usize]) -> usize {
        izip!(values, &self.strides)
            .map(|(value, stride)| value * stride)
            .sum()
    }

    fn check_space(&self, configuration: &Configuration) -> Result<(), AxisError> {
        if *configuration.space() != self.space {
            return Err(AxisError::SpaceMismatch {
                expected: self.space.to_string(),
                found: configuration.space().to_string(),
            });
        }
        Ok(())
    }

    /// The buffer offset of `configuration`.
    pub fn offset(&self, configuration: &Configuration) -> Result<usize, AxisError> {
        self.check_space(configuration)?;
        Ok(self.locate(configuration.values()))
    }

    /// The buffer offset named by a total assignment. A partial
    /// assignment names a sub-view of more than one cell and fails
    /// with [`AxisError::LengthMismatch`] carrying its size.
    pub fn offset_of(&self, assignment: &Assignment) -> Result<usize, AxisError> {
        let pinned = assignment.resolve(&self.space)?;
        let values = match pinned.iter().copied().collect::<Option<Vec<_>>>() {
            Some(values) => values,
            None => {
                return Err(AxisError::LengthMismatch {
                    expected: 1,
                    actual: Odometer::from_pinned(self.space.clone(), pinned).len(),
                });
            }
        };
        Ok(self.locate(&values))
    }

    /// The configuration stored at `offset`; the inverse of
    /// [`StridedTable::offset`].
    pub fn configuration_at(&self, offset: usize) -> Result<Configuration, AxisError> {
        if offset >= self.buffer.len() {
            return Err(AxisError::OffsetOutOfRange {
                offset,
                size: self.buffer.len(),
            });
        }
        let values = izip!(self.space.axes(), &self.strides)
            .map(|(axis, stride)| (offset / stride) % axis.cardinality())
            .collect();
        Ok(Configuration::from_values(self.space.clone(), values))
    }

    pub fn get(&self, configuration: &Configuration) -> Result<&T, AxisError> {
        let offset = self.offset(configuration)?;
        Ok(&self.buffer[offset])
    }

    pub fn get_mut(&mut self, configuration: &Configuration) -> Result<&mut T, AxisError> {
        let offset = self.offset(configuration)?;
        Ok(&mut self.buffer[offset])
    }

    pub fn set(&mut self, configuration: &Configuration, value: T) -> Result<(), AxisError> {
        *self.get_mut(configuration)? = value;
        Ok(())
    }

    /// The offsets of the sub-view selected by `assignment`, in
    /// canonical order over the unassigned axes.
    pub fn offsets(&self, assignment: &Assignment) -> Result<Vec<usize>, AxisError> {
        let pinned = assignment.resolve(&self.space)?;
        let mut odometer = Odometer::from_pinned(self.space.clone(), pinned);
        let mut offsets = Vec::with_capacity(odometer.len());
        odometer.first()?;
        while let Some(values) = odometer.values() {
            offsets.push(self.locate(values));
            odometer.advance()?;
        }
        Ok(offsets)
    }

    /// The number of cells in the sub-view selected by `assignment`.
    pub fn sub_view_len(&self, assignment: &Assignment) -> Result<usize, AxisError> {
        let pinned = assignment.resolve(&self.space)?;
        Ok(Odometer::from_pinned(self.space.clone(), pinned).len())
    }

    /// The values of the sub-view selected by `assignment`, in
    /// canonical order. A total assignment reads a single value.
    pub fn read(&self, assignment: &Assignment) -> Result<Vec<T>, AxisError>
    where
        T: Clone,
    {
        Ok(self
            .offsets(assignment)?
            .into_iter()
            .map(|offset| self.buffer[offset].clone())
            .collect())
    }

    /// Writes `values` into the sub-view selected by `assignment`.
    /// Nothing is written unless the assignment and, for a sequence,
    /// its length are valid.
    pub fn write(&mut self, assignment: &Assignment, values: Values<T>) -> Result<(), AxisError>
    where
        T: Clone,
    {
        match values {
            Values::Scalar(value) => self.fill(assignment, value),
            Values::Sequence(values) => self.write_all(assignment, &values),
        }
    }

    /// Assigns `values[i]` to the `i`-th cell of the sub-view selected
    /// by `assignment`. Fails with [`AxisError::LengthMismatch`],
    /// leaving the buffer untouched, unless `values` has exactly one
    /// element per cell.
    pub fn write_all(&mut self, assignment: &Assignment, values: &[T]) -> Result<(), AxisError>
    where
        T: Clone,
    {
        let offsets = self.offsets(assignment)?;
        if offsets.len() != values.len() {
            tracing::debug!(
                "rejected write of {} values to sub-view {} of {} with {} cells",
                values.len(),
                assignment,
                self.space,
                offsets.len()
            );
            return Err(AxisError::LengthMismatch {
                expected: offsets.len(),
                actual: values.len(),
            });
        }
        for (offset, value) in izip!(offsets, values) {
            self.buffer[offset] = value.clone();
        }
        Ok(())
    }

    /// Assigns `value` to every cell of the sub-view selected by
    /// `assignment`.
    pub fn fill(&mut self, assignment: &Assignment, value: T) -> Result<(), AxisError>
    where
        T: Clone,
    {
        for offset in self.offsets(assignment)? {
            self.buffer[offset] = value.clone();
        }
        Ok(())
    }

    /// Every configuration paired with its value, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Configuration, &T)> + '_ {
        self.space.configurations().zip(self.buffer.iter())
    }
}
