/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Mixed-radix enumeration of [`Configuration`]s.
//!
//! An [`Odometer`] treats each axis of an [`AxisSpace`] as a digit
//! whose radix is the axis cardinality. Digits are little-endian in
//! declaration order: the first-declared axis changes on every step,
//! and a carry propagates toward later-declared axes. Axes pinned by
//! a frozen [`Assignment`] are skipped by the carry and keep their
//! pinned value in every configuration.
//!
//! For `{x=2,y=3}` the sequence is
//! `{x=0,y=0}, {x=1,y=0}, {x=0,y=1}, {x=1,y=1}, {x=0,y=2}, {x=1,y=2}`.
//!
//! The odometer can be driven two ways, and both yield the same
//! sequence:
//!
//! - as an iterator, through [`Configurations`]:
//!   ```
//!   let space = ndaxis::axes!(x = 2, y = 3);
//!   assert_eq!(space.configurations().count(), 6);
//!   ```
//! - by explicit stepping, with [`Odometer::first`],
//!   [`Odometer::advance`] and [`Odometer::is_exhausted`]:
//!   ```
//!   let space = ndaxis::axes!(x = 2, y = 3);
//!   let mut odometer = ndaxis::Odometer::with_frozen(&space, &ndaxis::assign!(y = 1)).unwrap();
//!   odometer.first().unwrap();
//!   let mut seen = Vec::new();
//!   while !odometer.is_exhausted() {
//!       seen.push(odometer.values().unwrap().to_vec());
//!       odometer.advance().unwrap();
//!   }
//!   assert_eq!(seen, vec![vec![0, 1], vec![1, 1]]);
//!   ```

use std::iter::FusedIterator;

use itertools::izip;

use crate::Assignment;
use crate::AxisError;
use crate::AxisSpace;
use crate::Configuration;

/// The stepping state of an [`Odometer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OdometerState {
    /// Constructed, not yet positioned.
    Fresh,
    /// Positioned on a configuration.
    Active,
    /// Stepped past the last configuration. Terminal.
    Exhausted,
}

/// A mixed-radix counter over the free (non-frozen) axes of an
/// [`AxisSpace`]. See the [module documentation](self).
#[derive(Debug, Clone)]
pub struct Odometer {
    space: AxisSpace,
    /// Pinned value of each axis, in declaration order.
    pinned: Vec<Option<usize>>,
    values: Vec<usize>,
    state: OdometerState,
}

impl Odometer {
    /// An odometer over every axis of `space`.
    pub fn new(space: &AxisSpace) -> Self {
        Self::from_pinned(space.clone(), vec![None; space.len()])
    }

    /// An odometer over the axes of `space` not named in `frozen`;
    /// frozen axes hold their assigned value.
    pub fn with_frozen(space: &AxisSpace, frozen: &Assignment) -> Result<Self, AxisError> {
        let pinned = frozen.resolve(space)?;
        Ok(Self::from_pinned(space.clone(), pinned))
    }

    pub(crate) fn from_pinned(space: AxisSpace, pinned: Vec<Option<usize>>) -> Self {
        let odometer = Self {
            values: vec![0; space.len()],
            space,
            pinned,
            state: OdometerState::Fresh,
        };
        tracing::debug!(
            "odometer over {} yields {} configurations",
            odometer.space,
            odometer.len()
        );
        odometer
    }

    pub fn space(&self) -> &AxisSpace {
        &self.space
    }

    pub fn state(&self) -> OdometerState {
        self.state
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == OdometerState::Exhausted
    }

    /// The total number of configurations in the sequence: the
    /// product of the free axes' cardinalities.
    pub fn len(&self) -> usize {
        izip!(self.space.axes(), &self.pinned)
            .filter(|(_, pin)| pin.is_none())
            .map(|(axis, _)| axis.cardinality())
            .product()
    }

    /// Always false: even a fully frozen odometer yields one
    /// configuration.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Names of the axes that vary, fastest first.
    pub fn free_axes(&self) -> impl Iterator<Item = &str> + '_ {
        izip!(self.space.names(), &self.pinned)
            .filter(|(_, pin)| pin.is_none())
            .map(|(name, _)| name)
    }

    /// Positions the odometer on the first configuration: free axes
    /// at 0, frozen axes at their pinned value. An exhausted odometer
    /// cannot be rewound.
    pub fn first(&mut self) -> Result<(), AxisError> {
        if self.is_exhausted() {
            return Err(AxisError::IteratorExhausted);
        }
        for (value, pin) in izip!(&mut self.values, &self.pinned) {
            *value = pin.unwrap_or(0);
        }
        self.state = OdometerState::Active;
        Ok(())
    }

    /// Steps to the next configuration.
    ///
    /// A fresh odometer is positioned as by [`Odometer::first`].
    /// Stepping past the last configuration succeeds and leaves the
    /// odometer exhausted; stepping an exhausted odometer fails with
    /// [`AxisError::IteratorExhausted`] and changes nothing.
    pub fn advance(&mut self) -> Result<(), AxisError> {
        match self.state {
            OdometerState::Fresh => self.first(),
            OdometerState::Exhausted => Err(AxisError::IteratorExhausted),
            OdometerState::Active => {
                if !self.carry() {
                    tracing::trace!("odometer over {} exhausted", self.space);
                    self.state = OdometerState::Exhausted;
                }
                Ok(())
            }
        }
    }

    // Increments the first free axis below its maximum, zeroing the
    // free axes before it. Returns false, leaving the values alone,
    // when every free axis is at its maximum.
    fn carry(&mut self) -> bool {
        let Some(digit) = izip!(self.space.axes(), &self.values, &self.pinned)
            .position(|(axis, value, pin)| pin.is_none() && value + 1 < axis.cardinality())
        else {
            return false;
        };
        for (value, pin) in izip!(&mut self.values[..digit], &self.pinned[..digit]) {
            if pin.is_none() {
                *value = 0;
            }
        }
        self.values[digit] += 1;
        true
    }

    /// The current values in declaration order, while active.
    pub fn values(&self) -> Option<&[usize]> {
        match self.state {
            OdometerState::Active => Some(self.values.as_slice()),
            _ => None,
        }
    }

    /// The current configuration, while active.
    pub fn current(&self) -> Option<Configuration> {
        self.values()
            .map(|values| Configuration::from_values(self.space.clone(), values.to_vec()))
    }

    /// The zero-based index of the current configuration within the
    /// sequence, while active.
    pub fn rank(&self) -> Option<usize> {
        let values = self.values()?;
        let mut rank = 0;
        let mut weight = 1;
        for (axis, value, pin) in izip!(self.space.axes(), values, &self.pinned) {
            if pin.is_none() {
                rank += value * weight;
                weight *= axis.cardinality();
            }
        }
        Some(rank)
    }
}

impl IntoIterator for Odometer {
    type Item = Configuration;
    type IntoIter = Configurations;

    /// Continues the sequence from the odometer's current state: a
    /// fresh odometer yields every configuration, an active one yields
    /// those after the current configuration.
    fn into_iter(self) -> Configurations {
        let remaining = match self.state {
            OdometerState::Fresh => self.len(),
            OdometerState::Active => self.len() - self.rank().map_or(0, |rank| rank + 1),
            OdometerState::Exhausted => 0,
        };
        Configurations {
            odometer: self,
            remaining,
        }
    }
}

/// A lazy iterator over the configurations of an [`Odometer`].
#[derive(Debug, Clone)]
pub struct Configurations {
    odometer: Odometer,
    remaining: usize,
}

impl Iterator for Configurations {
    type Item = Configuration;

    fn next(&mut self) -> Option<Self::Item> {
        self.odometer.advance().ok()?;
        let configuration = self.odometer.current()?;
        self.remaining -= 1;
        Some(configuration)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Configurations {}

impl FusedIterator for Configurations {}

impl AxisSpace {
    /// A fresh [`Odometer`] over every axis.
    pub fn odometer(&self) -> Odometer {
        Odometer::new(self)
    }

    /// Every configuration of this space in canonical order.
    pub fn configurations(&self) -> Configurations {
        self.odometer().into_iter()
    }

    /// The configurations that agree with `frozen`, in canonical order
    /// over the remaining axes.
    pub fn configurations_with(&self, frozen: &Assignment) -> Result<Configurations, AxisError> {
        Ok(Odometer::with_frozen(self, frozen)?.into_iter())
    }
}
