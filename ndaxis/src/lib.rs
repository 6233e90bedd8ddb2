/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Enumeration and strided addressing over named, finite axes.
//!
//! An [`AxisSpace`] declares an ordered set of axes, each with a
//! cardinality. Declaration order is the canonical order: it decides
//! which axis varies fastest when an [`Odometer`] enumerates
//! [`Configuration`]s, and how a [`StridedTable`] strides into its flat
//! buffer. These are the access patterns of conditional probability
//! tables: walking every row, reading or writing the rows that agree
//! with a partial [`Assignment`], and stepping through rows by hand.
//!
//! ```
//! use ndaxis::StridedTable;
//!
//! let space = ndaxis::axes!(x = 4, y = 3, z = 2);
//! let first: Vec<_> = space.configurations().take(2).map(|c| c.to_string()).collect();
//! assert_eq!(first, vec!["{x=0,y=0,z=0}", "{x=1,y=0,z=0}"]);
//!
//! let table = StridedTable::new(&space, (0..24).collect()).unwrap();
//! assert_eq!(table.read(&ndaxis::assign!(x = 1, z = 0)).unwrap(), vec![1, 5, 9]);
//! ```

mod error;
pub use error::AxisError;

/// Axis declarations and the sealed, ordered [`AxisSpace`].
pub mod axis;
pub use axis::AxisSpace;
pub use axis::AxisSpaceBuilder;
pub use axis::AxisSpec;

/// Partial and total value assignments over an [`AxisSpace`].
pub mod assignment;
pub use assignment::Assignment;
pub use assignment::Configuration;

/// Mixed-radix enumeration of configurations, lazily or by stepping.
pub mod odometer;
pub use odometer::Configurations;
pub use odometer::Odometer;
pub use odometer::OdometerState;

/// Flat buffers addressed by configuration and by sub-view.
pub mod table;
pub use table::StridedTable;
pub use table::Values;

/// Symbolic state labels for axis values.
pub mod labels;
pub use labels::LabelResolver;
pub use labels::StateLabels;

/// A capacity-bounded map with pluggable eviction.
pub mod cache;
pub use cache::BoundedCache;
pub use cache::EvictionPolicy;

/// Property-based generators for randomized test input.
#[cfg(test)]
pub mod strategy;
