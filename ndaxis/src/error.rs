/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

/// Errors raised while declaring axes, enumerating configurations, or
/// addressing a [`crate::StridedTable`]. Every variant is a caller
/// contract violation; none are transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AxisError {
    #[error("axis `{axis}` is already declared")]
    DuplicateAxis { axis: String },

    #[error("invalid cardinality {cardinality} for axis `{axis}`")]
    InvalidCardinality { axis: String, cardinality: usize },

    #[error("unknown axis `{axis}`")]
    UnknownAxis { axis: String },

    #[error("{value} out of bounds for axis `{axis}` of cardinality {cardinality}")]
    OutOfBounds {
        axis: String,
        value: usize,
        cardinality: usize,
    },

    #[error("declaring axis `{axis}` of cardinality {cardinality} overflows the size of the space")]
    SizeOverflow { axis: String, cardinality: usize },

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("enumerator is exhausted")]
    IteratorExhausted,

    #[error("offset {offset} out of range for table of size {size}")]
    OffsetOutOfRange { offset: usize, size: usize },

    #[error("configuration over {found} does not belong to axis space {expected}")]
    SpaceMismatch { expected: String, found: String },

    #[error("unknown label `{label}` for axis `{axis}`")]
    UnknownLabel { axis: String, label: String },

    #[error("label `{label}` repeats on axis `{axis}`")]
    DuplicateLabel { axis: String, label: String },
}
