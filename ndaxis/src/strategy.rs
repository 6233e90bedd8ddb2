/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use proptest::prelude::*;

use crate::Assignment;
use crate::AxisSpace;

/// Generates axis spaces of up to `max_axes` axes named `a0`, `a1`,
/// ..., each with a cardinality in `1..=max_cardinality`.
pub fn gen_space(max_axes: usize, max_cardinality: usize) -> impl Strategy<Value = AxisSpace> {
    prop::collection::vec(1..=max_cardinality, 0..=max_axes).prop_map(|cardinalities| {
        AxisSpace::new(
            cardinalities
                .into_iter()
                .enumerate()
                .map(|(index, cardinality)| (format!("a{}", index), cardinality)),
        )
        .unwrap()
    })
}

/// Generates in-bounds assignments over an arbitrary subset of the
/// axes of `space`, from empty to total.
pub fn gen_frozen(space: AxisSpace) -> impl Strategy<Value = Assignment> {
    let pins: Vec<_> = space
        .axes()
        .iter()
        .map(|axis| prop::option::of(0..axis.cardinality()))
        .collect();
    pins.prop_map(move |pins| {
        space
            .names()
            .zip(pins)
            .filter_map(|(name, pin)| pin.map(|value| (name.to_string(), value)))
            .collect()
    })
}

/// Generates a space together with an assignment over it.
pub fn gen_space_and_frozen(
    max_axes: usize,
    max_cardinality: usize,
) -> impl Strategy<Value = (AxisSpace, Assignment)> {
    gen_space(max_axes, max_cardinality).prop_flat_map(|space| {
        let frozen = gen_frozen(space.clone());
        (Just(space), frozen)
    })
}

#[cfg(test)]
mod tests {
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    use super::*;

    #[test]
    fn test_gen_frozen_in_bounds() {
        let mut runner = TestRunner::default();
        for _ in 0..64 {
            let (space, frozen) = gen_space_and_frozen(4, 3)
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert!(frozen.len() <= space.len());
            assert!(frozen.resolve(&space).is_ok());
        }
    }
}
