/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Conditional probability table access through the public API: a
//! node table laid out as the node followed by its parents, filled
//! row by row, then read back by label, by full walk, and by manual
//! stepping.

use ndaxis::AxisError;
use ndaxis::AxisSpace;
use ndaxis::LabelResolver;
use ndaxis::Odometer;
use ndaxis::StateLabels;
use ndaxis::StridedTable;
use ndaxis::Values;
use ndaxis::assign;

// P(wet | sprinkler, rain).
fn wet_grass() -> (StridedTable<f64>, StateLabels) {
    let space = AxisSpace::family("wet", 2, vec![("sprinkler", 2), ("rain", 2)]).unwrap();
    let labels = StateLabels::new(&space)
        .with_labels("wet", ["false", "true"])
        .unwrap()
        .with_labels("sprinkler", ["off", "on"])
        .unwrap()
        .with_labels("rain", ["no", "yes"])
        .unwrap();

    let mut table = StridedTable::filled(&space, 0.0);
    for (sprinkler, rain, wet) in [
        ("off", "no", 0.0),
        ("on", "no", 0.9),
        ("off", "yes", 0.8),
        ("on", "yes", 0.99),
    ] {
        let parents = labels
            .resolve_assignment([("sprinkler", sprinkler), ("rain", rain)])
            .unwrap();
        table.write_all(&parents, &[1.0 - wet, wet]).unwrap();
    }
    (table, labels)
}

#[test]
fn rows_sum_to_one() {
    let (table, _) = wet_grass();
    let mut parents = Odometer::with_frozen(table.space(), &assign!(wet = 0)).unwrap();
    parents.first().unwrap();
    let mut rows = 0;
    while let Some(configuration) = parents.current() {
        let row = table
            .read(&assign!(
                sprinkler = configuration.get("sprinkler").unwrap(),
                rain = configuration.get("rain").unwrap()
            ))
            .unwrap();
        assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        rows += 1;
        parents.advance().unwrap();
    }
    assert_eq!(rows, 4);
    assert_eq!(parents.advance(), Err(AxisError::IteratorExhausted));
}

#[test]
fn lookup_by_label() {
    let (table, labels) = wet_grass();
    let at = labels
        .resolve_assignment([("wet", "true"), ("sprinkler", "on"), ("rain", "no")])
        .unwrap();
    let offset = table.offset_of(&at).unwrap();
    assert_eq!(table.as_slice()[offset], 0.9);

    let configuration = table.configuration_at(offset).unwrap();
    assert_eq!(
        labels.format_configuration(&configuration),
        "{wet=true,sprinkler=on,rain=no}"
    );
}

#[test]
fn column_reads_follow_canonical_order() {
    let (table, labels) = wet_grass();
    let wet = labels.resolve("wet", "true").unwrap();
    assert_eq!(
        table.read(&assign!(wet = wet)).unwrap(),
        vec![0.0, 0.9, 0.8, 0.99]
    );
}

#[test]
fn full_walk_matches_buffer() {
    let (table, labels) = wet_grass();
    let rendered: Vec<_> = table
        .iter()
        .filter(|(_, value)| **value > 0.5)
        .map(|(configuration, _)| labels.format_configuration(&configuration))
        .collect();
    assert_eq!(
        rendered,
        vec![
            "{wet=false,sprinkler=off,rain=no}",
            "{wet=true,sprinkler=on,rain=no}",
            "{wet=true,sprinkler=off,rain=yes}",
            "{wet=true,sprinkler=on,rain=yes}",
        ]
    );
}

#[test]
fn evidence_clears_sub_view() {
    let (mut table, _) = wet_grass();
    table
        .write(&assign!(rain = 1), Values::Scalar(0.0))
        .unwrap();
    assert_eq!(table.as_slice()[4..], [0.0; 4]);
    assert_eq!(table.read(&assign!(rain = 0, wet = 1)).unwrap(), vec![0.0, 0.9]);
}
