use chianti_core::common::constants::RYD_TO_EV;
use chianti_core::numerics::within_tolerance;
use chianti_core::scaling::{splom_descale, splom_descale_columns, SplomColumns, SplomError};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct SplomFixtures {
    cases: Vec<SplomCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SplomCase {
    id: String,
    table: SplomColumns,
    energies: Vec<f64>,
    expected_omega: Vec<Vec<f64>>,
    abs_tol: f64,
    rel_tol: f64,
}

fn load_fixtures() -> SplomFixtures {
    let path =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/splom_reference.json");
    let source = fs::read_to_string(&path).expect("fixture should be readable");
    serde_json::from_str(&source).expect("fixture should parse")
}

#[test]
fn all_transform_types_match_reference_collision_strengths() {
    for case in load_fixtures().cases {
        let table = case.table.clone().into_table().expect("valid table");
        let omega = splom_descale(&table, &case.energies).expect("descale");

        assert_eq!(omega.row_count(), case.expected_omega.len(), "{}", case.id);
        assert_eq!(omega.energy_count(), case.energies.len(), "{}", case.id);
        for (row, expected_row) in case.expected_omega.iter().enumerate() {
            for (energy_index, expected) in expected_row.iter().enumerate() {
                let actual = omega
                    .value(row, energy_index)
                    .expect("value inside the grid");
                assert!(
                    within_tolerance(actual, *expected, case.abs_tol, case.rel_tol, 1.0e-12),
                    "{}: row {row} energy {} -> {actual}, expected {expected}",
                    case.id,
                    case.energies[energy_index]
                );
            }
        }
    }
}

#[test]
fn shuffled_energies_produce_the_same_values_in_place() {
    let case = load_fixtures().cases.remove(0);
    let table = case.table.into_table().expect("valid table");

    let mut order: Vec<usize> = (0..case.energies.len()).collect();
    order.reverse();
    order.swap(1, 4);
    let shuffled: Vec<f64> = order.iter().map(|&index| case.energies[index]).collect();

    let omega = splom_descale(&table, &shuffled).expect("descale");
    for (row, expected_row) in case.expected_omega.iter().enumerate() {
        for (position, &source_index) in order.iter().enumerate() {
            let actual = omega.value(row, position).expect("value");
            let expected = expected_row[source_index];
            assert!(
                within_tolerance(actual, expected, case.abs_tol, case.rel_tol, 1.0e-12),
                "row {row} position {position}: {actual} vs {expected}"
            );
        }
    }
}

#[test]
fn single_energy_collapses_to_one_value_per_row() {
    let case = load_fixtures().cases.remove(0);
    let energy = case.energies[5];
    let omega = splom_descale_columns(
        &case.table.deryd,
        &case.table.ttype,
        &case.table.c,
        &case.table.splom,
        &[energy],
    )
    .expect("descale");

    assert_eq!(omega.energy_count(), 1);
    let column: Vec<Vec<f64>> = omega.to_rows();
    assert_eq!(column.len(), case.expected_omega.len());
    for (row, values) in column.iter().enumerate() {
        assert_eq!(values.len(), 1);
        assert!(within_tolerance(
            values[0],
            case.expected_omega[row][5],
            case.abs_tol,
            case.rel_tol,
            1.0e-12
        ));
    }
}

#[test]
fn exact_threshold_energy_is_evaluated_not_excluded() {
    let omega = splom_descale_columns(
        &[1.0],
        &[2],
        &[1.0],
        &[vec![0.4], vec![0.6], vec![0.8], vec![1.0], vec![1.2]],
        &[RYD_TO_EV, 2.0 * RYD_TO_EV],
    )
    .expect("descale");

    // x = 1 maps to the first node for forbidden transitions.
    let at_threshold = omega.value(0, 0).expect("value");
    assert!((at_threshold - 0.4).abs() < 1.0e-12, "{at_threshold}");
}

#[test]
fn mismatched_columns_fail_with_the_offending_column() {
    let error = splom_descale_columns(
        &[1.0, 2.0],
        &[1, 2],
        &[1.0],
        &vec![vec![1.0, 1.0]; 5],
        &[20.0],
    )
    .expect_err("c column is short");
    assert_eq!(
        error,
        SplomError::ColumnLengthMismatch {
            column: "c",
            expected: 2,
            actual: 1
        }
    );
}
