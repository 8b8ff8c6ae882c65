//! Tests for merged-cell repair

use super::super::forward_fill::forward_fill;
use super::{e, t};

#[test]
fn test_fill_runs_within_a_column() {
    let mut rows = vec![
        vec![t("A")],
        vec![e()],
        vec![e()],
        vec![t("B")],
        vec![e()],
    ];

    let filled = forward_fill(&mut rows);

    assert_eq!(filled, 3);
    let column: Vec<_> = rows.iter().map(|row| row[0].clone()).collect();
    assert_eq!(column, vec![t("A"), t("A"), t("A"), t("B"), t("B")]);
}

#[test]
fn test_columns_fill_independently() {
    let mut rows = vec![vec![t("x"), e()], vec![e(), t("y")], vec![e(), e()]];

    forward_fill(&mut rows);

    assert_eq!(rows[0], vec![t("x"), e()]);
    assert_eq!(rows[1], vec![t("x"), t("y")]);
    assert_eq!(rows[2], vec![t("x"), t("y")]);
}

#[test]
fn test_whitespace_counts_as_empty() {
    let mut rows = vec![vec![t("KC Bogor")], vec![t("   ")]];

    assert_eq!(forward_fill(&mut rows), 1);
    assert_eq!(rows[1][0], t("KC Bogor"));
}

#[test]
fn test_ragged_rows() {
    let mut rows = vec![vec![t("a")], vec![e(), t("b")], vec![]];

    assert_eq!(forward_fill(&mut rows), 1);
    assert!(rows[2].is_empty());
}
