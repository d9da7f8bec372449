//! FILENAME: core/chart-engine/src/axis.rs
//! PURPOSE: Deterministic ordering of the x-axis domain.
//! CONTEXT: If every key reads as a date the axis is chronological;
//! otherwise keys sort as text. Year and ISO-date group columns therefore
//! plot in time order while city or complex names sort alphabetically.

use std::cmp::Ordering;

use table::parse_date_key;

/// Returns the positions of `keys` in axis order.
///
/// Sorting is stable, so keys that compare equal keep their input order.
pub fn axis_positions(keys: &[String]) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..keys.len()).collect();
    if keys.len() < 2 {
        return positions;
    }

    let timestamps: Option<Vec<i64>> = keys.iter().map(|k| parse_date_key(k)).collect();
    match timestamps {
        Some(stamps) => positions.sort_by_key(|&i| stamps[i]),
        None => positions.sort_by(|&a, &b| compare_labels(&keys[a], &keys[b])),
    }
    positions
}

/// Sorts a set of distinct x keys into axis order.
pub fn order_axis(keys: Vec<String>) -> Vec<String> {
    let positions = axis_positions(&keys);
    let mut slots: Vec<Option<String>> = keys.into_iter().map(Some).collect();
    positions
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

/// Text ordering: case-folded first, raw text as the tie-breaker.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
