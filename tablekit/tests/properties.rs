//! Property tests for the transforms and engines.

use std::collections::BTreeMap;

use proptest::prelude::*;

use tablekit::engine::{Selection, SelectionMode, SortState};
use tablekit::model::{DataItem, Record, RowId, Value};
use tablekit::query::{Direction, SortConfig, filter_data, paginate, sort_data, total_pages};

fn record_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(("[a-dA-D]{0,3}", 0i64..5, any::<bool>()), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, score, flag))| {
                Record::new(i as i64)
                    .with("name", name)
                    .with("score", score)
                    .with("flag", flag)
            })
            .collect()
    })
}

fn sort_strategy() -> impl Strategy<Value = Option<SortConfig>> {
    prop_oneof![
        Just(None),
        Just(Some(SortConfig::asc("name"))),
        Just(Some(SortConfig::desc("name"))),
        Just(Some(SortConfig::asc("score"))),
        Just(Some(SortConfig::desc("score"))),
    ]
}

fn filters(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

proptest! {
    /// From any history, three toggles on an unsorted key go asc, desc, unsorted.
    #[test]
    fn prop_sort_cycles(keys in prop::collection::vec("[abc]", 0..6), key in "[abc]") {
        let mut sort = SortState::new();
        for k in &keys {
            sort.toggle(k);
        }
        prop_assume!(!sort.is_sorted(&key));
        prop_assert_eq!(sort.toggle(&key), Some(Direction::Asc));
        prop_assert_eq!(sort.toggle(&key), Some(Direction::Desc));
        prop_assert_eq!(sort.toggle(&key), None);
        prop_assert!(sort.current().is_none());
    }

    /// Equal keys keep their original relative order.
    #[test]
    fn prop_sort_is_stable(data in record_strategy(), desc in any::<bool>()) {
        let config = if desc { SortConfig::desc("score") } else { SortConfig::asc("score") };
        let sorted = sort_data(&data, Some(&config));
        for pair in sorted.windows(2) {
            if pair[0].field("score") == pair[1].field("score") {
                prop_assert!(pair[0].id() < pair[1].id());
            }
        }
    }

    /// Adding a filter never grows the result.
    #[test]
    fn prop_filter_monotonic(data in record_strategy(), needle in "[a-d]{0,2}", score in 0i64..5, flag in any::<bool>()) {
        let base = filters(&[("name", Value::from(needle.as_str()))]);
        let more = filters(&[("name", Value::from(needle.as_str())), ("score", Value::from(score))]);
        let most = filters(&[
            ("name", Value::from(needle.as_str())),
            ("score", Value::from(score)),
            ("flag", Value::from(flag)),
        ]);
        let a = filter_data(&data, &base).len();
        let b = filter_data(&data, &more).len();
        let c = filter_data(&data, &most).len();
        prop_assert!(c <= b && b <= a && a <= data.len());
    }

    /// Pages partition the items exactly.
    #[test]
    fn prop_pagination_totals(total in 0usize..200, size in 1usize..30) {
        let items: Vec<usize> = (0..total).collect();
        let pages = total_pages(total, size);
        prop_assert_eq!(pages, total.div_ceil(size));
        let sum: usize = (1..=pages).map(|p| paginate(&items, p, size).len()).sum();
        prop_assert_eq!(sum, total);
    }

    /// Single mode never holds more than one id.
    #[test]
    fn prop_single_selection(ops in prop::collection::vec((0i64..8, any::<bool>()), 0..50)) {
        let ids: Vec<RowId> = (0..6).map(RowId::from).collect();
        let mut selection = Selection::new(SelectionMode::Single);
        selection.set_rows(ids.clone(), ids);
        for (id, toggle) in ops {
            if toggle {
                selection.toggle(id.into());
            } else {
                selection.select(id.into());
            }
            prop_assert!(selection.selected().len() <= 1);
        }
    }

    /// Reassembling every page gives back the full processed list.
    #[test]
    fn prop_paginate_round_trip(
        data in record_strategy(),
        needle in "[a-d]{0,1}",
        sort in sort_strategy(),
        size in 1usize..7,
    ) {
        let filtered = filter_data(&data, &filters(&[("name", Value::from(needle.as_str()))]));
        let processed = sort_data(&filtered, sort.as_ref());
        let mut reassembled = Vec::new();
        for page in 1..=total_pages(processed.len(), size) {
            reassembled.extend(paginate(&processed, page, size));
        }
        prop_assert_eq!(reassembled, processed);
    }
}
