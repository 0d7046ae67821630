use std::cmp::Reverse;

use itertools::Itertools;

use crate::collector::IdentCollector;

/// Names to rename, most used first.
///
/// Frequent names are allocated first so they get the cheapest identifiers.
/// Names seen fewer than `min_occurrences` times are left alone; equal
/// counts keep source order.
pub fn filter_mangle_candidates(
    collector: &IdentCollector,
    min_occurrences: usize,
) -> Vec<(String, usize)> {
    let min_occurrences = min_occurrences.max(1);

    collector
        .field
        .iter()
        .filter(|(_, count)| **count >= min_occurrences)
        .sorted_by_key(|(ident, count)| {
            let first_seen = collector
                .first_seen
                .get(*ident)
                .copied()
                .unwrap_or(usize::MAX);
            (Reverse(**count), first_seen)
        })
        .map(|(ident, count)| (ident.clone(), *count))
        .collect()
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use super::*;

    fn collector(entries: &[(&str, usize, usize)]) -> IdentCollector {
        let mut collector = IdentCollector::new();
        collector.field = FxHashMap::from_iter(
            entries
                .iter()
                .map(|(ident, count, _)| (ident.to_string(), *count)),
        );
        collector.first_seen = FxHashMap::from_iter(
            entries
                .iter()
                .map(|(ident, _, first)| (ident.to_string(), *first)),
        );
        collector
    }

    #[test]
    fn most_used_first() {
        let collector = collector(&[("aaa", 1, 0), ("bbb", 5, 1), ("ccc", 3, 2)]);

        let v = filter_mangle_candidates(&collector, 1);

        assert_eq!(
            v,
            vec![
                ("bbb".to_string(), 5),
                ("ccc".to_string(), 3),
                ("aaa".to_string(), 1)
            ]
        );
    }

    #[test]
    fn ties_keep_source_order() {
        let collector = collector(&[("late", 2, 9), ("early", 2, 3), ("mid", 2, 5)]);

        let v = filter_mangle_candidates(&collector, 1)
            .into_iter()
            .map(|(ident, _)| ident)
            .collect::<Vec<_>>();

        assert_eq!(v, ["early", "mid", "late"]);
    }

    #[test]
    fn rarely_used_names_are_dropped() {
        let collector = collector(&[("once", 1, 0), ("twice", 2, 1)]);

        let v = filter_mangle_candidates(&collector, 2);

        assert_eq!(v, vec![("twice".to_string(), 2)]);
    }

    #[test]
    fn empty() {
        assert!(filter_mangle_candidates(&IdentCollector::new(), 1).is_empty());
    }
}
