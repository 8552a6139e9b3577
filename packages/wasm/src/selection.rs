//! Line-based selection filter.
//!
//! Narrows the test references to those relevant to a selected source line
//! before the tree is built:
//!
//! 1. find the items whose covered range contains the line,
//! 2. take the union of those ranges,
//! 3. keep every item whose range overlaps that union.
//!
//! Clicking one line inside a function therefore surfaces every test that
//! touches the function, not only the tests touching that exact line.

use crate::graph::{LineRange, TestReference};

/// Filter `items` by `selected_line`, preserving their order.
///
/// With no selected line every item is kept. When no item covers the line
/// the result is empty. Items without a covered range never match.
pub fn filter_items_by_line<T, F>(items: &[T], selected_line: Option<u32>, covered_lines: F) -> Vec<&T>
where
    F: Fn(&T) -> Option<LineRange>,
{
    let Some(line) = selected_line else {
        return items.iter().collect();
    };

    let union = items
        .iter()
        .filter_map(&covered_lines)
        .filter(|range| range.contains(line))
        .reduce(LineRange::union);

    let Some(union) = union else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| covered_lines(*item).is_some_and(|range| range.overlaps(union)))
        .collect()
}

/// Filter test references by the lines they cover.
pub fn filter_tests_by_line(tests: &[TestReference], selected_line: Option<u32>) -> Vec<&TestReference> {
    filter_items_by_line(tests, selected_line, |test| Some(test.covered_lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges() -> Vec<Option<LineRange>> {
        vec![
            Some(LineRange::new(10, 20)),
            Some(LineRange::new(15, 25)),
            Some(LineRange::new(40, 50)),
        ]
    }

    fn filter(items: &[Option<LineRange>], line: Option<u32>) -> Vec<usize> {
        let kept = filter_items_by_line(items, line, |range| *range);
        kept.iter()
            .map(|kept| {
                items
                    .iter()
                    .position(|item| std::ptr::eq(item, *kept))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_line_inside_first_range_pulls_in_overlapping_items() {
        // Line 12 is covered only by [10,20]; [15,25] overlaps that union.
        assert_eq!(filter(&ranges(), Some(12)), vec![0, 1]);
    }

    #[test]
    fn test_line_inside_isolated_range() {
        assert_eq!(filter(&ranges(), Some(45)), vec![2]);
    }

    #[test]
    fn test_uncovered_line_yields_nothing() {
        assert!(filter(&ranges(), Some(5)).is_empty());
    }

    #[test]
    fn test_no_selection_keeps_everything() {
        assert_eq!(filter(&ranges(), None), vec![0, 1, 2]);
    }

    #[test]
    fn test_union_spans_all_direct_items() {
        // Line 18 is covered by both [10,20] and [15,25]; union [10,25]
        // pulls in [24,30] as well.
        let items = vec![
            Some(LineRange::new(10, 20)),
            Some(LineRange::new(15, 25)),
            Some(LineRange::new(24, 30)),
            Some(LineRange::new(26, 30)),
        ];
        assert_eq!(filter(&items, Some(18)), vec![0, 1, 2]);
    }

    #[test]
    fn test_items_without_range_never_match() {
        let items = vec![None, Some(LineRange::new(1, 100))];
        assert_eq!(filter(&items, Some(50)), vec![1]);
    }

    #[test]
    fn test_filter_tests_by_line() {
        let make = |name: &str, start, end| TestReference {
            function_name: "Get".to_string(),
            test_file: "cache_test.go".to_string(),
            test_name: name.to_string(),
            comment: None,
            line_range: LineRange::new(1, 5),
            covered_lines: LineRange::new(start, end),
            input_lines: None,
            output_lines: None,
        };
        let tests = vec![make("A", 10, 20), make("B", 15, 25), make("C", 40, 50)];

        let kept: Vec<&str> = filter_tests_by_line(&tests, Some(12))
            .into_iter()
            .map(|test| test.test_name.as_str())
            .collect();
        assert_eq!(kept, vec!["A", "B"]);
    }
}
