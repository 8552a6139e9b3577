//! Building the mind map tree from flat test references.
//!
//! References are grouped by function name and nested under a root keyed
//! by the source file path. Node ids follow two conventions so that click
//! callbacks can map an id back to a test identity:
//! - functions: `func:<filePath>:<functionName>`
//! - tests: `<testFile>:<testName>`

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::node::MindMapNode;

/// An inclusive range of source lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Whether `line` falls inside the range.
    #[inline]
    pub fn contains(self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }

    /// Whether the two ranges share at least one line.
    #[inline]
    pub fn overlaps(self, other: LineRange) -> bool {
        self.start.max(other.start) <= self.end.min(other.end)
    }

    /// Smallest range covering both.
    #[inline]
    pub fn union(self, other: LineRange) -> LineRange {
        LineRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A test that exercises a function of the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReference {
    pub function_name: String,
    pub test_file: String,
    pub test_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub line_range: LineRange,
    pub covered_lines: LineRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_lines: Option<LineRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_lines: Option<LineRange>,
}

/// Id of a function node.
pub fn function_node_id(file_path: &str, function_name: &str) -> String {
    format!("func:{file_path}:{function_name}")
}

/// Id of a test leaf.
pub fn test_node_id(test_file: &str, test_name: &str) -> String {
    format!("{test_file}:{test_name}")
}

/// Group test references by function under a root for `file_path`.
///
/// Functions appear in the order their first test appears. A test that
/// references the same file more than once keeps only its first leaf, so
/// ids stay unique within the tree.
pub fn build_mind_map<'a, I>(file_path: &str, file_name: &str, tests: I) -> MindMapNode
where
    I: IntoIterator<Item = &'a TestReference>,
{
    let mut groups: Vec<(&'a str, Vec<&'a TestReference>)> = Vec::new();
    let mut group_of: HashMap<&'a str, usize> = HashMap::new();

    for test in tests {
        let name = test.function_name.trim();
        let slot = *group_of.entry(name).or_insert_with(|| {
            groups.push((name, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(test);
    }

    let mut seen_tests = HashSet::new();
    let children = groups
        .into_iter()
        .map(|(name, tests)| {
            let leaves = tests
                .into_iter()
                .filter_map(|test| {
                    let id = test_node_id(&test.test_file, &test.test_name);
                    if !seen_tests.insert(id.clone()) {
                        tracing::debug!(test = %id, "test already placed under another function");
                        return None;
                    }
                    Some(MindMapNode {
                        id,
                        label: test.test_name.clone(),
                        edge_label: test.comment.clone(),
                        children: Vec::new(),
                    })
                })
                .collect();
            MindMapNode::new(function_node_id(file_path, name), name).with_children(leaves)
        })
        .collect();

    MindMapNode::new(file_path, file_name).with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(function: &str, name: &str, covered: (u32, u32)) -> TestReference {
        TestReference {
            function_name: function.to_string(),
            test_file: "tests/cache_test.go".to_string(),
            test_name: name.to_string(),
            comment: None,
            line_range: LineRange::new(1, 10),
            covered_lines: LineRange::new(covered.0, covered.1),
            input_lines: None,
            output_lines: None,
        }
    }

    #[test]
    fn test_line_range_contains() {
        let range = LineRange::new(10, 20);
        assert!(range.contains(10));
        assert!(range.contains(20));
        assert!(!range.contains(9));
        assert!(!range.contains(21));
    }

    #[test]
    fn test_line_range_overlap_and_union() {
        let a = LineRange::new(10, 20);
        let b = LineRange::new(20, 30);
        let c = LineRange::new(21, 30);
        assert!(a.overlaps(b));
        assert!(!a.overlaps(c));
        assert_eq!(a.union(c), LineRange::new(10, 30));
    }

    #[test]
    fn test_ids_follow_conventions() {
        assert_eq!(function_node_id("pkg/cache.go", "Get"), "func:pkg/cache.go:Get");
        assert_eq!(test_node_id("pkg/cache_test.go", "TestGet"), "pkg/cache_test.go:TestGet");
    }

    #[test]
    fn test_build_groups_by_trimmed_function_name() {
        let mut with_comment = reference("Get ", "TestGetHit", (5, 9));
        with_comment.comment = Some("cache hit".to_string());
        let refs = vec![
            reference("Get", "TestGetMiss", (5, 9)),
            reference("Put", "TestPut", (12, 20)),
            with_comment,
        ];

        let tree = build_mind_map("pkg/cache.go", "cache.go", &refs);

        assert_eq!(tree.id, "pkg/cache.go");
        assert_eq!(tree.label, "cache.go");
        assert_eq!(tree.children.len(), 2);

        let get = &tree.children[0];
        assert_eq!(get.id, "func:pkg/cache.go:Get");
        assert_eq!(get.label, "Get");
        assert_eq!(get.children.len(), 2);
        assert_eq!(get.children[0].id, "tests/cache_test.go:TestGetMiss");
        assert_eq!(get.children[1].edge_label.as_deref(), Some("cache hit"));

        assert_eq!(tree.children[1].label, "Put");
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_build_keeps_first_leaf_of_repeated_test() {
        let refs = vec![
            reference("Get", "TestRoundTrip", (5, 9)),
            reference("Put", "TestRoundTrip", (12, 20)),
        ];
        let tree = build_mind_map("pkg/cache.go", "cache.go", &refs);

        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].children.len(), 1);
        assert!(tree.children[1].children.is_empty());
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_build_without_tests() {
        let tree = build_mind_map("pkg/cache.go", "cache.go", &Vec::<TestReference>::new());
        assert!(tree.children.is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_reference_deserializes_camel_case() {
        let json = r#"{
            "functionName": "Get",
            "testFile": "cache_test.go",
            "testName": "TestGet",
            "lineRange": { "start": 1, "end": 8 },
            "coveredLines": { "start": 10, "end": 14 }
        }"#;
        let test: TestReference = serde_json::from_str(json).unwrap();
        assert_eq!(test.covered_lines, LineRange::new(10, 14));
        assert!(test.comment.is_none());
    }
}
