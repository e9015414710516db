//! The reporting identity tree.
//!
//! A run is described as a suite (the test class) whose children are either
//! tests or groups of tests. Groups exist only for enabled parameterized
//! declarations; every other declaration attaches its test directly to the suite.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptionKind {
    Suite,
    Group,
    Test,
}

/// One node of the description tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    kind: DescriptionKind,
    class_name: String,
    display_name: String,
    children: Vec<Description>,
}

impl Description {
    /// The root node for a test class.
    pub fn suite(class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        Self {
            kind: DescriptionKind::Suite,
            display_name: class_name.clone(),
            class_name,
            children: Vec::new(),
        }
    }

    /// An intermediate node named after a parameterized declaration.
    pub fn group(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: DescriptionKind::Group,
            class_name: class_name.into(),
            display_name: name.into(),
            children: Vec::new(),
        }
    }

    /// A leaf: one runnable (or ignored) test.
    pub fn test(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: DescriptionKind::Test,
            class_name: class_name.into(),
            display_name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: Description) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: Description) -> Self {
        self.add_child(child);
        self
    }

    pub fn kind(&self) -> DescriptionKind {
        self.kind
    }

    pub fn is_test(&self) -> bool {
        self.kind == DescriptionKind::Test
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn children(&self) -> &[Description] {
        &self.children
    }

    /// Number of leaf tests at or under this node.
    pub fn test_count(&self) -> usize {
        if self.is_test() {
            1
        } else {
            self.children.iter().map(Description::test_count).sum()
        }
    }

    /// Leaf tests in depth-first order.
    pub fn tests(&self) -> Vec<&Description> {
        let mut out = Vec::new();
        self.collect_tests(&mut out);
        out
    }

    fn collect_tests<'a>(&'a self, out: &mut Vec<&'a Description>) {
        if self.is_test() {
            out.push(self);
        }
        for child in &self.children {
            child.collect_tests(out);
        }
    }

    /// Finds the first node with the given display name.
    pub fn find(&self, display_name: &str) -> Option<&Description> {
        if self.display_name == display_name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(display_name))
    }

    /// Copy of the tree keeping only tests accepted by `keep`.
    ///
    /// Groups left without children are dropped; the suite itself always stays.
    pub fn retain_tests(&self, keep: &dyn Fn(&Description) -> bool) -> Description {
        let children = self
            .children
            .iter()
            .filter_map(|child| match child.kind {
                DescriptionKind::Test => keep(child).then(|| child.clone()),
                _ => {
                    let pruned = child.retain_tests(keep);
                    (!pruned.children.is_empty()).then_some(pruned)
                }
            })
            .collect();
        Description {
            kind: self.kind,
            class_name: self.class_name.clone(),
            display_name: self.display_name.clone(),
            children,
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DescriptionKind::Suite => write!(f, "{}", self.class_name),
            _ => write!(f, "{}::{}", self.class_name, self.display_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Description {
        Description::suite("MathTests")
            .with_child(Description::test("MathTests", "adds"))
            .with_child(
                Description::group("MathTests", "doubles")
                    .with_child(Description::test("MathTests", "doubles: 1"))
                    .with_child(Description::test("MathTests", "doubles: 2")),
            )
    }

    #[test]
    fn counts_and_orders_leaves() {
        let tree = sample();
        assert_eq!(tree.test_count(), 3);
        let names: Vec<_> = tree.tests().iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["adds", "doubles: 1", "doubles: 2"]);
    }

    #[test]
    fn display_joins_class_and_name() {
        let tree = sample();
        assert_eq!(tree.to_string(), "MathTests");
        assert_eq!(tree.find("doubles: 2").unwrap().to_string(), "MathTests::doubles: 2");
        assert_eq!(tree.find("doubles").unwrap().kind(), DescriptionKind::Group);
    }

    #[test]
    fn retain_prunes_empty_groups() {
        let tree = sample();
        let only_adds = tree.retain_tests(&|d| d.display_name() == "adds");
        assert_eq!(only_adds.test_count(), 1);
        assert_eq!(only_adds.children().len(), 1);

        let one_row = tree.retain_tests(&|d| d.display_name().ends_with("2"));
        assert_eq!(one_row.children().len(), 1);
        assert_eq!(one_row.children()[0].children().len(), 1);
    }

    #[test]
    fn empty_group_has_no_tests() {
        let group = Description::group("C", "none");
        assert_eq!(group.test_count(), 0);
    }
}
