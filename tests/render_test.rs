#![allow(unused_imports)]

use labeltree::util::testing;
use labeltree::{LabelTree, TreeError};
use rstest::{fixture, rstest};

#[fixture]
fn sample_tree() -> LabelTree {
    testing::init_test_setup();

    let mut tree = LabelTree::new();
    let a = tree.insert_node("A", None).unwrap();
    let b = tree.insert_node("B", Some(a)).unwrap();
    let c = tree.insert_node("C", Some(a)).unwrap();
    tree.insert_node("D", Some(b)).unwrap();
    tree.insert_node("E", Some(b)).unwrap();
    tree.insert_node("F", Some(c)).unwrap();
    tree.insert_node("G", Some(c)).unwrap();
    tree
}

#[rstest]
fn test_render_sample_tree(sample_tree: LabelTree) {
    let expected = "└──A
    ├──B
    │    ├──D
    │    └──E
    └──C
        ├──F
        └──G";

    let rendered = sample_tree.render().unwrap();
    println!("{}", rendered);
    assert_eq!(rendered, expected);
}

#[rstest]
fn test_render_lines_follow_preorder(sample_tree: LabelTree) {
    let lines = sample_tree.render_lines().unwrap();

    assert_eq!(lines.len(), sample_tree.node_count());
    let suffixes: Vec<&str> = lines
        .iter()
        .map(|line| line.rsplit("──").next().unwrap())
        .collect();
    assert_eq!(suffixes, vec!["A", "B", "D", "E", "C", "F", "G"]);
}

#[rstest]
fn test_render_no_trailing_newline(sample_tree: LabelTree) {
    let rendered = sample_tree.render().unwrap();
    assert!(!rendered.ends_with('\n'));
    assert_eq!(rendered.lines().count(), 7);
}

#[rstest]
fn test_render_after_attach_under_parent(mut sample_tree: LabelTree) {
    sample_tree.add_child_to_parent("child", "C").unwrap();

    let lines = sample_tree.render_lines().unwrap();
    assert_eq!(lines[4], "    └──C");
    assert_eq!(lines[5], "        ├──F");
    assert_eq!(lines[6], "        ├──G");
    assert_eq!(lines[7], "        └──child");
}

#[rstest]
fn test_render_after_removal(mut sample_tree: LabelTree) {
    let a = sample_tree.root().unwrap();
    sample_tree.remove_children(a, "B").unwrap();

    let expected = "└──A
    └──C
        ├──F
        └──G";
    assert_eq!(sample_tree.render().unwrap(), expected);
}

#[rstest]
fn test_render_empty_tree_reports_notice() {
    testing::init_test_setup();

    let tree = LabelTree::new();
    let err = tree.render().unwrap_err();
    assert!(matches!(err, TreeError::EmptyTree));
    assert_eq!(err.to_string(), "tree is empty");

    let lines = tree.render_lines();
    assert!(lines.is_err());
}
