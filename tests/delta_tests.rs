//! Integration tests for batch delta folding

use class_observer::{fold_batch, ChangeRecord, Element};

#[test]
fn test_attribute_transition_prunes_shared_tokens() {
    let records = vec![ChangeRecord::<Element>::attribute("y z", Some("x y"))];
    let changes = fold_batch(&records);

    assert_eq!(changes.count("x"), -1);
    assert_eq!(changes.count("z"), 1);
    assert!(!changes.contains("y"), "unchanged token must net to nothing");
    assert_eq!(changes.len(), 2);
}

#[test]
fn test_missing_previous_value_subtracts_nothing() {
    let records = vec![ChangeRecord::<Element>::attribute("a b", None)];
    let changes = fold_batch(&records);

    assert_eq!(changes.count("a"), 1);
    assert_eq!(changes.count("b"), 1);
    assert_eq!(changes.len(), 2);
}

#[test]
fn test_negative_net_survives_without_prior_addition() {
    // A class removed in this batch may well have been added long before it
    let records = vec![ChangeRecord::<Element>::attribute("", Some("old"))];
    let changes = fold_batch(&records);

    assert_eq!(changes.count("old"), -1);
}

#[test]
fn test_subtree_insertion_and_removal_counts() {
    let added = Element::with_class("section", "card")
        .child(Element::with_class("h2", "title card"));
    let removed = Element::with_class("aside", "card");

    let records = vec![ChangeRecord::child_list(vec![added], vec![removed])];
    let changes = fold_batch(&records);

    assert_eq!(changes.count("card"), 1, "2 added - 1 removed");
    assert_eq!(changes.count("title"), 1);
}

#[test]
fn test_batch_wide_cancellation() {
    // The same element bouncing in and out within one batch is invisible
    let bounced = Element::with_class("div", "flash note");
    let records = vec![
        ChangeRecord::child_list(vec![bounced.clone()], vec![]),
        ChangeRecord::<Element>::attribute("permanent", None),
        ChangeRecord::child_list(vec![], vec![bounced]),
    ];

    let changes = fold_batch(&records);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes.count("permanent"), 1);
}

#[test]
fn test_record_order_does_not_change_the_net() {
    let make_tree = || Element::with_class("div", "a").child(Element::with_class("i", "b"));
    let forward = vec![
        ChangeRecord::child_list(vec![make_tree()], vec![]),
        ChangeRecord::<Element>::attribute("b c", Some("a")),
    ];
    let backward = vec![
        ChangeRecord::<Element>::attribute("b c", Some("a")),
        ChangeRecord::child_list(vec![make_tree()], vec![]),
    ];

    let first = fold_batch(&forward);
    let second = fold_batch(&backward);

    for key in ["a", "b", "c"] {
        assert_eq!(first.count(key), second.count(key), "net for {}", key);
    }
    assert_eq!(first.len(), second.len());
}

#[test]
fn test_empty_batch_yields_empty_delta() {
    let changes = fold_batch::<Element>(&[]);
    assert!(changes.is_empty());
}
