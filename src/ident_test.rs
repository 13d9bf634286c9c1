use std::collections::HashSet;

use super::*;

#[test]
fn id_carries_kind_prefix() {
    let id = element_id("rect");
    assert!(id.starts_with("rect_"));
    assert!(id.len() > "rect_".len());
}

#[test]
fn ids_are_unique() {
    let ids: HashSet<String> = (0..1000).map(|_| element_id("stroke")).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn prefix_is_not_parsed() {
    // Any prefix works; the generator does not validate element kinds.
    let id = element_id("whatever");
    assert!(id.starts_with("whatever_"));
}
