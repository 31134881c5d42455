use outline_core::{
    apply, depth_of, document_order, find_parent, import_outline, is_ancestor, next_visible,
    previous_visible, subtree_ids, visible_flat_list, Action, ItemId, Store, ROOT_ID,
};
use uuid::Uuid;

fn id_of(store: &Store, text: &str) -> ItemId {
    store
        .items()
        .find(|item| item.text == text)
        .map(|item| item.id)
        .unwrap()
}

fn setup() -> Store {
    import_outline("A\n-A1\n--A11\n-A2\nB")
}

#[test]
fn find_parent_matches_children_relation() {
    let store = setup();
    let a = id_of(&store, "A");
    let a11 = id_of(&store, "A11");
    let a1 = id_of(&store, "A1");

    assert_eq!(find_parent(&store, a), Some(ROOT_ID));
    assert_eq!(find_parent(&store, a11), Some(a1));
    assert_eq!(find_parent(&store, ROOT_ID), None);
    assert_eq!(find_parent(&store, Uuid::new_v4()), None);

    for item in store.items() {
        for child in &item.children {
            assert_eq!(find_parent(&store, *child), Some(item.id));
        }
    }
}

#[test]
fn is_ancestor_follows_parent_chain() {
    let store = setup();
    let a = id_of(&store, "A");
    let a11 = id_of(&store, "A11");
    let a2 = id_of(&store, "A2");
    let b = id_of(&store, "B");

    assert!(is_ancestor(&store, a, a));
    assert!(is_ancestor(&store, a, a11));
    assert!(is_ancestor(&store, ROOT_ID, a11));
    assert!(!is_ancestor(&store, a11, a));
    assert!(!is_ancestor(&store, b, a2));
    assert!(!is_ancestor(&store, a2, a11));
}

#[test]
fn visible_flat_list_skips_collapsed_subtrees() {
    let store = setup();
    let a = id_of(&store, "A");
    let a1 = id_of(&store, "A1");
    let a11 = id_of(&store, "A11");
    let a2 = id_of(&store, "A2");
    let b = id_of(&store, "B");

    assert_eq!(visible_flat_list(&store, ROOT_ID), vec![a, a1, a11, a2, b]);

    let collapsed = apply(&store, &Action::ToggleCollapse { id: a1 });
    assert_eq!(visible_flat_list(&collapsed, ROOT_ID), vec![a, a1, a2, b]);

    let collapsed = apply(&collapsed, &Action::ToggleCollapse { id: a });
    assert_eq!(visible_flat_list(&collapsed, ROOT_ID), vec![a, b]);
    assert_eq!(visible_flat_list(&collapsed, a), vec![a1, a2]);
    assert!(visible_flat_list(&collapsed, Uuid::new_v4()).is_empty());
}

#[test]
fn next_and_previous_visible_walk_the_visible_list() {
    let store = setup();
    let a = id_of(&store, "A");
    let a1 = id_of(&store, "A1");
    let a2 = id_of(&store, "A2");
    let b = id_of(&store, "B");
    let store = apply(&store, &Action::ToggleCollapse { id: a1 });

    assert_eq!(next_visible(&store, a1), Some(a2));
    assert_eq!(previous_visible(&store, a2), Some(a1));
    assert_eq!(previous_visible(&store, a), None);
    assert_eq!(next_visible(&store, b), None);
    assert_eq!(next_visible(&store, id_of(&store, "A11")), None);
}

#[test]
fn depth_and_document_order_ignore_collapse() {
    let store = setup();
    let a = id_of(&store, "A");
    let a1 = id_of(&store, "A1");
    let a11 = id_of(&store, "A11");
    let a2 = id_of(&store, "A2");
    let b = id_of(&store, "B");
    let store = apply(&store, &Action::ToggleCollapse { id: a });

    assert_eq!(depth_of(&store, a11), Some(2));
    assert_eq!(depth_of(&store, b), Some(0));
    assert_eq!(document_order(&store), vec![a, a1, a11, a2, b]);
    assert_eq!(subtree_ids(&store, a1), vec![a1, a11]);
    assert!(subtree_ids(&store, Uuid::new_v4()).is_empty());
}
