use outline_core::{apply, import_outline, Action, DropPosition, ItemId, Store, ROOT_ID};
use uuid::Uuid;

fn id_of(store: &Store, text: &str) -> ItemId {
    store
        .items()
        .find(|item| item.text == text)
        .map(|item| item.id)
        .unwrap()
}

fn children(store: &Store, id: ItemId) -> Vec<ItemId> {
    store.children_of(id).to_vec()
}

fn move_items(
    store: &Store,
    drag_ids: Vec<ItemId>,
    target_id: ItemId,
    position: DropPosition,
) -> Store {
    apply(
        store,
        &Action::MoveItems {
            drag_ids,
            target_id,
            position,
        },
    )
}

#[test]
fn move_inside_appends_and_expands_target() {
    let store = import_outline("A\nB");
    let a = id_of(&store, "A");
    let b = id_of(&store, "B");

    let next = move_items(&store, vec![b], a, DropPosition::Inside);

    assert_eq!(children(&next, ROOT_ID), vec![a]);
    assert_eq!(children(&next, a), vec![b]);
    assert!(!next.get(a).unwrap().collapsed);
    next.check_invariants().unwrap();
}

#[test]
fn move_inside_collapsed_target_expands_it() {
    let store = import_outline("A\n-A1\nB");
    let a = id_of(&store, "A");
    let a1 = id_of(&store, "A1");
    let b = id_of(&store, "B");
    let store = apply(&store, &Action::ToggleCollapse { id: a });

    let next = move_items(&store, vec![b], a, DropPosition::Inside);

    assert_eq!(children(&next, a), vec![a1, b]);
    assert!(!next.get(a).unwrap().collapsed);
}

#[test]
fn move_before_and_after_splice_next_to_target() {
    let store = import_outline("A\nB\nC\n-C1");
    let a = id_of(&store, "A");
    let b = id_of(&store, "B");
    let c = id_of(&store, "C");
    let c1 = id_of(&store, "C1");

    let before = move_items(&store, vec![c], a, DropPosition::Before);
    assert_eq!(children(&before, ROOT_ID), vec![c, a, b]);
    assert_eq!(children(&before, c), vec![c1]);

    let after = move_items(&store, vec![a], c1, DropPosition::After);
    assert_eq!(children(&after, ROOT_ID), vec![b, c]);
    assert_eq!(children(&after, c), vec![c1, a]);
    after.check_invariants().unwrap();
}

#[test]
fn move_keeps_document_order_and_carries_descendants() {
    let store = import_outline("A\n-A1\nB\n-B1\nC\nD");
    let a = id_of(&store, "A");
    let a1 = id_of(&store, "A1");
    let b = id_of(&store, "B");
    let b1 = id_of(&store, "B1");
    let c = id_of(&store, "C");
    let d = id_of(&store, "D");

    let next = move_items(&store, vec![d, a1, b1, a], c, DropPosition::Inside);

    assert_eq!(children(&next, ROOT_ID), vec![b, c]);
    assert_eq!(children(&next, c), vec![a, b1, d]);
    assert_eq!(children(&next, a), vec![a1]);
    assert!(children(&next, b).is_empty());
    next.check_invariants().unwrap();
}

#[test]
fn move_into_own_subtree_is_rejected() {
    let store = import_outline("A\n-A1\n--A11\nB");
    let a = id_of(&store, "A");
    let a11 = id_of(&store, "A11");
    let b = id_of(&store, "B");

    for position in [DropPosition::Before, DropPosition::After, DropPosition::Inside] {
        let next = move_items(&store, vec![a], a11, position);
        assert!(Store::ptr_eq(&store, &next));

        let next = move_items(&store, vec![b, a], a, position);
        assert!(Store::ptr_eq(&store, &next));
    }
}

#[test]
fn move_rejects_empty_selection_and_unknown_target() {
    let store = import_outline("A\nB");
    let a = id_of(&store, "A");
    let b = id_of(&store, "B");

    let next = move_items(&store, vec![], a, DropPosition::Inside);
    assert!(Store::ptr_eq(&store, &next));

    let next = move_items(&store, vec![Uuid::new_v4(), ROOT_ID], a, DropPosition::Inside);
    assert!(Store::ptr_eq(&store, &next));

    let next = move_items(&store, vec![b], Uuid::new_v4(), DropPosition::Inside);
    assert!(Store::ptr_eq(&store, &next));
}

#[test]
fn move_next_to_root_is_rejected_but_inside_root_is_allowed() {
    let store = import_outline("A\n-A1\nB");
    let a = id_of(&store, "A");
    let a1 = id_of(&store, "A1");
    let b = id_of(&store, "B");

    for position in [DropPosition::Before, DropPosition::After] {
        let next = move_items(&store, vec![a1], ROOT_ID, position);
        assert!(Store::ptr_eq(&store, &next));
    }

    let next = move_items(&store, vec![a1], ROOT_ID, DropPosition::Inside);
    assert_eq!(children(&next, ROOT_ID), vec![a, b, a1]);
    next.check_invariants().unwrap();
}

#[test]
fn move_to_current_position_is_noop() {
    let store = import_outline("A\nB");
    let a = id_of(&store, "A");
    let b = id_of(&store, "B");

    let next = move_items(&store, vec![b], a, DropPosition::After);
    assert!(Store::ptr_eq(&store, &next));
}
