//! Property tests for the hierarchy store.
//!
//! 1. **Single membership**: after any sequence of operations, every
//!    sub-item id occurs under exactly one item and item ids are unique.
//! 2. **Reorder idempotence**: repeating a reorder changes nothing.
//! 3. **Toggle involution**: toggling twice restores the hierarchy.
//! 4. **Failed operations are inert**: an error leaves the hierarchy as
//!    it was and never notifies the sink.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use proptest::prelude::*;
use tiered::model::{Hierarchy, Item, ItemId, SubId, SubItem};
use tiered::ops::hierarchy_ops::{self, Change};
use tiered::ops::{ChangeSink, HierarchyStore};

// ── Operations drawn by index into the current hierarchy ───────────────

#[derive(Debug, Clone)]
enum Op {
    AddItem,
    AddSub(usize),
    DeleteItem(usize),
    DeleteSub(usize, usize),
    Reparent(usize, usize, usize),
    Reorder(usize, usize),
    ToggleItem(usize),
    ToggleSub(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    let i = 0usize..8;
    prop_oneof![
        Just(Op::AddItem),
        i.clone().prop_map(Op::AddSub),
        i.clone().prop_map(Op::DeleteItem),
        (i.clone(), i.clone()).prop_map(|(a, b)| Op::DeleteSub(a, b)),
        (i.clone(), i.clone(), i.clone()).prop_map(|(a, b, c)| Op::Reparent(a, b, c)),
        (i.clone(), i.clone()).prop_map(|(a, b)| Op::Reorder(a, b)),
        i.clone().prop_map(Op::ToggleItem),
        (i.clone(), i).prop_map(|(a, b)| Op::ToggleSub(a, b)),
    ]
}

fn seed() -> Hierarchy {
    let mut a = Item::new("A".into(), "a");
    a.subs.push(SubItem::new("A1".into(), "a1"));
    a.subs.push(SubItem::new("A2".into(), "a2"));
    let mut b = Item::new("B".into(), "b");
    b.subs.push(SubItem::new("B1".into(), "b1"));
    Hierarchy::new(vec![a, b, Item::new("C".into(), "c")])
}

fn item_at(h: &Hierarchy, idx: usize) -> Option<ItemId> {
    if h.items.is_empty() {
        return None;
    }
    Some(h.items[idx % h.items.len()].id.clone())
}

fn sub_at(h: &Hierarchy, item: usize, sub: usize) -> Option<(ItemId, SubId)> {
    let owner = item_at(h, item)?;
    let subs = &h.item(&owner)?.subs;
    if subs.is_empty() {
        return None;
    }
    Some((owner, subs[sub % subs.len()].id.clone()))
}

/// Apply one op, ignoring its result; ids come from `next`
fn apply(h: &mut Hierarchy, op: &Op, next: &mut u32) {
    let mut fresh = || {
        *next += 1;
        format!("n{next}")
    };
    let _ = match *op {
        Op::AddItem => hierarchy_ops::add_item(h, ItemId::new(fresh()), "new"),
        Op::AddSub(i) => match item_at(h, i) {
            Some(owner) => hierarchy_ops::add_sub(h, &owner, SubId::new(fresh()), "new"),
            None => continue_ok(),
        },
        Op::DeleteItem(i) => match item_at(h, i) {
            Some(id) => hierarchy_ops::delete_item(h, &id),
            None => continue_ok(),
        },
        Op::DeleteSub(i, s) => match sub_at(h, i, s) {
            Some((owner, sub)) => hierarchy_ops::delete_sub(h, &owner, &sub),
            None => continue_ok(),
        },
        Op::Reparent(i, s, to) => match (sub_at(h, i, s), item_at(h, to)) {
            (Some((from, sub)), Some(to)) => hierarchy_ops::reparent_sub(h, &sub, &from, &to),
            _ => continue_ok(),
        },
        Op::Reorder(a, b) => match (item_at(h, a), item_at(h, b)) {
            (Some(a), Some(b)) => hierarchy_ops::reorder_item(h, &a, &b),
            _ => continue_ok(),
        },
        Op::ToggleItem(i) => match item_at(h, i) {
            Some(id) => hierarchy_ops::toggle_item_done(h, &id),
            None => continue_ok(),
        },
        Op::ToggleSub(i, s) => match sub_at(h, i, s) {
            Some((owner, sub)) => hierarchy_ops::toggle_sub_done(h, &owner, &sub),
            None => continue_ok(),
        },
    };
}

fn continue_ok() -> Result<Change, hierarchy_ops::StoreError> {
    Ok(Change::Unchanged)
}

fn assert_single_membership(h: &Hierarchy) {
    let mut items = HashSet::new();
    let mut subs = HashSet::new();
    for item in &h.items {
        assert!(items.insert(item.id.clone()), "duplicate item {}", item.id);
        for sub in &item.subs {
            assert!(subs.insert(sub.id.clone()), "sub {} under two items", sub.id);
        }
    }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_sub_has_exactly_one_owner(ops in prop::collection::vec(op(), 0..60)) {
        let mut h = seed();
        let mut next = 0;
        for op in &ops {
            apply(&mut h, op, &mut next);
            assert_single_membership(&h);
        }
    }

    #[test]
    fn reorder_twice_is_reorder_once(ops in prop::collection::vec(op(), 0..20), a in 0usize..8, b in 0usize..8) {
        let mut h = seed();
        let mut next = 0;
        for op in &ops {
            apply(&mut h, op, &mut next);
        }
        let (Some(a), Some(b)) = (item_at(&h, a), item_at(&h, b)) else {
            return Ok(());
        };
        hierarchy_ops::reorder_item(&mut h, &a, &b).unwrap();
        let once = h.clone();
        prop_assert_eq!(hierarchy_ops::reorder_item(&mut h, &a, &b).unwrap(), Change::Unchanged);
        prop_assert_eq!(h, once);
    }

    #[test]
    fn toggle_is_an_involution(ops in prop::collection::vec(op(), 0..20), i in 0usize..8) {
        let mut h = seed();
        let mut next = 0;
        for op in &ops {
            apply(&mut h, op, &mut next);
        }
        let Some(id) = item_at(&h, i) else {
            return Ok(());
        };
        let before = h.clone();
        hierarchy_ops::toggle_item_done(&mut h, &id).unwrap();
        prop_assert_ne!(&h, &before);
        hierarchy_ops::toggle_item_done(&mut h, &id).unwrap();
        prop_assert_eq!(h, before);
    }

    #[test]
    fn failed_operations_change_nothing(missing in "[x-z][0-9]{1,4}") {
        let notified = Rc::new(Cell::new(0));
        let mut store = HierarchyStore::new(seed(), Box::new(Counter(notified.clone())));
        let before = store.hierarchy().clone();
        let missing_item = ItemId::new(missing.clone());
        let missing_sub = SubId::new(missing);

        prop_assert!(store.delete_item(&missing_item).is_err());
        prop_assert!(store.delete_sub(&"A".into(), &missing_sub).is_err());
        prop_assert!(store.toggle_item_done(&missing_item).is_err());
        prop_assert!(store.reorder_item(&missing_item, &"A".into()).is_err());
        prop_assert!(store.reparent_sub(&missing_sub, &"A".into(), &"B".into()).is_err());
        prop_assert!(store.reparent_sub(&"A1".into(), &"A".into(), &missing_item).is_err());
        prop_assert!(store.add_sub(&missing_item, "text").is_err());

        prop_assert_eq!(store.hierarchy(), &before);
        prop_assert_eq!(notified.get(), 0);
    }
}

struct Counter(Rc<Cell<usize>>);

impl ChangeSink for Counter {
    fn state_changed(&mut self, _hierarchy: &Hierarchy) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn reparent_there_and_back_lands_at_the_end() {
    let mut h = seed();
    let a1: SubId = "A1".into();
    let (a, b): (ItemId, ItemId) = ("A".into(), "B".into());
    hierarchy_ops::reparent_sub(&mut h, &a1, &a, &b).unwrap();
    hierarchy_ops::reparent_sub(&mut h, &a1, &b, &a).unwrap();
    let subs: Vec<&str> = h.items[0].subs.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(subs, ["A2", "A1"]);
    assert_eq!(
        hierarchy_ops::reparent_sub(&mut h, &a1, &a, &a).unwrap(),
        Change::Unchanged
    );
}
