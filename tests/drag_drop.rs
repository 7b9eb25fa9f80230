use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tiered::drag::{
    self, Area, ControlKind, DropTarget, Element, GestureConfig, GestureEvent, GestureNormalizer,
    GestureOutcome, HitMap, Phase, Point, RowRef,
};
use tiered::io::kv::KvStore;
use tiered::io::persist::{PersistSink, load_hierarchy};
use tiered::model::{Hierarchy, Item, SubItem};
use tiered::ops::{Change, HierarchyStore, NullSink};

/// One row per line, full width, with a toggle button at x 0..3. Subs get
/// a sub-list region spanning their rows.
fn layout(h: &Hierarchy) -> HitMap {
    let mut map = HitMap::new();
    let mut y = 0;
    for item in &h.items {
        let row = RowRef::Item(item.id.clone());
        map.push(Area::new(0, y, 40, 1), Element::Row(row.clone()));
        map.push(
            Area::new(0, y, 3, 1),
            Element::Control {
                kind: ControlKind::Toggle,
                row,
            },
        );
        y += 1;
        if !item.subs.is_empty() {
            map.push(
                Area::new(0, y, 40, item.subs.len() as u16),
                Element::SubList {
                    owner: item.id.clone(),
                },
            );
        }
        for sub in &item.subs {
            map.push(
                Area::new(0, y, 40, 1),
                Element::Row(RowRef::Sub {
                    id: sub.id.clone(),
                    parent: item.id.clone(),
                }),
            );
            y += 1;
        }
    }
    map
}

fn hierarchy(items: Vec<(&str, Vec<&str>)>) -> Hierarchy {
    Hierarchy::new(
        items
            .into_iter()
            .map(|(id, subs)| {
                let mut item = Item::new(id.into(), id.to_lowercase());
                item.subs = subs
                    .into_iter()
                    .map(|s| SubItem::new(s.into(), s.to_lowercase()))
                    .collect();
                item
            })
            .collect(),
    )
}

fn summary(h: &Hierarchy) -> Vec<(String, Vec<String>)> {
    h.items
        .iter()
        .map(|i| {
            (
                i.id.to_string(),
                i.subs.iter().map(|s| s.id.to_string()).collect(),
            )
        })
        .collect()
}

fn expect(items: Vec<(&str, Vec<&str>)>) -> Vec<(String, Vec<String>)> {
    items
        .into_iter()
        .map(|(id, subs)| (id.to_string(), subs.into_iter().map(String::from).collect()))
        .collect()
}

/// Feed events and commit whatever drop comes out
fn drive(
    store: &mut HierarchyStore,
    gestures: &mut GestureNormalizer,
    events: &[(GestureEvent, Duration)],
) -> Option<Change> {
    let hits = layout(store.hierarchy());
    let t0 = Instant::now();
    let mut change = None;
    for (event, at) in events {
        let now = t0 + *at;
        gestures.tick(now);
        if let GestureOutcome::Committed(request) = gestures.process(*event, &hits, now) {
            change = Some(drag::commit(store, &request).unwrap());
        }
    }
    change
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn pointer_drag_item_onto_first_row_moves_it_before() {
    let mut store = HierarchyStore::new(
        hierarchy(vec![("A", vec![]), ("B", vec![]), ("C", vec![])]),
        Box::new(NullSink),
    );
    let mut gestures = GestureNormalizer::default();
    let change = drive(
        &mut store,
        &mut gestures,
        &[
            (GestureEvent::PointerDragStart(Point::new(10, 2)), ms(0)),
            (GestureEvent::PointerDragOver(Point::new(10, 1)), ms(10)),
            (GestureEvent::PointerDrop(Point::new(10, 0)), ms(20)),
            (GestureEvent::PointerDragEnd, ms(20)),
        ],
    );
    assert_eq!(change, Some(Change::Applied));
    assert_eq!(
        summary(store.hierarchy()),
        expect(vec![("C", vec![]), ("A", vec![]), ("B", vec![])])
    );
    assert_eq!(gestures.phase(), Phase::Idle);
}

#[test]
fn touch_drag_sub_onto_other_item_reparents() {
    let mut store = HierarchyStore::new(
        hierarchy(vec![("A", vec!["A1"]), ("B", vec![])]),
        Box::new(NullSink),
    );
    let mut gestures = GestureNormalizer::default();
    let change = drive(
        &mut store,
        &mut gestures,
        &[
            (GestureEvent::TouchStart(Point::new(10, 1)), ms(0)),
            (GestureEvent::TouchMove(Point::new(10, 2)), ms(250)),
            (GestureEvent::TouchEnd(Point::new(10, 2)), ms(300)),
        ],
    );
    assert_eq!(change, Some(Change::Applied));
    assert_eq!(
        summary(store.hierarchy()),
        expect(vec![("A", vec![]), ("B", vec!["A1"])])
    );
}

#[test]
fn touch_tap_never_drags() {
    let store = HierarchyStore::new(
        hierarchy(vec![("A", vec![]), ("B", vec![])]),
        Box::new(NullSink),
    );
    let mut gestures = GestureNormalizer::new(GestureConfig::default());
    let hits = layout(store.hierarchy());
    let t0 = Instant::now();

    assert_eq!(
        gestures.process(GestureEvent::TouchStart(Point::new(10, 0)), &hits, t0),
        GestureOutcome::Armed
    );
    assert_eq!(gestures.tick(t0 + ms(150)), GestureOutcome::Ignored);
    assert_eq!(
        gestures.process(GestureEvent::TouchEnd(Point::new(10, 0)), &hits, t0 + ms(180)),
        GestureOutcome::Tap(Point::new(10, 0))
    );
    assert_eq!(gestures.tick(t0 + ms(400)), GestureOutcome::Ignored);
    assert_eq!(gestures.phase(), Phase::Idle);
    assert_eq!(
        summary(store.hierarchy()),
        expect(vec![("A", vec![]), ("B", vec![])])
    );
    // Nothing to commit after a tap
    assert_eq!(drag::resolve(gestures.session(), None), None);
}

#[test]
fn drop_into_own_sub_list_is_a_no_op() {
    let mut store = HierarchyStore::new(
        hierarchy(vec![("A", vec!["A1", "A2"]), ("B", vec![])]),
        Box::new(NullSink),
    );
    let mut gestures = GestureNormalizer::default();
    let change = drive(
        &mut store,
        &mut gestures,
        &[
            (GestureEvent::PointerDragStart(Point::new(10, 1)), ms(0)),
            (GestureEvent::PointerDrop(Point::new(10, 2)), ms(10)),
            (GestureEvent::PointerDragEnd, ms(10)),
        ],
    );
    assert_eq!(change, Some(Change::Unchanged));
    assert_eq!(
        summary(store.hierarchy()),
        expect(vec![("A", vec!["A1", "A2"]), ("B", vec![])])
    );
}

#[test]
fn press_on_button_does_not_start_a_drag() {
    let h = hierarchy(vec![("A", vec![])]);
    let hits = layout(&h);
    let mut gestures = GestureNormalizer::default();
    let now = Instant::now();
    assert_eq!(
        gestures.process(GestureEvent::PointerDragStart(Point::new(1, 0)), &hits, now),
        GestureOutcome::Ignored
    );
    assert_eq!(
        gestures.process(GestureEvent::TouchStart(Point::new(1, 0)), &hits, now),
        GestureOutcome::Ignored
    );
    assert_eq!(hits.drop_target_at(Point::new(1, 0)), Some(DropTarget::ItemRow("A".into())));
}

#[test]
fn applied_drops_are_persisted_and_reload_identically() {
    let tmp = TempDir::new().unwrap();
    let kv = KvStore::open(tmp.path()).unwrap();
    let mut store = HierarchyStore::new(
        hierarchy(vec![("A", vec!["A1"]), ("B", vec!["B1"])]),
        Box::new(PersistSink::new(kv.clone(), "todos")),
    );
    let mut gestures = GestureNormalizer::default();
    drive(
        &mut store,
        &mut gestures,
        &[
            (GestureEvent::PointerDragStart(Point::new(10, 3)), ms(0)),
            (GestureEvent::PointerDrop(Point::new(10, 1)), ms(10)),
            (GestureEvent::PointerDragEnd, ms(10)),
        ],
    );
    let reloaded = load_hierarchy(&kv, "todos");
    assert_eq!(&reloaded, store.hierarchy());
    assert_eq!(
        summary(&reloaded),
        expect(vec![("A", vec!["A1", "B1"]), ("B", vec![])])
    );
}
