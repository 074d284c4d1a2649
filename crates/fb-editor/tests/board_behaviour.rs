//! Integration tests: board engine (fb-editor ↔ fb-core).
//!
//! Drives the engine through gestures and save/load cycles, checking card
//! geometry, connection lines on the surface, and the stored record.

use fb_core::{BlobStore, BoardConfig, MemoryStore, MemorySurface, NodeId, Point, Size};
use fb_editor::{BoardEngine, GestureEvent, LoadReport};
use pretty_assertions::assert_eq;

type Engine = BoardEngine<MemorySurface>;

fn engine() -> Engine {
    BoardEngine::default()
}

fn center(e: &Engine, id: NodeId) -> Point {
    let card = e.cards().get(id).expect("card is live");
    let size = e.config().card_size;
    Point::new(
        card.position.x + size.width / 2.0,
        card.position.y + size.height / 2.0,
    )
}

/// Position, front and back text of every card in board order.
fn snapshot(e: &Engine) -> Vec<(Point, String, String)> {
    e.cards()
        .iter()
        .map(|c| (c.position, c.front_text.clone(), c.back_text.clone()))
        .collect()
}

/// Connections as board-order index pairs.
fn link_indices(e: &Engine) -> Vec<(usize, usize)> {
    let ids = e.cards().ids();
    let at = |id: NodeId| ids.iter().position(|x| *x == id).expect("endpoint is live");
    e.connections()
        .list()
        .iter()
        .map(|c| (at(c.start), at(c.end)))
        .collect()
}

// ─── Round-trip ─────────────────────────────────────────────────────────

#[test]
fn save_load_round_trip() {
    let mut e = engine();
    let a = e.add_card("sun", "star");
    let b = e.add_card("moon", "satellite");
    let c = e.add_card("", "");
    e.move_card(a, 40.0, 80.0);
    e.move_card(b, 300.5, 10.0);
    e.move_card(c, 0.0, 640.0);
    e.connect(a, b);
    e.connect(a, b);
    e.connect(c, c);
    e.connect(b, a);

    let mut store = MemoryStore::new();
    let summary = e.save(&mut store).unwrap();
    assert_eq!((summary.cards, summary.connections), (3, 4));

    let mut fresh = engine();
    let report = fresh.load(&store);
    assert_eq!(
        report,
        LoadReport {
            cards: 3,
            connections: 4,
            dropped: 0,
        }
    );
    assert_eq!(snapshot(&fresh), snapshot(&e));
    assert_eq!(link_indices(&fresh), vec![(0, 1), (0, 1), (2, 2), (1, 0)]);
    assert_eq!(fresh.surface().live_lines(), 4);
}

#[test]
fn round_trip_after_deleting_a_middle_card() {
    let mut e = engine();
    let a = e.add_card("a", "");
    let b = e.add_card("b", "");
    let c = e.add_card("c", "");
    e.connect(a, c);
    e.connect(a, b);
    e.delete_card(b);

    let mut store = MemoryStore::new();
    e.save(&mut store).unwrap();

    let mut fresh = engine();
    fresh.load(&store);
    assert_eq!(fresh.cards().len(), 2);
    assert_eq!(link_indices(&fresh), vec![(0, 1)]);
}

#[test]
fn loaded_cards_start_on_front_face() {
    let mut e = engine();
    let a = e.add_card("q", "a");
    e.flip(a);

    let mut store = MemoryStore::new();
    e.save(&mut store).unwrap();
    let mut fresh = engine();
    fresh.load(&store);
    assert!(fresh.cards().iter().all(|c| c.face == fb_core::Face::Front));
}

#[test]
fn save_overwrites_previous_value() {
    let mut e = engine();
    e.add_card("one", "");
    let mut store = MemoryStore::new();
    e.save(&mut store).unwrap();

    e.clear_all();
    e.save(&mut store).unwrap();

    let mut fresh = engine();
    assert_eq!(fresh.load(&store).cards, 0);
}

// ─── Dangling connections ───────────────────────────────────────────────

#[test]
fn dangling_connection_is_dropped_silently() {
    let store = MemoryStore::with_value(
        "flashcardsData",
        r#"{"flashcards":[{"x":"0px","y":"0px","frontText":"","backText":"","id":0},
                          {"x":"0px","y":"0px","frontText":"","backText":"","id":1}],
            "connections":[{"startId":0,"endId":1},{"startId":1,"endId":5}]}"#,
    );
    let mut e = engine();
    let report = e.try_load(&store).unwrap();
    assert_eq!(report.connections, 1);
    assert_eq!(report.dropped, 1);
    assert_eq!(e.surface().live_lines(), 1);
}

#[test]
fn null_endpoint_drops_only_that_connection() {
    let store = MemoryStore::with_value(
        "flashcardsData",
        r#"{"flashcards":[{"x":"0px","y":"0px","frontText":"","backText":"","id":0},
                          {"x":"0px","y":"0px","frontText":"","backText":"","id":1}],
            "connections":[{"startId":0,"endId":1},{"startId":null,"endId":1}]}"#,
    );
    let mut e = engine();
    assert_eq!(
        e.load(&store),
        LoadReport {
            cards: 2,
            connections: 1,
            dropped: 1,
        }
    );
    assert_eq!(link_indices(&e), vec![(0, 1)]);
}

#[test]
fn null_connection_list_keeps_the_cards() {
    let store = MemoryStore::with_value(
        "flashcardsData",
        r#"{"flashcards":[{"x":"5px","y":"5px","frontText":"kept","backText":"","id":0}],
            "connections":null}"#,
    );
    let mut e = engine();
    assert_eq!(e.load(&store).cards, 1);
    assert!(e.connections().is_empty());
}

#[test]
fn legacy_fixture_loads() {
    let store = MemoryStore::with_value(
        "flashcardsData",
        include_str!("fixtures/legacy_board.json"),
    );
    let mut e = engine();
    let report = e.load(&store);
    assert_eq!(
        report,
        LoadReport {
            cards: 3,
            connections: 3,
            dropped: 1,
        }
    );
    assert_eq!(link_indices(&e), vec![(0, 1), (1, 2), (2, 2)]);
}

// ─── Cascade delete ─────────────────────────────────────────────────────

#[test]
fn deleting_a_hub_removes_its_connections_and_lines() {
    let mut e = engine();
    let a = e.add_card("A", "");
    let b = e.add_card("B", "");
    let c = e.add_card("C", "");
    e.connect(a, b);
    e.connect(b, c);
    assert_eq!(e.surface().live_lines(), 2);

    assert!(e.delete_card(b));
    assert!(e.connections().is_empty());
    assert_eq!(e.surface().live_lines(), 0);
    assert_eq!(e.surface().removed_count(), 2);

    assert!(!e.delete_card(b));
}

// ─── Drag consistency ───────────────────────────────────────────────────

#[test]
fn line_follows_card_through_a_drag() {
    let mut e = engine();
    let a = e.add_card("", "");
    let b = e.add_card("", "");
    e.move_card(b, 500.0, 300.0);
    let link = e.connect(a, b).unwrap();
    let line_id = e.connections().get(link).unwrap().line;

    assert!(e.handle(&GestureEvent::PointerDown {
        card: a,
        x: 20.0,
        y: 30.0,
    }));
    for (x, y) in [(25.0, 30.0), (120.0, 90.0), (260.5, 400.0), (10.0, 10.0)] {
        assert!(e.handle(&GestureEvent::PointerMove { x, y }));
        let line = e.surface().line(line_id).unwrap();
        assert_eq!(line.p0, center(&e, a));
        assert_eq!(line.p1, center(&e, b));
    }
    assert!(e.handle(&GestureEvent::PointerUp { x: 10.0, y: 10.0 }));

    // The last move asked for (-10, -20), which clamps to the origin.
    assert_eq!(e.cards().get(a).unwrap().position, Point::new(0.0, 0.0));
    assert!(!e.handle(&GestureEvent::PointerMove { x: 300.0, y: 300.0 }));
}

#[test]
fn drag_position_keeps_grab_offset() {
    let mut e = engine();
    let a = e.add_card("", "");
    e.move_card(a, 100.0, 100.0);
    e.pointer_down(a, 150.0, 120.0);
    e.pointer_move(260.5, 400.0);
    assert_eq!(e.cards().get(a).unwrap().position, Point::new(210.5, 380.0));
}

#[test]
fn both_ends_of_a_self_loop_follow_the_card() {
    let mut e = engine();
    let a = e.add_card("", "");
    let link = e.connect(a, a).unwrap();
    e.move_card(a, 70.0, 90.0);
    let line = e.surface().line(e.connections().get(link).unwrap().line).unwrap();
    assert_eq!(line.p0, center(&e, a));
    assert_eq!(line.p1, center(&e, a));
}

// ─── Clamping ───────────────────────────────────────────────────────────

#[test]
fn dragging_past_the_origin_clamps() {
    let mut e = engine();
    let a = e.add_card("", "");
    e.pointer_down(a, 50.0, 50.0);
    e.pointer_move(-400.0, 20.0);
    let pos = e.cards().get(a).unwrap().position;
    assert_eq!(pos, Point::new(0.0, 0.0));

    e.pointer_move(10.0, -3.0);
    assert_eq!(e.cards().get(a).unwrap().position, Point::new(0.0, 0.0));

    e.pointer_move(500.0, 60.0);
    assert_eq!(e.cards().get(a).unwrap().position, Point::new(450.0, 10.0));
}

#[test]
fn infinite_position_still_saves_a_loadable_board() {
    let mut e = engine();
    let a = e.add_card("far", "");
    e.move_card(a, f64::INFINITY, 40.0);
    assert_eq!(e.cards().get(a).unwrap().position, Point::new(0.0, 40.0));

    let mut store = MemoryStore::new();
    e.save(&mut store).unwrap();
    let mut fresh = engine();
    assert!(fresh.try_load(&store).is_ok());
    assert_eq!(snapshot(&fresh), snapshot(&e));
}

// ─── Clear ──────────────────────────────────────────────────────────────

#[test]
fn clear_all_twice_is_a_no_op() {
    let mut e = engine();
    let a = e.add_card("", "");
    let b = e.add_card("", "");
    e.connect(a, b);

    assert!(e.clear_all());
    assert!(!e.clear_all());
    assert!(e.cards().is_empty());
    assert!(e.connections().is_empty());
    assert_eq!(e.surface().live_lines(), 0);
}

// ─── Empty and broken stores ────────────────────────────────────────────

#[test]
fn empty_store_loads_empty_board() {
    let mut e = engine();
    assert_eq!(e.load(&MemoryStore::new()), LoadReport::default());
    assert!(e.cards().is_empty());
    assert!(e.connections().is_empty());
}

#[test]
fn unparseable_value_loads_empty_board() {
    let store = MemoryStore::with_value("flashcardsData", "{{{ not json");
    let mut e = engine();
    e.add_card("stale", "");
    assert_eq!(e.load(&store), LoadReport::default());
    assert!(e.cards().is_empty());
}

#[test]
fn failed_try_load_leaves_board_untouched() {
    let store = MemoryStore::with_value(
        "flashcardsData",
        r#"{"flashcards":[{"id":0,"x":"oops","y":"0px"}]}"#,
    );
    let mut e = engine();
    e.add_card("keep me", "");
    assert!(e.try_load(&store).is_err());
    assert_eq!(e.cards().len(), 1);
}

#[test]
fn load_replaces_current_board() {
    let mut source = engine();
    source.add_card("saved", "");
    let mut store = MemoryStore::new();
    source.save(&mut store).unwrap();

    let mut e = engine();
    let x = e.add_card("unsaved", "");
    let y = e.add_card("unsaved", "");
    e.connect(x, y);
    e.load(&store);
    assert_eq!(e.cards().len(), 1);
    assert_eq!(e.surface().live_lines(), 0);
}

// ─── Linking gesture ────────────────────────────────────────────────────

#[test]
fn double_activation_links_pairs() {
    let mut e = engine();
    let a = e.add_card("", "");
    let b = e.add_card("", "");

    assert!(!e.handle(&GestureEvent::DoubleActivate { card: a }));
    assert!(e.handle(&GestureEvent::DoubleActivate { card: b }));
    assert!(!e.handle(&GestureEvent::DoubleActivate { card: a }));
    assert!(e.handle(&GestureEvent::DoubleActivate { card: a }));

    assert_eq!(link_indices(&e), vec![(0, 1), (0, 0)]);
}

// ─── Configuration ──────────────────────────────────────────────────────

#[test]
fn custom_key_and_card_size() {
    let config = BoardConfig {
        card_size: Size::new(100.0, 40.0),
        spawn_position: Point::new(30.0, 30.0),
        storage_key: "deck-2".into(),
    };
    let mut e = BoardEngine::new(config, MemorySurface::new());
    let a = e.add_card("", "");
    assert_eq!(e.anchor(a), Some(Point::new(80.0, 50.0)));

    let mut store = MemoryStore::new();
    e.save(&mut store).unwrap();
    assert!(store.get("deck-2").is_some());
    assert!(store.get("flashcardsData").is_none());
}
