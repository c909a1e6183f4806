//! End-to-end behavior of the canvas editor through its public API.

use circuitdraft_core::{
    CanvasError, CanvasEvent, Editor, EditorConfig, InstanceId, PageId, ShapeTemplate,
    StaticCatalog, rotated_transform,
};
use kurbo::Point;

fn editor() -> Editor {
    Editor::new(EditorConfig::default(), StaticCatalog::circuit_symbols())
}

#[test]
fn test_add_then_get_returns_defaults() {
    let mut editor = editor();
    let page = editor.active_page().unwrap();

    for type_id in ["Resistor", "Capacitor", "Inductor"] {
        let id = editor.add_instance(type_id, page).unwrap();
        let instance = editor.get_instance(id).unwrap();
        assert_eq!(instance.type_id, type_id);
        assert_eq!(instance.page_id, page);
        assert_eq!(instance.position, Point::new(100.0, 100.0));
        assert_eq!(instance.rotation_degrees, 0);
    }
}

#[test]
fn test_unknown_type_leaves_store_unchanged() {
    let mut editor = editor();
    let page = editor.active_page().unwrap();

    let result = editor.add_instance("Transistor", page);
    assert_eq!(result, Err(CanvasError::UnknownShapeType("Transistor".to_string())));
    assert!(editor.store().is_empty());
}

#[test]
fn test_rotate_four_times_is_identity() {
    let mut editor = editor();
    let id = editor.add_to_active_page("Resistor").unwrap();
    editor.rotate(id).unwrap();
    let start = editor.get_instance(id).unwrap().rotation_degrees;

    for _ in 0..4 {
        editor.rotate(id).unwrap();
    }
    assert_eq!(editor.get_instance(id).unwrap().rotation_degrees, start);
}

#[test]
fn test_rotation_stays_in_range() {
    let mut editor = editor();
    let id = editor.add_to_active_page("Inductor").unwrap();

    for _ in 0..10 {
        let degrees = editor.rotate(id).unwrap();
        assert!(degrees < 360);
        assert_eq!(degrees % 90, 0);
    }
}

#[test]
fn test_list_by_page_grows_by_one() {
    let mut editor = editor();
    let p1 = editor.active_page().unwrap();
    let p2 = editor.add_page();
    editor.add_instance("Capacitor", p2).unwrap();

    let before = editor.list_by_page(p1).count();
    editor.add_instance("Resistor", p1).unwrap();

    let after: Vec<_> = editor.list_by_page(p1).collect();
    assert_eq!(after.len(), before + 1);
    assert!(after.iter().all(|s| s.page_id == p1));
}

#[test]
fn test_concurrent_drag_rejected() {
    let mut editor = editor();
    let a = editor.add_to_active_page("Resistor").unwrap();
    let b = editor.add_to_active_page("Capacitor").unwrap();

    editor.begin_drag(a, Point::new(100.0, 100.0)).unwrap();
    assert_eq!(
        editor.begin_drag(b, Point::new(110.0, 110.0)),
        Err(CanvasError::AlreadyDragging(a))
    );
    assert_eq!(editor.dragging(), Some(a));

    editor.update_drag(Point::new(200.0, 100.0));
    assert_eq!(editor.get_instance(a).unwrap().position, Point::new(200.0, 100.0));
    assert_eq!(editor.get_instance(b).unwrap().position, Point::new(100.0, 100.0));
}

#[test]
fn test_drag_keeps_grab_point() {
    let mut editor = editor();
    let id = editor.add_to_active_page("Resistor").unwrap();

    editor.begin_drag(id, Point::new(150.0, 150.0)).unwrap();
    assert_eq!(editor.update_drag(Point::new(160.0, 160.0)), Some(Point::new(110.0, 110.0)));
    assert_eq!(editor.update_drag(Point::new(150.0, 170.0)), Some(Point::new(100.0, 120.0)));
    editor.end_drag();

    // Moves after release are ignored.
    assert_eq!(editor.update_drag(Point::new(0.0, 0.0)), None);
    assert_eq!(editor.get_instance(id).unwrap().position, Point::new(100.0, 120.0));
}

#[test]
fn test_begin_drag_missing_instance() {
    let mut editor = editor();
    let missing = InstanceId::new();
    assert_eq!(
        editor.begin_drag(missing, Point::ZERO),
        Err(CanvasError::NotFound(missing))
    );
    assert_eq!(editor.dragging(), None);
}

#[test]
fn test_remove_missing_instance_is_noop() {
    let mut editor = editor();
    let id = editor.add_to_active_page("Resistor").unwrap();

    assert!(!editor.remove_instance(InstanceId::new()));
    assert_eq!(editor.store().len(), 1);
    assert!(editor.get_instance(id).is_ok());

    assert!(editor.remove_instance(id));
    assert!(!editor.remove_instance(id));
}

#[test]
fn test_set_active_page_unknown() {
    let mut editor = editor();
    let before = editor.active_page();

    assert!(matches!(
        editor.set_active_page(PageId::new()),
        Err(CanvasError::InvalidReference(_))
    ));
    assert_eq!(editor.active_page(), before);
}

#[test]
fn test_page_switch_scenario() {
    let mut editor = Editor::new(
        EditorConfig {
            create_initial_page: false,
            ..EditorConfig::default()
        },
        StaticCatalog::circuit_symbols(),
    );
    let rx = editor.subscribe();

    let p1 = editor.add_page();
    assert_eq!(editor.active_page(), Some(p1));
    let shape = editor.add_instance("Resistor", p1).unwrap();
    let p2 = editor.add_page();
    editor.set_active_page(p2).unwrap();

    assert!(editor.project().is_empty());
    let on_p1: Vec<_> = editor.list_by_page(p1).map(|s| s.id()).collect();
    assert_eq!(on_p1, vec![shape]);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.last(), Some(&CanvasEvent::ActivePageChanged(Some(p2))));

    editor.set_active_page(p1).unwrap();
    let visible: Vec<_> = editor.project().iter().map(|s| s.id()).collect();
    assert_eq!(visible, vec![shape]);
}

#[test]
fn test_projection_tracks_moves() {
    let mut editor = editor();
    let id = editor.add_to_active_page("Capacitor").unwrap();

    editor.begin_drag(id, Point::new(100.0, 100.0)).unwrap();
    editor.update_drag(Point::new(300.0, 250.0));

    let view = editor.project().to_vec();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].position, Point::new(300.0, 250.0));
}

#[test]
fn test_removing_last_page() {
    let mut editor = editor();
    let page = editor.active_page().unwrap();
    let id = editor.add_to_active_page("Resistor").unwrap();

    assert_eq!(editor.remove_page(page).unwrap(), vec![id]);
    assert_eq!(editor.active_page(), None);
    assert!(editor.store().is_empty());
    assert!(editor.project().is_empty());

    // Pages can be added again afterwards.
    let fresh = editor.add_page();
    assert_eq!(editor.active_page(), Some(fresh));
}

#[test]
fn test_no_instance_outlives_its_page() {
    let mut editor = editor();
    let p1 = editor.active_page().unwrap();
    let p2 = editor.add_page();
    let p3 = editor.add_page();
    for page in [p1, p2, p3] {
        editor.add_instance("Resistor", page).unwrap();
        editor.add_instance("Inductor", page).unwrap();
    }

    editor.remove_page(p2).unwrap();
    for instance in editor.store().iter() {
        assert!(editor.page_registry().contains(instance.page_id));
    }
    assert_eq!(editor.store().len(), 4);
}

#[test]
fn test_render_transform_for_rotated_instance() {
    let mut editor = editor();
    let id = editor.add_to_active_page("Resistor").unwrap();
    editor.rotate(id).unwrap();

    let transform = rotated_transform(editor.get_instance(id).unwrap());
    assert_eq!(transform.svg(), "rotate(90 130 110)");
}

#[test]
fn test_custom_catalog() {
    let mut catalog = StaticCatalog::new();
    catalog.register(ShapeTemplate::new("Diode", "#DiodeSymbol", 30.0, 20.0));
    let mut editor = Editor::new(EditorConfig::default(), catalog);

    let id = editor.add_to_active_page("Diode").unwrap();
    assert!((editor.get_instance(id).unwrap().width - 30.0).abs() < f64::EPSILON);
    assert!(matches!(
        editor.add_to_active_page("Resistor"),
        Err(CanvasError::UnknownShapeType(_))
    ));
}
