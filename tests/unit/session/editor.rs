use super::*;
use crate::foundation::core::Dimensions;

fn idx(x: usize, y: usize) -> usize {
    Dimensions::MATRIX.to_index(x, y)
}

fn session_with_area(tl: (usize, usize), br: (usize, usize)) -> EditorSession {
    let mut s = EditorSession::default();
    s.set_tool(Tool::SelectArea).unwrap();
    assert_eq!(
        s.drag_start(idx(tl.0, tl.1)).unwrap(),
        GestureOutcome::TopLeftSelected(idx(tl.0, tl.1))
    );
    assert_eq!(
        s.drag_start(idx(br.0, br.1)).unwrap(),
        GestureOutcome::AreaCreated("area1".to_owned())
    );
    s
}

#[test]
fn mirrored_paint_writes_both_halves() {
    let mut s = EditorSession::default();
    s.set_color(Color::parse("#ff0000").unwrap());
    s.set_mirror(true);

    let out = s.drag_start(idx(5, 0)).unwrap();
    assert_eq!(out, GestureOutcome::Painted(vec![idx(5, 0), idx(122, 0)]));
    s.drag_end();

    assert_eq!(s.grid().cell_at(5, 0).unwrap().color.as_str(), "#ff0000");
    assert_eq!(s.grid().cell_at(122, 0).unwrap().color.as_str(), "#ff0000");
}

#[test]
fn drag_move_only_paints_while_dragging() {
    let mut s = EditorSession::default();
    s.set_brightness(0.4).unwrap();
    assert_eq!(s.drag_move(0).unwrap(), GestureOutcome::Ignored);

    s.drag_start(1).unwrap();
    assert!(s.is_dragging());
    s.drag_move(2).unwrap();
    s.drag_end();
    assert!(!s.is_dragging());
    assert_eq!(s.drag_move(3).unwrap(), GestureOutcome::Ignored);

    assert_eq!(s.grid().cell(0).unwrap(), &Cell::blank());
    assert_eq!(s.grid().cell(2).unwrap(), &Cell::new(Color::white(), 0.4));
    assert_eq!(s.grid().cell(3).unwrap(), &Cell::blank());
}

#[test]
fn erase_and_color_change() {
    let mut s = EditorSession::default();
    s.drag_start(0).unwrap();
    s.drag_end();
    assert!(s.toggle_erase().unwrap());
    s.drag_start(0).unwrap();
    s.drag_end();
    assert_eq!(s.grid().cell(0).unwrap(), &Cell::blank());

    s.set_color(Color::parse("#00ff00").unwrap());
    assert_eq!(s.tool(), Tool::Paint);
}

#[test]
fn brightness_is_validated() {
    let mut s = EditorSession::default();
    assert!(matches!(s.set_brightness(1.5), Err(MatrixError::Validation(_))));
    assert_eq!(s.brush().brightness, 1.0);
}

#[test]
fn shape_stamp_uses_full_brightness_and_keeps_membership() {
    let mut s = session_with_area((0, 0), (9, 9));
    s.set_brightness(0.2).unwrap();
    s.set_tool(Tool::Shape {
        kind: ShapeKind::Rectangle,
        options: ShapeOptions {
            width: 4,
            height: 3,
            ..ShapeOptions::default()
        },
    })
    .unwrap();

    let GestureOutcome::Painted(cells) = s.drag_start(idx(8, 8)).unwrap() else {
        panic!("shape should paint");
    };
    assert_eq!(cells.len(), 12);
    assert!(!s.is_dragging());
    for &i in &cells {
        assert_eq!(s.grid().cell(i).unwrap(), &Cell::new(Color::white(), 1.0));
    }
    assert_eq!(s.areas().membership(idx(9, 9)).unwrap().area.name, "area1");
    assert!(s.areas().membership(idx(10, 9)).is_none());
}

#[test]
fn area_selection_creates_frame_list() {
    let s = session_with_area((2, 2), (5, 5));
    assert_eq!(s.tool(), Tool::Paint);
    assert_eq!(s.areas().len(), 1);
    assert_eq!(
        s.frames().area_dims("area1").unwrap(),
        Dimensions { cols: 4, rows: 4 }
    );
    assert!(s.frames().frames("area1").unwrap().is_empty());
}

#[test]
fn pending_selection_blocks_unrelated_operations() {
    let mut s = EditorSession::default();
    s.set_tool(Tool::SelectArea).unwrap();
    s.drag_start(idx(10, 10)).unwrap();

    assert!(matches!(
        s.set_tool(Tool::Paint),
        Err(MatrixError::SelectionInProgress)
    ));
    assert!(matches!(
        s.draw_shape(ShapeKind::Star, idx(50, 10), &ShapeOptions::default()),
        Err(MatrixError::SelectionInProgress)
    ));
    assert!(matches!(
        s.import_cells(&vec![Cell::blank(); 4096]),
        Err(MatrixError::SelectionInProgress)
    ));

    s.cancel_selection();
    assert_eq!(s.tool(), Tool::Paint);
    assert_eq!(s.areas().selection(), SelectionState::Idle);
    s.set_tool(Tool::Erase).unwrap();
}

#[test]
fn rejected_bottom_right_keeps_waiting() {
    let mut s = EditorSession::default();
    s.set_tool(Tool::SelectArea).unwrap();
    s.drag_start(idx(5, 5)).unwrap();
    assert!(matches!(
        s.drag_start(idx(2, 2)),
        Err(MatrixError::InvalidAreaSelection(_))
    ));
    assert!(s.areas().selection().in_progress());

    assert_eq!(
        s.drag_start(idx(6, 6)).unwrap(),
        GestureOutcome::AreaCreated("area1".to_owned())
    );
}

#[test]
fn rename_and_delete_cascade_to_frames() {
    let mut s = session_with_area((0, 0), (3, 1));
    s.add_frame("area1").unwrap();

    s.rename_area(0, "eyes").unwrap();
    assert!(s.areas().area("eyes").is_some());
    assert_eq!(s.frames().frames("eyes").unwrap().len(), 1);
    assert!(!s.frames().contains_area("area1"));

    s.drag_start(idx(1, 1)).unwrap();
    s.drag_end();
    s.delete_area(0).unwrap();
    assert!(s.areas().is_empty());
    assert!(!s.frames().contains_area("eyes"));
    assert!(s.areas().membership(idx(1, 1)).is_none());
    assert_eq!(s.grid().cell_at(1, 1).unwrap().color, Color::white());
}

#[test]
fn frame_edit_commit_round_trip() {
    let mut s = session_with_area((0, 0), (3, 1));
    s.add_frame("area1").unwrap();
    s.set_color(Color::parse("#0000ff").unwrap());

    let mut editor = s.edit_frame("area1", 0).unwrap();
    editor.drag_start(5).unwrap();
    editor.drag_end();
    s.commit_frame(editor).unwrap();

    let frame = s.frames().frame("area1", 0).unwrap();
    assert_eq!(frame.pixels()[5].color.as_str(), "#0000ff");
    // The main canvas is untouched by frame edits.
    assert!(s.grid().cells().iter().all(|c| c == &Cell::blank()));

    s.delete_frame("area1", 0).unwrap();
    assert!(matches!(
        s.delete_frame("area1", 0),
        Err(MatrixError::FrameOutOfRange { .. })
    ));
}

#[test]
fn clear_resets_everything() {
    let mut s = session_with_area((0, 0), (3, 3));
    s.add_frame("area1").unwrap();
    s.drag_start(0).unwrap();
    s.drag_end();

    s.clear();
    assert!(s.grid().cells().iter().all(|c| c == &Cell::blank()));
    assert!(s.areas().is_empty());
    assert_eq!(s.frames().area_names().count(), 0);
}

#[test]
fn json_export_reload_restores_state() {
    let mut s = session_with_area((2, 2), (5, 5));
    s.add_frame("area1").unwrap();
    s.drag_start(idx(3, 3)).unwrap();
    s.drag_end();

    let text = s.export_json().unwrap();
    let mut restored = EditorSession::default();
    restored.load_json(&text).unwrap();

    assert_eq!(restored.grid(), s.grid());
    assert_eq!(restored.areas().areas(), s.areas().areas());
    assert_eq!(restored.frames(), s.frames());
}

#[test]
fn import_rejects_wrong_length() {
    let mut s = EditorSession::default();
    assert!(matches!(
        s.import_cells(&[Cell::blank()]),
        Err(MatrixError::SizeMismatch { .. })
    ));

    let cells = vec![Cell::new(Color::css_rgb(1, 2, 3), 0.5); 4096];
    s.import_cells(&cells).unwrap();
    assert_eq!(s.grid().cells(), cells.as_slice());
}

#[test]
fn raster_export_is_png() {
    let s = EditorSession::default();
    let bytes = s.export_raster(RasterFormat::Png, RasterStyle::Raw).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
}

#[test]
fn custom_dimensions_from_config() {
    let s = EditorSession::new(&MatrixConfig { cols: 8, rows: 4 }).unwrap();
    assert_eq!(s.grid().len(), 32);
    assert!(EditorSession::new(&MatrixConfig { cols: 0, rows: 4 }).is_err());
    let huge = MatrixConfig {
        cols: u32::MAX,
        rows: u32::MAX,
    };
    assert!(matches!(EditorSession::new(&huge), Err(MatrixError::Validation(_))));
}
