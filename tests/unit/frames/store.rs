use super::*;
use crate::foundation::color::Color;

fn store_with_area(cols: usize, rows: usize) -> FrameStore {
    let mut s = FrameStore::new();
    s.init_area("area1", Dimensions::new(cols, rows).unwrap());
    s
}

#[test]
fn add_frame_sizes_to_area_and_numbers_from_one() {
    let mut s = store_with_area(4, 3);
    let f = s.add_frame("area1").unwrap();
    assert_eq!(f.id(), 1);
    assert_eq!(f.pixels().len(), 12);
    assert!(f.pixels().iter().all(|c| *c == Cell::blank()));
    assert_eq!(s.add_frame("area1").unwrap().id(), 2);
    assert!(matches!(
        s.add_frame("nope"),
        Err(MatrixError::UnknownArea(_))
    ));
}

#[test]
fn ids_are_never_reused_after_delete() {
    let mut s = store_with_area(2, 2);
    s.add_frame("area1").unwrap();
    s.add_frame("area1").unwrap();
    let removed = s.delete_frame("area1", 0).unwrap();
    assert_eq!(removed.id(), 1);

    assert_eq!(s.frames("area1").unwrap()[0].id(), 2);
    assert_eq!(s.add_frame("area1").unwrap().id(), 3);
    assert!(matches!(
        s.delete_frame("area1", 5),
        Err(MatrixError::FrameOutOfRange { index: 5, len: 2, .. })
    ));
}

#[test]
fn save_frame_replaces_buffer_or_rejects_wrong_size() {
    let mut s = store_with_area(2, 2);
    s.add_frame("area1").unwrap();

    let short = vec![Cell::new(Color::white(), 1.0); 3];
    assert!(matches!(
        s.save_frame("area1", 0, short),
        Err(MatrixError::SizeMismatch {
            expected: 4,
            actual: 3,
            ..
        })
    ));
    assert!(s.frame("area1", 0).unwrap().pixels().iter().all(|c| *c == Cell::blank()));

    let full = vec![Cell::new(Color::white(), 0.5); 4];
    s.save_frame("area1", 0, full.clone()).unwrap();
    assert_eq!(s.frame("area1", 0).unwrap().pixels(), full.as_slice());
    assert!(s.save_frame("area1", 1, full).is_err());
}

#[test]
fn rename_and_remove_area_rekey_frames() {
    let mut s = store_with_area(2, 2);
    s.init_area("other", Dimensions::new(1, 1).unwrap());
    s.add_frame("area1").unwrap();

    assert!(s.rename_area("area1", "other").is_err());
    s.rename_area("area1", "eyes").unwrap();
    assert!(!s.contains_area("area1"));
    assert_eq!(s.frames("eyes").unwrap().len(), 1);
    assert_eq!(s.area_names().collect::<Vec<_>>(), vec!["eyes", "other"]);

    assert!(s.remove_area("eyes"));
    assert!(!s.remove_area("eyes"));
    assert!(s.frames("eyes").is_err());
}

#[test]
fn restore_frame_resumes_id_counter() {
    let mut s = store_with_area(1, 2);
    s.restore_frame("area1", 7, vec![Cell::blank(); 2]).unwrap();
    assert!(s.restore_frame("area1", 7, vec![Cell::blank(); 2]).is_err());
    assert!(s.restore_frame("area1", 8, vec![Cell::blank(); 3]).is_err());
    assert_eq!(s.add_frame("area1").unwrap().id(), 8);
}

#[test]
fn frame_ids_never_overflow() {
    let mut s = store_with_area(1, 1);
    assert!(matches!(
        s.restore_frame("area1", u32::MAX, vec![Cell::blank()]),
        Err(MatrixError::Validation(_))
    ));
    assert!(s.frames("area1").unwrap().is_empty());

    s.restore_frame("area1", u32::MAX - 1, vec![Cell::blank()]).unwrap();
    assert!(matches!(s.add_frame("area1"), Err(MatrixError::Validation(_))));
    assert_eq!(s.frames("area1").unwrap().len(), 1);
}

#[test]
fn edit_frame_copies_buffer() {
    let mut s = store_with_area(3, 1);
    s.add_frame("area1").unwrap();
    let mut editor = s.edit_frame("area1", 0).unwrap();
    editor.paint(0, &Color::white(), 1.0).unwrap();
    assert_eq!(s.frame("area1", 0).unwrap().pixels()[0], Cell::blank());
    assert!(s.edit_frame("area1", 1).is_err());
}
