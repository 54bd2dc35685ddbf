use super::*;

#[test]
fn mirror_is_involutive_and_in_range() {
    let d = Dimensions::MATRIX;
    for index in 0..d.len() {
        let m = mirror_index(d, index).unwrap();
        assert!(d.contains(m));
        assert_eq!(mirror_index(d, m).unwrap(), index);
    }
}

#[test]
fn mirror_reflects_column_and_keeps_row() {
    let d = Dimensions::MATRIX;
    assert_eq!(mirror_index(d, d.to_index(5, 0)).unwrap(), d.to_index(122, 0));
    assert_eq!(mirror_index(d, d.to_index(0, 31)).unwrap(), d.to_index(127, 31));
}

#[test]
fn mirror_uses_buffer_width_not_matrix_width() {
    let frame = Dimensions::new(4, 4).unwrap();
    assert_eq!(mirror_index(frame, frame.to_index(0, 2)).unwrap(), frame.to_index(3, 2));

    let odd = Dimensions::new(5, 1).unwrap();
    assert_eq!(mirror_index(odd, 2).unwrap(), 2);
}

#[test]
fn mirror_rejects_out_of_range() {
    assert!(mirror_index(Dimensions::MATRIX, 4096).is_err());
}
