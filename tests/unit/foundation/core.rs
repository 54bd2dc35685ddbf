use super::*;
use serde_json::json;

#[test]
fn xy_and_index_are_inverses() {
    let d = Dimensions::MATRIX;
    for index in 0..d.len() {
        let (x, y) = d.to_xy(index);
        assert!(x < d.cols && y < d.rows);
        assert_eq!(d.to_index(x, y), index);
    }
}

#[test]
fn check_rejects_past_end() {
    let d = Dimensions::MATRIX;
    assert_eq!(d.len(), 4096);
    d.check(4095).unwrap();
    assert!(matches!(
        d.check(4096),
        Err(MatrixError::IndexOutOfRange {
            index: 4096,
            len: 4096
        })
    ));
}

#[test]
fn index_of_clips_signed_coordinates() {
    let d = Dimensions::new(4, 3).unwrap();
    assert_eq!(d.index_of(3, 2), Some(11));
    assert_eq!(d.index_of(-1, 0), None);
    assert_eq!(d.index_of(4, 0), None);
    assert_eq!(d.index_of(0, 3), None);
    assert!(Dimensions::new(0, 3).is_err());
}

#[test]
fn matrix_config_defaults_to_128_by_32() {
    let cfg: MatrixConfig = serde_json::from_value(json!({})).unwrap();
    assert_eq!(cfg, MatrixConfig::default());
    assert_eq!(cfg.dimensions().unwrap(), Dimensions::MATRIX);

    let cfg: MatrixConfig = serde_json::from_value(json!({"cols": 0})).unwrap();
    assert!(cfg.validate().is_err());
}

#[test]
fn matrix_config_caps_cell_count() {
    let huge = MatrixConfig {
        cols: u32::MAX,
        rows: u32::MAX,
    };
    assert!(matches!(huge.dimensions(), Err(MatrixError::Validation(_))));

    let over = MatrixConfig {
        cols: 2048,
        rows: 513,
    };
    assert!(over.validate().is_err());

    let max = MatrixConfig {
        cols: 2048,
        rows: 512,
    };
    assert_eq!(max.dimensions().unwrap().len(), MAX_MATRIX_CELLS);
}

#[test]
fn brush_brightness_bounds() {
    let brush = BrushConfig::default();
    brush.validate().unwrap();
    assert_eq!(brush.color.as_str(), "#ffffff");

    let brush: BrushConfig =
        serde_json::from_value(json!({"color": "#ff0000", "brightness": 1.5})).unwrap();
    assert!(brush.validate().is_err());
}
