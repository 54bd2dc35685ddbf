use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    assert_eq!(Color::parse("#ff0000").unwrap().rgb(), Rgb8::new(255, 0, 0));
    assert_eq!(Color::parse("#0f0").unwrap().rgb(), Rgb8::new(0, 255, 0));
    assert_eq!(
        Color::parse("#0000FF80").unwrap().rgb(),
        Rgb8::new(0, 0, 255)
    );
    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("#gg0000").is_err());
}

#[test]
fn hex_rejects_sign_prefixed_digits() {
    assert!(Color::parse("#+f+f+f").is_err());
    assert!(Color::parse("#+f0000").is_err());
    assert!(Color::parse("#ff0000+f").is_err());
    assert!(Color::parse("#ff0000zz").is_err());
}

#[test]
fn parses_css_rgb_from_import() {
    let c = Color::parse("rgb(12, 34, 56)").unwrap();
    assert_eq!(c.rgb(), Rgb8::new(12, 34, 56));
    assert_eq!(c.as_str(), "rgb(12, 34, 56)");

    let c = Color::parse("rgba(1, 2, 3, 0.5)").unwrap();
    assert_eq!(c.rgb(), Rgb8::new(1, 2, 3));

    assert!(Color::parse("rgb(1, 2)").is_err());
}

#[test]
fn area_hues_cycle_through_hsl_wheel() {
    assert_eq!(Color::area_hue(0).as_str(), "hsl(0, 100%, 50%)");
    assert_eq!(Color::area_hue(0).rgb(), Rgb8::new(255, 0, 0));
    assert_eq!(Color::area_hue(1).rgb(), Rgb8::new(255, 255, 0));
    assert_eq!(Color::area_hue(2).rgb(), Rgb8::new(0, 255, 0));
    assert_eq!(Color::area_hue(6).rgb(), Rgb8::new(255, 0, 0));
    assert_eq!(
        Color::parse("hsl(120, 100%, 50%)").unwrap().rgb(),
        Rgb8::new(0, 255, 0)
    );
}

#[test]
fn serde_keeps_authored_text() {
    let c: Color = serde_json::from_value(json!("rgb(1, 2, 3)")).unwrap();
    assert_eq!(serde_json::to_value(&c).unwrap(), json!("rgb(1, 2, 3)"));

    let bad: Result<Color, _> = serde_json::from_value(json!("chartreuse-ish"));
    assert!(bad.is_err());
}

#[test]
fn scaled_dims_channels() {
    assert_eq!(Rgb8::new(200, 100, 0).scaled(0.5), Rgb8::new(100, 50, 0));
    assert_eq!(Rgb8::new(200, 100, 0).scaled(2.0), Rgb8::new(200, 100, 0));
    assert!(Color::black().is_black());
    assert_eq!(Color::from_rgb(255, 255, 255), Color::white());
}
