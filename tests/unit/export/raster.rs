use super::*;
use crate::foundation::color::Color;

#[test]
fn raster_matches_grid_dimensions_and_colors() {
    let mut grid = PixelGrid::matrix();
    grid.paint(grid.to_index(5, 1), &Color::parse("#c86400").unwrap(), 0.5)
        .unwrap();

    let img = to_raster(&grid, RasterStyle::Raw);
    assert_eq!(img.dimensions(), (128, 32));
    assert_eq!(img.get_pixel(5, 1).0, [200, 100, 0]);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);

    let img = to_raster(&grid, RasterStyle::Dimmed);
    assert_eq!(img.get_pixel(5, 1).0, [100, 50, 0]);
}

#[test]
fn encoded_png_decodes_back_to_same_pixels() {
    let mut grid = PixelGrid::matrix();
    grid.paint(127, &Color::white(), 1.0).unwrap();

    let bytes = encode_raster(&grid, RasterFormat::Png, RasterStyle::Raw).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (128, 32));
    assert_eq!(decoded.get_pixel(127, 0).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(126, 0).0, [0, 0, 0]);
}

#[test]
fn jpeg_and_bmp_encode() {
    let grid = PixelGrid::matrix();
    for format in [RasterFormat::Jpeg, RasterFormat::Bmp] {
        let bytes = encode_raster(&grid, format, RasterStyle::Raw).unwrap();
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            format.image_format()
        );
    }
}

#[test]
fn format_names_and_parsing() {
    assert_eq!(RasterFormat::Png.file_name(), "matrix_image.png");
    assert_eq!(RasterFormat::Jpeg.file_name(), "matrix_image.jpeg");
    assert_eq!("JPG".parse::<RasterFormat>().unwrap(), RasterFormat::Jpeg);
    assert!("gif".parse::<RasterFormat>().is_err());
}
