mod common;

use common::{BLUE, RED, assert_close, png_dimensions, runtime, write_ppm, write_solid_ppm};
use image_convert_lib::{ConvertError, PathError};

#[test]
fn empty_handle_has_no_image() {
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime();
    let mut image = rt.acquire();

    assert!(!image.is_loaded());
    assert_eq!((image.width(), image.height(), image.bands()), (0, 0, 0));
    assert!(matches!(image.flip(), Err(ConvertError::Codec(_))));
    assert!(matches!(image.pixel(0, 0), Err(ConvertError::Codec(_))));

    let destination = dir.path().join("empty.png");
    assert!(matches!(image.write(&destination), Err(ConvertError::Codec(_))));
    assert!(!destination.exists());
}

#[test]
fn read_replaces_the_held_image() {
    let dir = tempfile::tempdir().unwrap();
    let small = dir.path().join("small.ppm");
    let large = dir.path().join("large.ppm");
    write_solid_ppm(&small, 2, 2, RED);
    write_solid_ppm(&large, 4, 3, BLUE);

    let mut rt = runtime();
    let mut image = rt.open(&small).unwrap();
    assert_eq!((image.width(), image.height(), image.bands()), (2, 2, 3));

    image.read(&large).unwrap();
    assert_eq!((image.width(), image.height()), (4, 3));
    assert_eq!(image.pixel(3, 2).unwrap(), vec![0.0, 0.0, 255.0]);
}

#[test]
fn reading_a_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime();
    let mut image = rt.acquire();

    assert!(matches!(
        image.read(dir.path()),
        Err(ConvertError::IO(PathError::NotFile(_)))
    ));
    assert!(!image.is_loaded());
}

#[test]
fn flop_mirrors_left_and_right() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("pair.ppm");
    write_ppm(&source, 2, 1, |x, _| if x == 0 { RED } else { BLUE });

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.flop().unwrap();

    assert_eq!(image.pixel(0, 0).unwrap(), vec![0.0, 0.0, 255.0]);
    assert_eq!(image.pixel(1, 0).unwrap(), vec![255.0, 0.0, 0.0]);
}

#[test]
fn flip_mirrors_top_and_bottom() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("stack.ppm");
    write_ppm(&source, 1, 2, |_, y| if y == 0 { RED } else { BLUE });

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.flip().unwrap();

    assert_eq!(image.pixel(0, 0).unwrap(), vec![0.0, 0.0, 255.0]);
    assert_eq!(image.pixel(0, 1).unwrap(), vec![255.0, 0.0, 0.0]);
}

#[test]
fn crop_keeps_the_requested_region() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("grid.ppm");
    write_ppm(&source, 4, 3, |x, y| if x == 2 && y == 1 { BLUE } else { RED });

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.crop(1, 1, 2, 2).unwrap();

    assert_eq!((image.width(), image.height()), (2, 2));
    assert_eq!(image.pixel(1, 0).unwrap(), vec![0.0, 0.0, 255.0]);
    assert_eq!(image.pixel(0, 0).unwrap(), vec![255.0, 0.0, 0.0]);
}

#[test]
fn crop_outside_the_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("grid.ppm");
    write_solid_ppm(&source, 4, 3, RED);

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();

    assert!(matches!(image.crop(3, 0, 2, 2), Err(ConvertError::Codec(_))));
    assert!(matches!(image.crop(0, 0, 0, 2), Err(ConvertError::Settings(_))));
    assert_eq!((image.width(), image.height()), (4, 3));
}

#[test]
fn resize_sets_exact_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("small.ppm");
    write_solid_ppm(&source, 4, 2, RED);

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.resize(8, 6).unwrap();

    assert_eq!((image.width(), image.height()), (8, 6));
}

#[test]
fn thumbnail_is_exactly_the_requested_box() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("wide.ppm");
    write_solid_ppm(&source, 40, 20, RED);

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.thumbnail(10, 10).unwrap();

    assert_eq!((image.width(), image.height()), (10, 10));
    assert!(matches!(image.thumbnail(10, 0), Err(ConvertError::Settings(_))));
}

#[test]
fn thumbnail_never_enlarges_a_small_image() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tiny.ppm");
    write_solid_ppm(&source, 4, 4, RED);

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.thumbnail(10, 10).unwrap();

    assert_eq!((image.width(), image.height(), image.bands()), (10, 10, 4));
    // The 4×4 source sits at (3, 3) on a transparent canvas.
    assert_eq!(image.pixel(5, 5).unwrap(), vec![255.0, 0.0, 0.0, 255.0]);
    assert_eq!(image.pixel(0, 0).unwrap(), vec![0.0, 0.0, 0.0, 0.0]);
    assert_eq!(image.pixel(9, 9).unwrap(), vec![0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn thumbnail_pads_only_the_short_side() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("strip.ppm");
    write_solid_ppm(&source, 40, 4, RED);

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.thumbnail(10, 10).unwrap();

    assert_eq!((image.width(), image.height()), (10, 10));
    assert_eq!(image.pixel(0, 5).unwrap(), vec![255.0, 0.0, 0.0, 255.0]);
    assert_eq!(image.pixel(0, 0).unwrap()[3], 0.0);
}

#[test]
fn right_angle_rotation_swaps_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("wide.ppm");
    write_solid_ppm(&source, 4, 2, RED);

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();

    image.rotate(90.0).unwrap();
    assert_eq!((image.width(), image.height()), (2, 4));

    image.rotate(-90.0).unwrap();
    assert_eq!((image.width(), image.height()), (4, 2));

    image.rotate(360.0).unwrap();
    assert_eq!((image.width(), image.height()), (4, 2));

    assert!(matches!(image.rotate(f64::NAN), Err(ConvertError::Settings(_))));
}

#[test]
fn blur_keeps_dimensions_and_rejects_bad_sigma() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("square.ppm");
    write_ppm(&source, 8, 8, |x, _| if x < 4 { RED } else { BLUE });

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.blur(1.5).unwrap();

    assert_eq!((image.width(), image.height()), (8, 8));
    assert!(matches!(image.blur(0.0), Err(ConvertError::Settings(_))));
    assert!(matches!(image.blur(-1.0), Err(ConvertError::Settings(_))));
}

#[test]
fn pixel_outside_the_image_fails() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tiny.ppm");
    write_solid_ppm(&source, 2, 2, RED);

    let mut rt = runtime();
    let image = rt.open(&source).unwrap();

    assert!(image.pixel(1, 1).is_ok());
    assert!(matches!(image.pixel(2, 0), Err(ConvertError::Codec(_))));
}

#[test]
fn quality_is_validated() {
    let mut rt = runtime();
    let mut image = rt.acquire();

    image.set_quality(50).unwrap();
    assert_eq!(image.quality(), 50);
    assert!(matches!(image.set_quality(0), Err(ConvertError::Settings(_))));
    assert!(matches!(image.set_quality(101), Err(ConvertError::Settings(_))));
    assert_eq!(image.quality(), 50);
}

#[test]
fn transformed_image_writes_through_any_format() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("photo.ppm");
    write_solid_ppm(&source, 12, 8, RED);

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.thumbnail(4, 4).unwrap();
    image.set_strip_metadata(true);

    for name in ["thumb.png", "thumb.jpg", "thumb.tif", "thumb.v"] {
        let destination = dir.path().join(name);
        image.write(&destination).unwrap();
        assert!(destination.exists(), "{name} was not written");
    }
    drop(image);

    let reread = rt.open(dir.path().join("thumb.v")).unwrap();
    assert_eq!((reread.width(), reread.height()), (4, 4));
}

#[test]
fn writing_back_over_the_source_keeps_the_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let ppm = dir.path().join("photo.ppm");
    let photo = dir.path().join("photo.png");
    write_solid_ppm(&ppm, 12, 8, RED);

    let mut rt = runtime();
    rt.open(&ppm).unwrap().write(&photo).unwrap();

    let mut image = rt.open(&photo).unwrap();
    image.thumbnail(4, 4).unwrap();
    image.write(&photo).unwrap();
    drop(image);

    assert_eq!(png_dimensions(&photo), (4, 4));

    // Read through a fresh name so the libvips operation cache cannot
    // answer with the earlier load.
    let copy = dir.path().join("photo-copy.png");
    std::fs::copy(&photo, &copy).unwrap();
    let reread = rt.open(&copy).unwrap();
    for (x, y) in [(0, 0), (3, 3), (1, 2)] {
        assert_close(&reread.pixel(x, y).unwrap(), RED, 1.0);
    }
}

#[test]
fn blank_fills_the_canvas_with_the_background_color() {
    let dir = tempfile::tempdir().unwrap();
    let mut rt = runtime();
    let mut image = rt.acquire();

    assert_eq!(image.background_color(), "#00000000");
    image.blank(2, 2).unwrap();
    assert_eq!(image.pixel(1, 1).unwrap(), vec![0.0, 0.0, 0.0, 0.0]);

    image.set_background_color("#00ff00").unwrap();
    assert!(matches!(
        image.set_background_color("green"),
        Err(ConvertError::Settings(_))
    ));
    assert_eq!(image.background_color(), "#00ff00");

    image.blank(3, 2).unwrap();
    assert_eq!((image.width(), image.height(), image.bands()), (3, 2, 4));
    assert_eq!(image.pixel(2, 1).unwrap(), vec![0.0, 255.0, 0.0, 255.0]);
    assert_eq!(image.metadata().unwrap()["interpretation"], "srgb");
    assert!(matches!(image.blank(0, 2), Err(ConvertError::Settings(_))));

    let destination = dir.path().join("blank.png");
    image.write(&destination).unwrap();
    assert_eq!(png_dimensions(&destination), (3, 2));
}

#[test]
fn chop_removes_columns_and_rows_and_closes_the_gap() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("cross.ppm");
    write_ppm(&source, 5, 4, |x, y| if x == 1 || x == 2 || y == 2 { BLUE } else { RED });

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();
    image.chop(1, 2, 2, 1).unwrap();

    assert_eq!((image.width(), image.height()), (3, 3));
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(image.pixel(x, y).unwrap(), vec![255.0, 0.0, 0.0], "at ({x}, {y})");
        }
    }

    image.chop(0, 0, 1, 0).unwrap();
    assert_eq!((image.width(), image.height()), (2, 3));
}

#[test]
fn chop_must_leave_part_of_the_image() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("grid.ppm");
    write_solid_ppm(&source, 3, 3, RED);

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();

    assert!(matches!(image.chop(0, 0, 0, 0), Err(ConvertError::Settings(_))));
    assert!(matches!(image.chop(0, 0, 3, 0), Err(ConvertError::Codec(_))));
    assert!(matches!(image.chop(2, 0, 2, 0), Err(ConvertError::Codec(_))));
    assert!(matches!(image.chop(0, 3, 0, 1), Err(ConvertError::Codec(_))));
    assert_eq!((image.width(), image.height()), (3, 3));
}

#[test]
fn metadata_reports_and_updates_header_fields() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("meta.ppm");
    write_solid_ppm(&source, 4, 3, RED);

    let mut rt = runtime();
    let mut image = rt.open(&source).unwrap();

    let fields = image.metadata().unwrap();
    assert_eq!(fields["width"], "4");
    assert_eq!(fields["height"], "3");
    assert_eq!(fields["bands"], "3");
    assert_eq!(fields["format"], "uchar");

    image.set_metadata("xres", "5").unwrap();
    image.set_metadata("yoffset", "2").unwrap();
    let fields = image.metadata().unwrap();
    assert_eq!(fields["xres"], "5");
    assert_eq!(fields["yoffset"], "2");
    assert_eq!(image.pixel(3, 2).unwrap(), vec![255.0, 0.0, 0.0]);

    assert!(matches!(image.set_metadata("width", "9"), Err(ConvertError::Settings(_))));
    assert!(matches!(image.set_metadata("xres", "-1"), Err(ConvertError::Settings(_))));
    assert_eq!((image.width(), image.height()), (4, 3));
    drop(image);

    let empty = rt.acquire();
    assert!(matches!(empty.metadata(), Err(ConvertError::Codec(_))));
}

#[test]
fn brightness_saturation_and_hue_work_in_lch() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("red.ppm");
    write_solid_ppm(&source, 2, 2, RED);

    let mut rt = runtime();

    let mut image = rt.open(&source).unwrap();
    image.set_brightness(-1.0).unwrap();
    assert_eq!(image.bands(), 3);
    assert_close(&image.pixel(0, 0).unwrap(), [0, 0, 0], 2.0);

    image.read(&source).unwrap();
    image.set_saturation(-1.0).unwrap();
    let grey = image.pixel(1, 1).unwrap();
    let spread = grey.iter().cloned().fold(f64::MIN, f64::max)
        - grey.iter().cloned().fold(f64::MAX, f64::min);
    assert!(spread <= 3.0, "not grey: {grey:?}");

    image.read(&source).unwrap();
    image.set_hue(1.0).unwrap();
    let turned = image.pixel(0, 1).unwrap();
    assert!(turned[2] > turned[0], "hue did not move away from red: {turned:?}");

    image.read(&source).unwrap();
    image.set_brightness(1.0).unwrap();
    let brightest = image.pixel(0, 0).unwrap();
    image.read(&source).unwrap();
    image.set_brightness(7.0).unwrap();
    assert_eq!(image.pixel(0, 0).unwrap(), brightest);

    assert!(matches!(image.set_hue(f64::NAN), Err(ConvertError::Settings(_))));
}
