use zenpick::{
    compute_display_size, map_display_to_original, ColorPicker, Dimensions, DistanceMetric,
    ErrorKind, ImgVec, Palette, PaletteEntry, PickError, PickerConfig,
};

fn entry(name: &str, r: u8, g: u8, b: u8) -> PaletteEntry {
    PaletteEntry::new(name, rgb::RGB8::new(r, g, b))
}

#[test]
fn smoke_test_resolve() {
    let palette = Palette::from_csv(
        "black,#000000,0,0,0\n\
         white,#ffffff,255,255,255\n\
         red,#ff0000,255,0,0\n",
    )
    .unwrap();

    assert_eq!(palette.len(), 3);
    let q = rgb::RGB8::new(200, 30, 20);
    assert_eq!(palette.nearest_name(q, DistanceMetric::Euclidean), "red");
    assert_eq!(palette.nearest_name(q, DistanceMetric::Manhattan), "red");
}

#[test]
fn both_metrics_agree_near_origin() {
    let palette = Palette::new(vec![entry("origin", 0, 0, 0), entry("far", 3, 4, 0)]).unwrap();
    let q = rgb::RGB8::new(0, 0, 1);

    let e = palette.nearest(q, DistanceMetric::Euclidean);
    assert_eq!(e.name, "origin");
    assert_eq!(DistanceMetric::Euclidean.distance(q, e.rgb), 1.0);
    let far = DistanceMetric::Euclidean.distance(q, rgb::RGB8::new(3, 4, 0));
    assert!((far - 26f64.sqrt()).abs() < 1e-9);

    let m = palette.nearest(q, DistanceMetric::Manhattan);
    assert_eq!(m.name, "origin");
    assert_eq!(DistanceMetric::Manhattan.distance(q, rgb::RGB8::new(3, 4, 0)), 8.0);
}

#[test]
fn metric_choice_changes_the_answer() {
    // Euclidean: 75 vs 81 squared. Manhattan: 15 vs 9.
    let palette = Palette::new(vec![entry("spread", 5, 5, 5), entry("axis", 9, 0, 0)]).unwrap();
    let q = rgb::RGB8::new(0, 0, 0);
    assert_eq!(palette.nearest_name(q, DistanceMetric::Euclidean), "spread");
    assert_eq!(palette.nearest_name(q, DistanceMetric::Manhattan), "axis");
}

#[test]
fn identical_rgb_first_name_wins() {
    let palette = Palette::new(vec![
        entry("other", 1, 2, 3),
        entry("first", 40, 50, 60),
        entry("second", 40, 50, 60),
    ])
    .unwrap();
    let q = rgb::RGB8::new(40, 50, 60);
    for _ in 0..10 {
        assert_eq!(palette.nearest_name(q, DistanceMetric::Euclidean), "first");
        assert_eq!(palette.nearest_name(q, DistanceMetric::Manhattan), "first");
    }
}

#[test]
fn error_empty_palette() {
    let err = Palette::new(Vec::new()).unwrap_err();
    assert!(matches!(err, PickError::EmptyPalette));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!err.is_recoverable());
}

#[test]
fn error_component_out_of_range() {
    let palette = Palette::new(vec![entry("black", 0, 0, 0)]).unwrap();
    let err = palette.resolve(0, 0, 256, DistanceMetric::Euclidean).unwrap_err();
    assert!(matches!(err, PickError::InvalidComponent { channel: 'b', value: 256 }));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.is_recoverable());
}

#[test]
fn display_size_matches_reference_values() {
    assert_eq!(compute_display_size(1000, 500, 1920).unwrap(), (1000, 500));
    assert_eq!(compute_display_size(4000, 2000, 1920).unwrap(), (1920, 960));
    assert_eq!(compute_display_size(3840, 2160, 1920).unwrap(), (1920, 1080));
}

#[test]
fn display_to_original_doubles_coordinates() {
    let p = map_display_to_original(
        100,
        50,
        Dimensions::new(2000, 1000),
        Dimensions::new(1000, 500),
    )
    .unwrap();
    assert_eq!(p, (200, 100));
}

#[test]
fn picker_end_to_end() {
    let palette = Palette::css3();
    let mut picker = ColorPicker::new(palette, PickerConfig::new().max_display_dimension(50));

    // 200x100, top half orange, bottom half navy.
    let mut pixels = Vec::with_capacity(200 * 100);
    for y in 0..100 {
        for _ in 0..200 {
            pixels.push(if y < 50 {
                rgb::RGB8::new(255, 165, 0)
            } else {
                rgb::RGB8::new(0, 0, 128)
            });
        }
    }
    picker.load_image(ImgVec::new(pixels, 200, 100)).unwrap();
    assert_eq!(picker.transform().unwrap().display(), Dimensions::new(50, 25));

    assert_eq!(picker.pick(10, 5).unwrap().name, "orange");
    assert_eq!(picker.pick(49, 24).unwrap().name, "navy");
    assert!(picker.pick(50, 0).is_err());

    let latest = picker.history().latest().unwrap();
    assert_eq!(latest.name, "navy");
    assert_eq!(picker.history().len(), 2);
}
