use std::collections::HashSet;

use meshpaint_core::{
    generate_gradient, GradientDescription, HexColor, MeshGenerator, RadialLayer, LAYER_COUNT_MAX,
    LAYER_COUNT_MIN,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn sample_layer() -> RadialLayer {
    RadialLayer::new(HexColor::from_rgb24(0x1a2b3c), 12, 88, 73)
}

#[test]
fn generated_layers_stay_in_range() {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    for _ in 0..2_000 {
        let gradient = generate_gradient(&mut rng);
        let count = gradient.layers().len();
        assert!(
            (LAYER_COUNT_MIN..=LAYER_COUNT_MAX).contains(&count),
            "layer count {count} out of range"
        );
        for layer in gradient.layers() {
            assert!(layer.center_x_percent() <= 100);
            assert!(layer.center_y_percent() <= 100);
            assert!((50..=149).contains(&layer.radius_percent()));
            assert!(layer.color().rgb24() <= 0xffffff);
        }
    }
}

#[test]
fn every_layer_count_is_reachable() {
    let mut rng = SmallRng::seed_from_u64(7);
    let counts: HashSet<usize> = (0..500)
        .map(|_| generate_gradient(&mut rng).layers().len())
        .collect();
    let expected: HashSet<usize> = (LAYER_COUNT_MIN..=LAYER_COUNT_MAX).collect();
    assert_eq!(counts, expected);
}

#[test]
fn layer_serializes_as_radial_gradient() {
    assert_eq!(
        sample_layer().to_string(),
        "radial-gradient(circle at 12% 88%, #1a2b3c 0%, transparent 73%)"
    );
}

#[test]
fn layers_join_with_comma_space() {
    let second = RadialLayer::new(HexColor::from_rgb24(0xff), 0, 100, 50);
    let gradient = GradientDescription::new(vec![sample_layer(), second]);
    assert_eq!(
        gradient.css_background(),
        "radial-gradient(circle at 12% 88%, #1a2b3c 0%, transparent 73%), \
         radial-gradient(circle at 0% 100%, #0000ff 0%, transparent 50%)"
    );
    assert_eq!(gradient.background_size(), "cover");
    assert!(gradient.css_declaration().starts_with("background: radial-gradient("));
    assert!(gradient.css_declaration().ends_with("50%);"));
}

#[test]
fn small_colors_pad_on_the_left() {
    assert_eq!(HexColor::from_rgb24(0x0000ff).to_string(), "#0000ff");
    assert_eq!(HexColor::from_rgb24(0).to_string(), "#000000");
    assert_eq!(HexColor::from_rgb24(0xabc).to_string(), "#000abc");
    assert_eq!(HexColor::from_rgb24(0xffffff).to_string(), "#ffffff");
}

#[test]
fn color_parses_input_values() {
    let color: HexColor = "#12AbEf".parse().expect("valid color");
    assert_eq!(color.rgb24(), 0x12abef);
    assert_eq!(color.channels(), (0x12, 0xab, 0xef));
    assert!("12abef".parse::<HexColor>().is_err());
    assert!("#12abe".parse::<HexColor>().is_err());
    assert!("#12abeg".parse::<HexColor>().is_err());
}

#[test]
fn color_serializes_as_hex_string() {
    let json = serde_json::to_string(&HexColor::from_rgb24(0x0080ff)).unwrap();
    assert_eq!(json, "\"#0080ff\"");
}

#[test]
fn seeded_generators_repeat() {
    let mut a = MeshGenerator::from_seed(42);
    let mut b = MeshGenerator::from_seed(42);
    for _ in 0..5 {
        assert_eq!(a.next_gradient(), b.next_gradient());
    }
}

#[test]
fn out_of_range_centers_are_clamped() {
    let layer = RadialLayer::new(HexColor::BLACK, 180, 255, 60);
    assert_eq!(layer.center_x_percent(), 100);
    assert_eq!(layer.center_y_percent(), 100);
}
