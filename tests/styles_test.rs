//! Tests for CSS class allocation.

use sucre::{ClassAllocator, Color, FontRef, StyleTable};

fn font(id: i64) -> FontRef {
    FontRef {
        id,
        is_type3: false,
        space_width: 0.25,
    }
}

#[test]
fn test_equal_values_yield_equal_ids() {
    let mut table = StyleTable::new();
    assert_eq!(table.font_size_class(12.0), table.font_size_class(12.0));
    assert_eq!(
        table.fill_color_class(&Color::Rgb(1.0, 0.0, 0.0)),
        table.fill_color_class(&Color::Rgb(1.0, 0.0, 0.0))
    );
    assert_eq!(table.font_class(&font(3)), table.font_class(&font(3)));
    assert_eq!(table.letter_space_class(0.5), table.letter_space_class(0.5));
}

#[test]
fn test_distinct_values_yield_increasing_ids() {
    let mut table = StyleTable::new();
    assert_eq!(table.font_size_class(10.0), 0);
    assert_eq!(table.font_size_class(12.0), 1);
    assert_eq!(table.font_size_class(14.0), 2);
    // earlier values keep their ids
    assert_eq!(table.font_size_class(10.0), 0);
}

#[test]
fn test_slots_are_independent() {
    let mut table = StyleTable::new();
    assert_eq!(table.letter_space_class(1.0), 0);
    assert_eq!(table.word_space_class(1.0), 0);
    assert_eq!(table.rise_class(1.0), 0);
    assert_eq!(table.letter_space_class(2.0), 1);
    assert_eq!(table.word_space_class(1.0), 0);
}

#[test]
fn test_transparent_and_rgb_are_distinct_color_classes() {
    let mut table = StyleTable::new();
    let t = table.fill_color_class(&Color::Transparent);
    let black = table.fill_color_class(&Color::Rgb(0.0, 0.0, 0.0));
    assert_ne!(t, black);
}

#[test]
fn test_fill_and_stroke_tables_are_separate() {
    let mut table = StyleTable::new();
    let f = table.fill_color_class(&Color::Rgb(1.0, 0.0, 0.0));
    let s = table.stroke_color_class(&Color::Rgb(0.0, 1.0, 0.0));
    assert_eq!(f, 0);
    assert_eq!(s, 0);
}

#[test]
fn test_css_rules_reflect_interned_values() {
    let mut table = StyleTable::new();
    table.font_class(&font(7));
    table.font_size_class(12.0);
    table.fill_color_class(&Color::Rgb(1.0, 0.0, 0.0));
    table.letter_space_class(0.5);

    let rules = table.css_rules();
    assert!(rules.contains(&".ff0{font-family:ff7;}".to_string()), "{rules:?}");
    assert!(rules.contains(&".fs0{font-size:12px;}".to_string()), "{rules:?}");
    assert!(rules.contains(&".fc0{color:rgb(255,0,0);}".to_string()), "{rules:?}");
    assert!(
        rules.contains(&".ls0{letter-spacing:0.5px;}".to_string()),
        "{rules:?}"
    );
}

#[test]
fn test_css_rules_deterministic_order() {
    let build = || {
        let mut table = StyleTable::new();
        table.font_size_class(10.0);
        table.font_size_class(12.0);
        table.fill_color_class(&Color::Transparent);
        table.fill_color_class(&Color::Rgb(0.0, 0.0, 0.0));
        table.css_rules()
    };
    assert_eq!(build(), build());
}
