//! End-to-end conversion scenarios: interpreter callbacks in, serialized
//! HTML out.

mod common;

use common::{chars, output, renderer, rotation_45, MockFont, MockGfxState};
use sucre::{GfxObserver, NewLineState};

#[test]
fn test_plain_left_to_right_run() {
    let mut r = renderer();
    let g = MockGfxState::default();
    r.update_all(&g);
    r.draw_glyphs(&g, &chars("a")).unwrap();
    r.draw_glyphs(&g, &chars("b")).unwrap();
    r.draw_glyphs(&g, &chars("c")).unwrap();

    let out = output(r);
    assert_eq!(out.matches("<div").count(), 1, "{out}");
    assert_eq!(out.matches("<span").count(), 0, "{out}");
    assert!(out.contains("abc"), "{out}");
}

#[test]
fn test_text_shift_becomes_offset_not_block() {
    let mut r = renderer();
    let g = MockGfxState::default();
    r.update_all(&g);
    r.draw_glyphs(&g, &chars("a")).unwrap();
    r.draw_glyphs(&g, &chars("b")).unwrap();

    // shift of 500 at size 10, scaling 1: cur_tx moves by -5
    r.update_text_shift(&g, 500.0);
    r.draw_glyphs(&g, &chars("c")).unwrap();
    assert_eq!(r.new_line_state(), NewLineState::None);

    let out = output(r);
    assert_eq!(out.matches("<div").count(), 1, "{out}");
    assert!(
        out.contains("ab<span class=\"g\" style=\"margin-left:-0.5em\"></span>c"),
        "{out}"
    );
}

#[test]
fn test_font_change_mid_line_is_inline() {
    let mut r = renderer();
    let mut g = MockGfxState::default();
    r.update_all(&g);
    r.draw_glyphs(&g, &chars("ab")).unwrap();

    g.font = Some(MockFont::named("F2"));
    r.update_font(&g);
    r.draw_glyphs(&g, &chars("c")).unwrap();
    assert_eq!(r.new_line_state(), NewLineState::Span);

    let out = output(r);
    assert_eq!(out.matches("<div").count(), 1, "{out}");
    assert!(out.contains("ab<span class=\"ff1\">c</span>"), "{out}");
}

#[test]
fn test_type3_font_change_breaks_block() {
    let mut r = renderer();
    let mut g = MockGfxState::default();
    r.update_all(&g);
    r.draw_glyphs(&g, &chars("ab")).unwrap();

    g.font = Some(MockFont::type3("T3"));
    r.update_font(&g);
    r.draw_glyphs(&g, &chars("c")).unwrap();
    assert_eq!(r.new_line_state(), NewLineState::Div);

    let out = output(r);
    assert_eq!(out.matches("<div").count(), 2, "{out}");
    assert!(out.contains("ab</div>"), "{out}");
    assert!(out.contains(">c</div>"), "{out}");
}

#[test]
fn test_rotation_starts_transformed_block() {
    let mut r = renderer();
    let mut g = MockGfxState::default();
    r.update_all(&g);
    r.draw_glyphs(&g, &chars("ab")).unwrap();

    g.ctm = rotation_45();
    r.update_ctm(&g, g.ctm);
    r.draw_glyphs(&g, &chars("c")).unwrap();
    assert_eq!(r.new_line_state(), NewLineState::Div);
    assert!((r.draw_text_scale() - 1.0).abs() < 1e-9);

    let out = output(r);
    assert_eq!(out.matches("<div").count(), 2, "{out}");
    assert!(
        out.contains("transform:matrix(0.707,0.707,-0.707,0.707,0,0)"),
        "{out}"
    );
}

#[test]
fn test_flipped_page_emits_positive_font_size() {
    let mut r = renderer();
    let g = MockGfxState {
        font_size: -10.0,
        ..MockGfxState::default()
    };
    r.update_all(&g);
    r.draw_glyphs(&g, &chars("a")).unwrap();

    assert!(r.cur_html_state().font_size > 0.0);
    let rules = r.styles().css_rules();
    assert!(
        rules.iter().any(|rule| rule.contains("font-size:10px")),
        "{rules:?}"
    );

    let out = output(r);
    // the 2x2 transform is negated to compensate for the sign flip
    assert!(out.contains("transform:matrix(-1,0,0,-1,0,0)"), "{out}");
}
