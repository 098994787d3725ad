#![allow(dead_code)]

use sucre::utils::{Matrix, Point, MATRIX_IDENTITY};
use sucre::{
    GfxState, HtmlParams, HtmlTextRenderer, PdfFont, SimpleFontInstaller, StyleTable,
};

/// Test font with controllable name / Type 3 flag / space width.
pub struct MockFont {
    pub name: String,
    pub type3: bool,
    pub space_width: f64,
}

impl MockFont {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            type3: false,
            space_width: 0.25,
        }
    }

    pub fn type3(name: &str) -> Self {
        Self {
            name: name.to_string(),
            type3: true,
            space_width: 0.25,
        }
    }
}

impl PdfFont for MockFont {
    fn fontname(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn is_type3(&self) -> bool {
        self.type3
    }

    fn space_width(&self) -> f64 {
        self.space_width
    }
}

/// Scriptable graphics state: tests mutate the public fields between calls.
pub struct MockGfxState {
    pub line_pos: Point,
    pub cur_pos: Point,
    pub font: Option<MockFont>,
    pub font_size: f64,
    pub horiz_scaling: f64,
    pub ctm: Matrix,
    pub text_matrix: Matrix,
    pub char_space: f64,
    pub word_space: f64,
    pub rise: f64,
    pub render_mode: u8,
    pub fill_rgb: (f64, f64, f64),
    pub stroke_rgb: (f64, f64, f64),
}

impl Default for MockGfxState {
    fn default() -> Self {
        Self {
            line_pos: (0.0, 0.0),
            cur_pos: (0.0, 0.0),
            font: Some(MockFont::named("F1")),
            font_size: 10.0,
            horiz_scaling: 1.0,
            ctm: MATRIX_IDENTITY,
            text_matrix: MATRIX_IDENTITY,
            char_space: 0.0,
            word_space: 0.0,
            rise: 0.0,
            render_mode: 0,
            fill_rgb: (0.0, 0.0, 0.0),
            stroke_rgb: (0.0, 0.0, 0.0),
        }
    }
}

impl GfxState for MockGfxState {
    fn line_pos(&self) -> Point {
        self.line_pos
    }

    fn cur_pos(&self) -> Point {
        self.cur_pos
    }

    fn font(&self) -> Option<&dyn PdfFont> {
        self.font.as_ref().map(|f| f as &dyn PdfFont)
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn horiz_scaling(&self) -> f64 {
        self.horiz_scaling
    }

    fn ctm(&self) -> Matrix {
        self.ctm
    }

    fn text_matrix(&self) -> Matrix {
        self.text_matrix
    }

    fn char_space(&self) -> f64 {
        self.char_space
    }

    fn word_space(&self) -> f64 {
        self.word_space
    }

    fn rise(&self) -> f64 {
        self.rise
    }

    fn render_mode(&self) -> u8 {
        self.render_mode
    }

    fn fill_rgb(&self) -> (f64, f64, f64) {
        self.fill_rgb
    }

    fn stroke_rgb(&self) -> (f64, f64, f64) {
        self.stroke_rgb
    }
}

pub type TestRenderer = HtmlTextRenderer<Vec<u8>, SimpleFontInstaller, StyleTable>;

pub fn renderer() -> TestRenderer {
    renderer_with(HtmlParams::default())
}

pub fn renderer_with(params: HtmlParams) -> TestRenderer {
    HtmlTextRenderer::new(
        Vec::new(),
        params,
        SimpleFontInstaller::new(),
        StyleTable::new(),
    )
}

pub fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Finishes the page and returns the serialized output.
pub fn output(mut r: TestRenderer) -> String {
    r.end_page().expect("end_page failed");
    String::from_utf8(r.into_writer()).expect("output is not UTF-8")
}

pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// A 45-degree rotation matrix.
pub fn rotation_45() -> Matrix {
    let c = std::f64::consts::FRAC_1_SQRT_2;
    (c, c, -c, c, 0.0, 0.0)
}
