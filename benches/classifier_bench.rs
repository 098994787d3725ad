//! Benchmarks for the classifier and line-buffer hot path.
//!
//! Drives the renderer the way an interpreter would: a page of text lines,
//! each line a run of glyph batches with occasional pen shifts and style
//! changes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use sucre::utils::{Matrix, Point, MATRIX_IDENTITY};
use sucre::{
    GfxObserver, GfxState, HtmlParams, HtmlTextRenderer, PdfFont, SimpleFontInstaller, StyleTable,
};

struct BenchFont(&'static str);

impl PdfFont for BenchFont {
    fn fontname(&self) -> Option<&str> {
        Some(self.0)
    }
}

struct BenchGfx {
    font: BenchFont,
    ctm: Matrix,
    line_pos: Point,
    char_space: f64,
}

impl GfxState for BenchGfx {
    fn line_pos(&self) -> Point {
        self.line_pos
    }

    fn cur_pos(&self) -> Point {
        self.line_pos
    }

    fn font(&self) -> Option<&dyn PdfFont> {
        Some(&self.font)
    }

    fn font_size(&self) -> f64 {
        12.0
    }

    fn horiz_scaling(&self) -> f64 {
        1.0
    }

    fn ctm(&self) -> Matrix {
        self.ctm
    }

    fn text_matrix(&self) -> Matrix {
        MATRIX_IDENTITY
    }

    fn char_space(&self) -> f64 {
        self.char_space
    }

    fn word_space(&self) -> f64 {
        0.0
    }

    fn rise(&self) -> f64 {
        0.0
    }

    fn render_mode(&self) -> u8 {
        0
    }

    fn fill_rgb(&self) -> (f64, f64, f64) {
        (0.0, 0.0, 0.0)
    }

    fn stroke_rgb(&self) -> (f64, f64, f64) {
        (0.0, 0.0, 0.0)
    }
}

/// Renders a synthetic page and returns the output size.
fn render_page(num_lines: usize, batches_per_line: usize) -> usize {
    let mut renderer = HtmlTextRenderer::new(
        Vec::new(),
        HtmlParams::default(),
        SimpleFontInstaller::new(),
        StyleTable::new(),
    );
    let mut gfx = BenchGfx {
        font: BenchFont("F1"),
        ctm: MATRIX_IDENTITY,
        line_pos: (0.0, 0.0),
        char_space: 0.0,
    };
    let batch: Vec<char> = "lorem ipsum ".chars().collect();

    renderer.update_all(&gfx);
    for line in 0..num_lines {
        // move to the next baseline; forces a new block
        gfx.ctm = (1.0, 0.0, 0.0, 1.0, 72.0, 720.0 - 14.0 * line as f64);
        renderer.update_ctm(&gfx, gfx.ctm);

        for batch_idx in 0..batches_per_line {
            if batch_idx % 4 == 3 {
                // periodic pen adjustment, as TJ arrays produce
                renderer.update_text_shift(&gfx, 250.0);
            }
            if batch_idx % 8 == 7 {
                gfx.char_space = if gfx.char_space == 0.0 { 0.5 } else { 0.0 };
                renderer.update_char_space(&gfx);
            }
            renderer.draw_glyphs(&gfx, &batch).unwrap();
        }
    }
    renderer.end_page().unwrap();
    renderer.into_writer().len()
}

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    for num_lines in [10, 50, 200] {
        group.bench_with_input(
            BenchmarkId::new("render_page", num_lines),
            &num_lines,
            |b, &n| b.iter(|| black_box(render_page(n, 8))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_classifier);
criterion_main!(benches);
