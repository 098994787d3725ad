//! Font interfaces at the converter seam.
//!
//! The core never inspects font programs. It sees the interpreter's current
//! font through the narrow [`PdfFont`] trait, hands it to a [`FontInstaller`]
//! (which owns embedding/subsetting elsewhere), and tracks the returned
//! [`FontRef`] from then on.

use std::collections::HashMap;

/// Minimal view of a PDF font object, as needed by the converter core.
pub trait PdfFont {
    /// The font's base name, if it has one.
    fn fontname(&self) -> Option<&str> {
        None
    }

    /// Whether this is a Type 3 font (glyphs are arbitrary content streams,
    /// so advance widths are not reliable).
    fn is_type3(&self) -> bool {
        false
    }

    /// Em-relative advance width of U+0020.
    fn space_width(&self) -> f64 {
        0.25
    }
}

/// Reference to an installed font.
///
/// Identity is the installer-assigned `id` alone; the remaining fields are
/// cached properties the classifier and serializer need.
#[derive(Debug, Clone, Copy)]
pub struct FontRef {
    pub id: i64,
    pub is_type3: bool,
    pub space_width: f64,
}

impl FontRef {
    /// Sentinel id for "no font installed".
    pub const NULL_ID: i64 = -1;

    /// The sentinel reference returned by `install_font(None)`.
    pub fn null() -> Self {
        Self {
            id: Self::NULL_ID,
            is_type3: false,
            space_width: 0.25,
        }
    }

    pub fn is_null(&self) -> bool {
        self.id == Self::NULL_ID
    }
}

impl PartialEq for FontRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FontRef {}

impl std::hash::Hash for FontRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Installs PDF fonts for HTML output and hands back stable references.
///
/// Installing the same font twice must yield the same id; `None` yields the
/// null sentinel.
pub trait FontInstaller {
    fn install_font(&mut self, font: Option<&dyn PdfFont>) -> FontRef;
}

/// Font installer interning fonts by base name.
///
/// Fonts without a name cannot be told apart here, so each unnamed install
/// allocates a fresh id.
#[derive(Debug, Default)]
pub struct SimpleFontInstaller {
    by_name: HashMap<String, FontRef>,
    next_id: i64,
}

impl SimpleFontInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct fonts installed so far.
    pub fn len(&self) -> usize {
        self.next_id as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_id == 0
    }

    fn alloc(&mut self, font: &dyn PdfFont) -> FontRef {
        let font_ref = FontRef {
            id: self.next_id,
            is_type3: font.is_type3(),
            space_width: font.space_width(),
        };
        self.next_id += 1;
        font_ref
    }
}

impl FontInstaller for SimpleFontInstaller {
    fn install_font(&mut self, font: Option<&dyn PdfFont>) -> FontRef {
        let Some(font) = font else {
            return FontRef::null();
        };
        match font.fontname() {
            Some(name) => {
                if let Some(existing) = self.by_name.get(name) {
                    return *existing;
                }
                let font_ref = self.alloc(font);
                self.by_name.insert(name.to_string(), font_ref);
                font_ref
            }
            None => self.alloc(font),
        }
    }
}
