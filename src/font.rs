use std::fmt;
use std::path::Path;
#[cfg(feature = "render")]
use std::path::PathBuf;

use log::{debug, warn};

// Searched when the configured font is a bare file name.
#[cfg(feature = "render")]
const SYSTEM_FONT_DIRS: &[&str] = &[
    "C:\\Windows\\Fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/TTF",
];

// 5x7 bitmap, MSB is the leftmost column.
const BUILTIN_A: [u8; 7] = [
    0b01110,
    0b10001,
    0b10001,
    0b11111,
    0b10001,
    0b10001,
    0b10001,
];
const BUILTIN_COLS: u32 = 5;
const BUILTIN_ROWS: u32 = 7;

/// Source of the letter drawn on the shield icon.
pub enum LetterFont {
    #[cfg(feature = "render")]
    TrueType(ab_glyph::FontVec),
    /// Embedded bitmap glyphs, used when no TrueType font can be loaded.
    Builtin,
}

impl fmt::Debug for LetterFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "render")]
            LetterFont::TrueType(_) => write!(f, "LetterFont::TrueType"),
            LetterFont::Builtin => write!(f, "LetterFont::Builtin"),
        }
    }
}

impl LetterFont {
    /// Load the preferred font, falling back to the builtin glyphs. Never fails.
    pub fn load(path: &Path) -> LetterFont {
        #[cfg(feature = "render")]
        {
            if let Some(font) = load_truetype(path) {
                return LetterFont::TrueType(font);
            }
        }
        warn!("Font {} not available, using builtin glyphs", path.display());
        LetterFont::Builtin
    }

    /// Letter height as a fraction of the icon size. The fallback is drawn smaller.
    pub fn letter_scale(&self) -> f32 {
        match self {
            #[cfg(feature = "render")]
            LetterFont::TrueType(_) => 0.2,
            LetterFont::Builtin => 0.15,
        }
    }

    pub fn rasterize(&self, letter: char, px: f32) -> Option<GlyphMask> {
        match self {
            #[cfg(feature = "render")]
            LetterFont::TrueType(font) => rasterize_truetype(font, letter, px),
            LetterFont::Builtin => rasterize_builtin(letter, px),
        }
    }
}

/// Per-pixel coverage in `0.0..=1.0`, tight around the glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    coverage: Vec<f32>,
}

impl GlyphMask {
    fn new(width: u32, height: u32) -> Self {
        Self { width, height, coverage: vec![0.0; (width * height) as usize] }
    }

    fn set(&mut self, x: u32, y: u32, c: f32) {
        if x < self.width && y < self.height {
            self.coverage[(y * self.width + x) as usize] = c.clamp(0.0, 1.0);
        }
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x < self.width && y < self.height {
            self.coverage[(y * self.width + x) as usize]
        } else {
            0.0
        }
    }
}

#[cfg(feature = "render")]
fn font_candidates(path: &Path) -> Vec<PathBuf> {
    let mut out = vec![path.to_path_buf()];
    if path.components().count() == 1 {
        out.extend(SYSTEM_FONT_DIRS.iter().map(|dir| Path::new(dir).join(path)));
    }
    out
}

#[cfg(feature = "render")]
fn load_truetype(path: &Path) -> Option<ab_glyph::FontVec> {
    for candidate in font_candidates(path) {
        let Ok(data) = std::fs::read(&candidate) else { continue };
        match ab_glyph::FontVec::try_from_vec(data) {
            Ok(font) => {
                debug!("Loaded font {}", candidate.display());
                return Some(font);
            }
            Err(e) => warn!("Ignoring font {}: {}", candidate.display(), e),
        }
    }
    None
}

#[cfg(feature = "render")]
fn rasterize_truetype(font: &ab_glyph::FontVec, letter: char, px: f32) -> Option<GlyphMask> {
    use ab_glyph::{Font, PxScale, point};

    let glyph = font
        .glyph_id(letter)
        .with_scale_and_position(PxScale::from(px), point(0.0, 0.0));
    let outlined = font.outline_glyph(glyph)?;
    let bounds = outlined.px_bounds();
    let mut mask = GlyphMask::new(bounds.width().ceil() as u32, bounds.height().ceil() as u32);
    outlined.draw(|x, y, c| mask.set(x, y, c));
    Some(mask)
}

fn rasterize_builtin(letter: char, px: f32) -> Option<GlyphMask> {
    let rows = match letter.to_ascii_uppercase() {
        'A' => BUILTIN_A,
        _ => return None,
    };
    let cell = (px / BUILTIN_ROWS as f32).round().max(1.0) as u32;
    debug!("Builtin glyph '{}' at {}px per cell", letter, cell);
    let mut mask = GlyphMask::new(BUILTIN_COLS * cell, BUILTIN_ROWS * cell);
    for y in 0..mask.height {
        let bits = rows[(y / cell) as usize];
        for x in 0..mask.width {
            let col = x / cell;
            if bits & (1 << (BUILTIN_COLS - 1 - col)) != 0 {
                mask.set(x, y, 1.0);
            }
        }
    }
    Some(mask)
}
