use crate::error::IconError;
use crate::font::LetterFont;

pub type Color = [u8; 4];

pub const ACCENT: Color = [190, 0, 255, 255]; // #be00ff
pub const WHITE: Color = [255, 255, 255, 255];

/// Letter drawn on every icon (AProfileo).
pub const ICON_LETTER: char = 'A';

const CIRCLE_RADIUS: f32 = 0.45;
const HALO_ALPHA: f32 = 0.35;

#[derive(Debug)]
pub enum IconStyle {
    /// Two white strokes with a crossbar.
    Stroke,
    /// White shield with an accent letter on top.
    Shield { font: LetterFont },
}

/// Square RGBA8 buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Canvas {
    /// Transparent canvas. The RGBA buffer length must fit in a `u32`.
    pub fn new(size: u32) -> Result<Self, IconError> {
        let len = size
            .checked_mul(size)
            .and_then(|n| n.checked_mul(4))
            .ok_or(IconError::TooLarge(size))?;
        Ok(Self { width: size, height: size, rgba: vec![0u8; len as usize] })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = self.index(x, y);
        [self.rgba[idx], self.rgba[idx + 1], self.rgba[idx + 2], self.rgba[idx + 3]]
    }

    pub fn put(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.rgba[idx..idx + 4].copy_from_slice(&color);
    }

    /// Source-over blend of `color` at the given coverage.
    pub fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let a = (color[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let dst = self.pixel(x, y);
        let da = dst[3] as f32 / 255.0;
        let out_a = a + da * (1.0 - a);
        let mut out = [0u8; 4];
        for i in 0..3 {
            let c = (color[i] as f32 * a + dst[i] as f32 * da * (1.0 - a)) / out_a;
            out[i] = c.round() as u8;
        }
        out[3] = (out_a * 255.0).round() as u8;
        self.put(x, y, out);
    }

    /// Visit every pixel whose center lies inside the inclusive bounding box.
    fn for_each_in(&mut self, min: (f32, f32), max: (f32, f32), mut f: impl FnMut(&mut Self, u32, u32, f32, f32)) {
        let x0 = min.0.floor().max(0.0) as u32;
        let y0 = min.1.floor().max(0.0) as u32;
        let x1 = (max.0.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.1.ceil().max(0.0) as u32).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                f(self, x, y, x as f32 + 0.5, y as f32 + 0.5);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.for_each_in((cx - radius, cy - radius), (cx + radius, cy + radius), |c, x, y, px, py| {
            if dist(px, py, cx, cy) <= radius {
                c.put(x, y, color);
            }
        });
    }

    /// Ring between `inner` and `outer` whose alpha fades from `color`'s alpha times
    /// `strength` at the inner edge down to zero at the outer edge.
    pub fn fill_falloff(&mut self, cx: f32, cy: f32, inner: f32, outer: f32, color: Color, strength: f32) {
        if outer <= inner {
            return;
        }
        self.for_each_in((cx - outer, cy - outer), (cx + outer, cy + outer), |c, x, y, px, py| {
            let d = dist(px, py, cx, cy);
            if d > inner && d <= outer {
                let t = (d - inner) / (outer - inner);
                let alpha = lerp(color[3] as f32 * strength, 0.0, t).round() as u8;
                c.put(x, y, [color[0], color[1], color[2], alpha]);
            }
        });
    }

    /// Fill a convex polygon given in either winding order.
    pub fn fill_convex_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let (min, max) = bounds(points);
        self.for_each_in(min, max, |c, x, y, px, py| {
            if point_in_convex_polygon(px, py, points) {
                c.put(x, y, color);
            }
        });
    }

    /// Line segment with round caps.
    pub fn stroke_line(&mut self, a: (f32, f32), b: (f32, f32), width: f32, color: Color) {
        let half = width * 0.5;
        let (min, max) = bounds(&[a, b]);
        self.for_each_in((min.0 - half, min.1 - half), (max.0 + half, max.1 + half), |c, x, y, px, py| {
            if dist_to_segment(px, py, a, b) <= half {
                c.put(x, y, color);
            }
        });
    }

    /// Blend a glyph mask with its top-left corner at (`left`, `top`), clipping at the edges.
    pub fn draw_mask(&mut self, mask: &crate::font::GlyphMask, left: i64, top: i64, color: Color) {
        for my in 0..mask.height {
            for mx in 0..mask.width {
                let x = left + mx as i64;
                let y = top + my as i64;
                if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
                    continue;
                }
                let coverage = mask.get(mx, my);
                if coverage > 0.0 {
                    self.blend(x as u32, y as u32, color, coverage);
                }
            }
        }
    }
}

/// Draw one icon. Deterministic: the same size and style always yield the same pixels.
pub fn draw_icon(size: u32, style: &IconStyle) -> Result<Canvas, IconError> {
    if size == 0 {
        return Err(IconError::ZeroSize);
    }
    let mut canvas = Canvas::new(size)?;
    let s = size as f32;
    let center = s * 0.5;
    let radius = s * CIRCLE_RADIUS;

    if let IconStyle::Shield { .. } = style {
        canvas.fill_falloff(center, center, radius, center, ACCENT, HALO_ALPHA);
    }
    canvas.fill_circle(center, center, radius, ACCENT);

    match style {
        IconStyle::Stroke => draw_stroke_letter(&mut canvas, size),
        IconStyle::Shield { font } => {
            draw_shield(&mut canvas, size);
            draw_shield_letter(&mut canvas, size, font);
        }
    }
    Ok(canvas)
}

/// The center pixel stays accent-colored from 24px up. Below that the 2px
/// minimum stroke reaches the center.
fn draw_stroke_letter(canvas: &mut Canvas, size: u32) {
    let s = size as f32;
    let center = s * 0.5;
    let width = s * 0.25;
    let height = s * 0.35;
    let top = center - height * 0.5;
    let bottom = center + height * 0.5;
    let left = center - width * 0.5;
    let right = center + width * 0.5;
    let line_width = (size / 25).max(2) as f32;

    canvas.stroke_line((left, bottom), (center, top), line_width, WHITE);
    canvas.stroke_line((center, top), (right, bottom), line_width, WHITE);

    // Crossbar sits below the center and spans leg to leg.
    let bar_y = center + height * 0.2;
    let half_span = width * 0.5 * (bar_y - top) / height;
    canvas.stroke_line((center - half_span, bar_y), (center + half_span, bar_y), line_width, WHITE);
}

fn shield_points(size: u32) -> [(f32, f32); 6] {
    let s = size as f32;
    let center = s * 0.5;
    let w = s * 0.25;
    let h = w * 1.2;
    let left = center - w * 0.5;
    let top = center - h * 0.5;
    [
        (center, top),
        (left + w, top + h / 3.0),
        (left + w, top + h * 2.0 / 3.0),
        (center, top + h),
        (left, top + h * 2.0 / 3.0),
        (left, top + h / 3.0),
    ]
}

fn draw_shield(canvas: &mut Canvas, size: u32) {
    canvas.fill_convex_polygon(&shield_points(size), WHITE);
}

fn draw_shield_letter(canvas: &mut Canvas, size: u32, font: &LetterFont) {
    let s = size as f32;
    let px = s * font.letter_scale();
    let Some(mask) = font.rasterize(ICON_LETTER, px) else {
        log::warn!("No glyph for '{}', drawing shield only", ICON_LETTER);
        return;
    };
    let center = s * 0.5;
    let left = (center - mask.width as f32 * 0.5).round() as i64;
    let top = (center - mask.height as f32 * 0.5 + s * 0.02).round() as i64;
    canvas.draw_mask(&mask, left, top, ACCENT);
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }

#[inline]
fn cross(ax: f32, ay: f32, bx: f32, by: f32) -> f32 { ax * by - ay * bx }

#[inline]
fn dist(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((ax - bx) * (ax - bx) + (ay - by) * (ay - by)).sqrt()
}

fn dist_to_segment(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return dist(px, py, a.0, a.1);
    }
    let t = (((px - a.0) * dx + (py - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    dist(px, py, a.0 + t * dx, a.1 + t * dy)
}

fn bounds(points: &[(f32, f32)]) -> ((f32, f32), (f32, f32)) {
    points.iter().fold(
        ((f32::MAX, f32::MAX), (f32::MIN, f32::MIN)),
        |((x0, y0), (x1, y1)), &(x, y)| ((x0.min(x), y0.min(y)), (x1.max(x), y1.max(y))),
    )
}

fn point_in_convex_polygon(px: f32, py: f32, points: &[(f32, f32)]) -> bool {
    let mut has_neg = false;
    let mut has_pos = false;
    for (i, &(x1, y1)) in points.iter().enumerate() {
        let (x2, y2) = points[(i + 1) % points.len()];
        let c = cross(x2 - x1, y2 - y1, px - x1, py - y1);
        has_neg |= c < 0.0;
        has_pos |= c > 0.0;
    }
    !(has_neg && has_pos)
}
