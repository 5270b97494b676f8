use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::IconError;
use crate::font::LetterFont;
use crate::icon::{Canvas, IconStyle, draw_icon};
use crate::models::{Config, IconSpec, StyleKind};

/// How icons are written. Resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Render,
    /// Text stand-ins at the PNG paths.
    Placeholder,
}

impl Capability {
    pub fn detect(force_placeholder: bool) -> Self {
        let capability = if force_placeholder || !cfg!(feature = "render") {
            Capability::Placeholder
        } else {
            Capability::Render
        };
        info!("Output mode: {:?} (render feature: {})", capability, cfg!(feature = "render"));
        capability
    }
}

/// Build the configured style, loading the shield font if needed.
pub fn resolve_style(cfg: &Config) -> IconStyle {
    match cfg.style {
        StyleKind::Stroke => IconStyle::Stroke,
        StyleKind::Shield => IconStyle::Shield { font: LetterFont::load(&cfg.font_path) },
    }
}

pub fn placeholder_text(size: u32) -> String {
    format!("# Placeholder for {size}x{size} icon\n")
}

fn ensure_parent(path: &Path) -> Result<(), IconError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| IconError::io(parent, e))
        }
        _ => Ok(()),
    }
}

pub fn write_placeholder(size: u32, output_path: &Path) -> Result<(), IconError> {
    ensure_parent(output_path)?;
    fs::write(output_path, placeholder_text(size)).map_err(|e| IconError::io(output_path, e))
}

#[cfg(feature = "render")]
fn save_png(canvas: Canvas, path: &Path) -> Result<(), IconError> {
    let size = canvas.width;
    let img = image::RgbaImage::from_raw(canvas.width, canvas.height, canvas.rgba)
        .ok_or(IconError::Buffer(size))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| IconError::Encode { path: path.to_path_buf(), source })
}

#[cfg(not(feature = "render"))]
fn save_png(_canvas: Canvas, _path: &Path) -> Result<(), IconError> {
    Err(IconError::RenderUnavailable)
}

/// Draw a `size` x `size` icon and write it as PNG, creating parent directories.
pub fn render_icon(size: u32, output_path: &Path, style: &IconStyle) -> Result<(), IconError> {
    let canvas = draw_icon(size, style)?;
    ensure_parent(output_path)?;
    save_png(canvas, output_path)
}

pub struct Generator {
    root: PathBuf,
    capability: Capability,
    style: IconStyle,
}

impl Generator {
    pub fn new(root: impl Into<PathBuf>, capability: Capability, style: IconStyle) -> Self {
        Self { root: root.into(), capability, style }
    }

    pub fn generate(&self, spec: &IconSpec) -> Result<PathBuf, IconError> {
        let path = spec.output_path(&self.root);
        ensure_parent(&path)?;
        let kind = if spec.is_maskable() { "maskable" } else { "standard" };
        debug!("{} -> {} ({}px, {}, {})", spec.name, path.display(), spec.size, spec.platform, kind);
        match self.capability {
            Capability::Render => render_icon(spec.size, &path, &self.style)?,
            Capability::Placeholder => write_placeholder(spec.size, &path)?,
        }
        Ok(path)
    }

    /// Generate every spec in order. Stops at the first failure.
    pub fn generate_all<F>(&self, specs: &[IconSpec], mut progress: F) -> Result<Vec<PathBuf>, IconError>
    where
        F: FnMut(&IconSpec, &Path),
    {
        let mut written = Vec::with_capacity(specs.len());
        for spec in specs {
            let path = self.generate(spec)?;
            progress(spec, &path);
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ICON_SPECS;

    #[test]
    fn test_placeholder_text_mentions_size() {
        assert_eq!(placeholder_text(48), "# Placeholder for 48x48 icon\n");
    }

    #[test]
    fn test_detect_capability() {
        assert_eq!(Capability::detect(true), Capability::Placeholder);
        let expected = if cfg!(feature = "render") { Capability::Render } else { Capability::Placeholder };
        assert_eq!(Capability::detect(false), expected);
    }

    #[test]
    fn test_resolve_style() {
        let mut cfg = Config::default();
        assert!(matches!(resolve_style(&cfg), IconStyle::Stroke));
        cfg.style = StyleKind::Shield;
        cfg.font_path = PathBuf::from("/nonexistent/font.ttf");
        assert!(matches!(resolve_style(&cfg), IconStyle::Shield { font: LetterFont::Builtin }));
    }

    #[test]
    fn test_placeholder_mode_writes_every_path() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(dir.path(), Capability::Placeholder, IconStyle::Stroke);
        let mut seen = 0;
        let written = generator.generate_all(ICON_SPECS, |_, _| seen += 1).unwrap();
        assert_eq!(seen, ICON_SPECS.len());
        assert_eq!(written.len(), ICON_SPECS.len());
        for spec in ICON_SPECS {
            let path = dir.path().join(spec.path);
            let text = fs::read_to_string(&path).unwrap();
            assert!(text.contains(&format!("{}x{}", spec.size, spec.size)), "{}", path.display());
        }
    }

    #[test]
    fn test_zero_size_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/zero.png");
        assert!(matches!(render_icon(0, &path, &IconStyle::Stroke), Err(IconError::ZeroSize)));
        assert!(!path.exists());
    }

    #[test]
    fn test_oversized_icon_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge/icon.png");
        assert!(matches!(render_icon(40_000, &path, &IconStyle::Stroke), Err(IconError::TooLarge(40_000))));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_target_propagates() {
        let dir = tempfile::tempdir().unwrap();
        // a file where a directory is expected
        fs::write(dir.path().join("web"), "not a dir").unwrap();
        let generator = Generator::new(dir.path(), Capability::Placeholder, IconStyle::Stroke);
        let favicon = ICON_SPECS.iter().find(|s| s.name == "favicon").unwrap();
        assert!(matches!(generator.generate(favicon), Err(IconError::Io { .. })));
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_render_mode_writes_valid_pngs() {
        use crate::icon::ACCENT;

        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(dir.path(), Capability::Render, IconStyle::Stroke);
        generator.generate_all(ICON_SPECS, |_, _| {}).unwrap();
        for spec in ICON_SPECS {
            let path = dir.path().join(spec.path);
            let decoded = image::open(&path).unwrap();
            assert_eq!(decoded.color(), image::ColorType::Rgba8);
            let img = decoded.to_rgba8();
            assert_eq!(img.dimensions(), (spec.size, spec.size));
            let last = spec.size - 1;
            for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
                assert_eq!(img.get_pixel(x, y).0[3], 0);
            }
            assert_eq!(img.get_pixel(spec.size / 2, spec.size / 2).0, ACCENT);
        }
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_render_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a/icon.png");
        let b = dir.path().join("b/icon.png");
        render_icon(144, &a, &IconStyle::Stroke).unwrap();
        render_icon(144, &b, &IconStyle::Stroke).unwrap();
        assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_shield_style_renders_with_fallback_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shield.png");
        let style = IconStyle::Shield { font: LetterFont::Builtin };
        render_icon(96, &path, &style).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (96, 96));
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
    }
}
