use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Web,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Web => write!(f, "Web"),
        }
    }
}

/// One icon to generate: a logical name, its pixel size and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub name: &'static str,
    pub size: u32,
    /// Relative to the output root.
    pub path: &'static str,
    pub platform: Platform,
}

impl IconSpec {
    pub const fn new(name: &'static str, size: u32, path: &'static str, platform: Platform) -> Self {
        Self { name, size, path, platform }
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(self.path)
    }

    pub fn is_maskable(&self) -> bool {
        self.name.contains("maskable")
    }
}

pub const ICON_SPECS: &[IconSpec] = &[
    // Android launcher icons
    IconSpec::new("mipmap-mdpi", 48, "android/app/src/main/res/mipmap-mdpi/ic_launcher.png", Platform::Android),
    IconSpec::new("mipmap-hdpi", 72, "android/app/src/main/res/mipmap-hdpi/ic_launcher.png", Platform::Android),
    IconSpec::new("mipmap-xhdpi", 96, "android/app/src/main/res/mipmap-xhdpi/ic_launcher.png", Platform::Android),
    IconSpec::new("mipmap-xxhdpi", 144, "android/app/src/main/res/mipmap-xxhdpi/ic_launcher.png", Platform::Android),
    IconSpec::new("mipmap-xxxhdpi", 192, "android/app/src/main/res/mipmap-xxxhdpi/ic_launcher.png", Platform::Android),
    // Web favicon and PWA icons
    IconSpec::new("favicon", 32, "web/favicon.png", Platform::Web),
    IconSpec::new("Icon-192", 192, "web/icons/Icon-192.png", Platform::Web),
    IconSpec::new("Icon-512", 512, "web/icons/Icon-512.png", Platform::Web),
    IconSpec::new("Icon-maskable-192", 192, "web/icons/Icon-maskable-192.png", Platform::Web),
    IconSpec::new("Icon-maskable-512", 512, "web/icons/Icon-maskable-512.png", Platform::Web),
];

/// Smallest and largest size generated for a platform.
pub fn size_range(specs: &[IconSpec], platform: Platform) -> Option<(u32, u32)> {
    let mut sizes = specs.iter().filter(|s| s.platform == platform).map(|s| s.size);
    let first = sizes.next()?;
    Some(sizes.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s))))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleKind {
    #[default]
    Stroke,
    Shield,
}

impl FromStr for StyleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stroke" => Ok(StyleKind::Stroke),
            "shield" => Ok(StyleKind::Shield),
            other => Err(format!("unknown icon style '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub output_dir: PathBuf,
    pub style: StyleKind,
    pub font_path: PathBuf,
    pub placeholder: bool, // force placeholder mode
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            style: StyleKind::Stroke,
            font_path: PathBuf::from("arial.ttf"),
            placeholder: false,
            log_level: "info".to_string(),
        }
    }
}
