use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::models::{Config, StyleKind};

pub const CONFIG_FILE: &str = "icongen.conf";

fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "aprofileo", "icongen").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Read the config from the user config dir, then from the working directory.
/// A missing file is not an error: all keys have defaults.
pub fn read_config() -> Result<Config, io::Error> {
    if let Some(primary) = config_file_path() {
        if let Some(cfg) = read_config_file(&primary)? {
            return Ok(cfg);
        }
    }
    Ok(read_config_file(Path::new(CONFIG_FILE))?.unwrap_or_default())
}

pub fn read_config_file(path: &Path) -> Result<Option<Config>, io::Error> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(parse_config(&content))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn parse_config(content: &str) -> Config {
    let mut cfg = Config::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim();
            match k.trim() {
                "output_dir" if !v.is_empty() => cfg.output_dir = PathBuf::from(v),
                "style" => cfg.style = v.parse::<StyleKind>().unwrap_or_default(),
                "font_path" if !v.is_empty() => cfg.font_path = PathBuf::from(v),
                "placeholder" => cfg.placeholder = v.parse::<u8>().map(|n| n != 0).unwrap_or(false),
                "log_level" if !v.is_empty() => cfg.log_level = v.to_string(),
                _ => {}
            }
        }
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config(""), Config::default());
        let cfg = Config::default();
        assert_eq!(cfg.output_dir, PathBuf::from("."));
        assert_eq!(cfg.style, StyleKind::Stroke);
        assert_eq!(cfg.font_path, PathBuf::from("arial.ttf"));
        assert!(!cfg.placeholder);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_parse_all_keys() {
        let cfg = parse_config(
            "# generator settings\n\
             output_dir = build/icons\n\
             style=shield\n\
             font_path=/usr/share/fonts/DejaVuSans.ttf\n\
             placeholder=1\n\
             log_level=debug\n\
             unknown_key=whatever\n",
        );
        assert_eq!(cfg.output_dir, PathBuf::from("build/icons"));
        assert_eq!(cfg.style, StyleKind::Shield);
        assert_eq!(cfg.font_path, PathBuf::from("/usr/share/fonts/DejaVuSans.ttf"));
        assert!(cfg.placeholder);
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = parse_config("style=crown\nplaceholder=yes\noutput_dir=\nno equals sign here\n");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        assert_eq!(read_config_file(&path).unwrap(), None);
        fs::write(&path, "placeholder=1\n").unwrap();
        let cfg = read_config_file(&path).unwrap().unwrap();
        assert!(cfg.placeholder);
    }
}
