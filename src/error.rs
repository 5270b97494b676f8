use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("icon size must be positive")]
    ZeroSize,

    #[error("icon size {0} is too large")]
    TooLarge(u32),

    #[error("invalid RGBA buffer for a {0}x{0} icon")]
    Buffer(u32),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[cfg(feature = "render")]
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image rendering is not available in this build")]
    RenderUnavailable,
}

impl IconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IconError::Io { path: path.into(), source }
    }
}
