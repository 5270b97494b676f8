pub mod config;
pub mod error;
pub mod font;
pub mod generate;
pub mod icon;
pub mod logger;
pub mod models;

pub use error::IconError;
pub use generate::{Capability, Generator, render_icon};
pub use models::{ICON_SPECS, IconSpec, Platform};
