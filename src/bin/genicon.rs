use std::path::PathBuf;

use anyhow::Context;

use aprofileo_icons::config::read_config;
use aprofileo_icons::generate::{render_icon, resolve_style};
use aprofileo_icons::logger;

// Usage: genicon [SIZE] [PATH]
fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let size = match args.next() {
        Some(arg) => arg.parse::<u32>().with_context(|| format!("invalid size '{}'", arg))?,
        None => 1024,
    };
    let out = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("assets/icon_{}.png", size)));

    let cfg = read_config().context("failed to read icongen.conf")?;
    logger::init(&cfg.log_level);

    let style = resolve_style(&cfg);
    render_icon(size, &out, &style).with_context(|| format!("failed to write {}", out.display()))?;
    println!("Wrote {} ({}x{})", out.display(), size, size);
    Ok(())
}
