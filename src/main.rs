use std::process::ExitCode;

use anyhow::Context;

use aprofileo_icons::config::read_config;
use aprofileo_icons::generate::{Capability, Generator, resolve_style};
use aprofileo_icons::icon::IconStyle;
use aprofileo_icons::logger;
use aprofileo_icons::models::{ICON_SPECS, Platform, size_range};

fn run() -> anyhow::Result<()> {
    let cfg = read_config().context("failed to read icongen.conf")?;
    logger::init(&cfg.log_level);

    let capability = Capability::detect(cfg.placeholder);
    let style = match capability {
        Capability::Render => resolve_style(&cfg),
        Capability::Placeholder => IconStyle::Stroke,
    };

    println!("Generating AProfileo app icons...");
    if capability == Capability::Placeholder {
        println!("Image rendering not available. Creating placeholder files...");
    }

    let generator = Generator::new(&cfg.output_dir, capability, style);
    generator
        .generate_all(ICON_SPECS, |spec, path| match capability {
            Capability::Render => println!("Created icon: {} ({}x{})", path.display(), spec.size, spec.size),
            Capability::Placeholder => println!("Created placeholder: {}", path.display()),
        })
        .context("icon generation failed")?;

    match capability {
        Capability::Render => {
            println!("All icons generated successfully!");
            println!("\nGenerated icons:");
            for platform in [Platform::Android, Platform::Web] {
                let count = ICON_SPECS.iter().filter(|s| s.platform == platform).count();
                if let Some((lo, hi)) = size_range(ICON_SPECS, platform) {
                    println!("- {}: {} icons, {}px to {}px", platform, count, lo, hi);
                }
            }
        }
        Capability::Placeholder => {
            println!(
                "Created placeholder files. Build with the `render` feature and set placeholder=0 to generate actual icons."
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
