use std::path::Path;

use anyhow::{Context, Result};
use termine_core::Config;

pub fn run(path: &Path) -> Result<()> {
    if path.exists() {
        // Validate so a broken file is reported now rather than on the next convert
        Config::load(path).with_context(|| format!("Invalid config at {}", path.display()))?;
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    Config::default()
        .save(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    println!("Created default config at {}", path.display());

    Ok(())
}
