use std::path::Path;

use anyhow::{bail, Result};

use carousel_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {}\nUse --force to overwrite it.",
            path.display()
        );
    }

    config.save_to(path)?;
    println!("Wrote config to {}", path.display());
    Ok(())
}
