//! Write the default configuration.

use anyhow::{bail, Context, Result};
use screener_config::default_config_toml;

use crate::cli::InitConfigArgs;

pub fn run(args: &InitConfigArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists; pass --force to overwrite",
            args.output.display()
        );
    }

    let toml = default_config_toml()?;
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&args.output, toml)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Wrote default configuration to {}", args.output.display());
    Ok(())
}
