use crate::error::Result;
use crate::io::config::Config;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Recenter OBJ assets: X/Y around the bounding-box midpoint, Z onto the floor
#[derive(Parser, Debug)]
#[command(name = "obj-fixer", version)]
pub struct Cli {
    /// Config file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the asset directories
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Only process this asset (repeatable)
    #[arg(short, long = "asset", value_name = "NAME")]
    pub assets: Vec<String>,

    /// Compute and log bounds without writing any output
    #[arg(long)]
    pub dry_run: bool,

    /// Decimals of rewritten coordinates
    #[arg(long, value_name = "N")]
    pub precision: Option<usize>,
}

impl Cli {
    /// Builds the effective config: file (or defaults), then flag overrides.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config: {}", path.display());
                Config::load(path)?
            }
            None => Config::default(),
        };

        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        config.select_assets(&self.assets)?;

        Ok(config)
    }
}
