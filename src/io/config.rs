use crate::batch::catalog::chess_set;
use crate::error::{FixError, Result};
use crate::io::obj_writer::DEFAULT_PRECISION;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding one sub-directory per asset.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    // --- Per-asset file names ---
    #[serde(default = "default_bounds_file")]
    pub bounds_file: String,
    #[serde(default = "default_input_file")]
    pub input_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,

    // --- Output & Policy ---
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(default)]
    pub continue_on_error: bool,

    #[serde(default = "chess_set")]
    pub assets: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            bounds_file: default_bounds_file(),
            input_file: default_input_file(),
            output_file: default_output_file(),
            precision: default_precision(),
            continue_on_error: false,
            assets: chess_set(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_bounds_file() -> String {
    "model.obj".to_string()
}
fn default_input_file() -> String {
    "model_small.obj".to_string()
}
fn default_output_file() -> String {
    "modelf.obj".to_string()
}
fn default_precision() -> usize {
    DEFAULT_PRECISION
}

/// Paths of the three files belonging to one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub dir: PathBuf,
    pub bounds: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FixError::io(path, e))?;
        Self::parse(&content, path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, origin: &Path) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| FixError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        let invalid = |message: &str| FixError::Config {
            path: origin.to_path_buf(),
            message: message.to_string(),
        };

        if self.assets.is_empty() {
            return Err(invalid("asset list is empty"));
        }
        if self.assets.iter().any(|a| a.trim().is_empty()) {
            return Err(invalid("asset names must not be blank"));
        }
        if self.input_file == self.output_file {
            return Err(invalid("output_file must differ from input_file"));
        }
        Ok(())
    }

    pub fn asset_paths(&self, asset: &str) -> AssetPaths {
        let dir = self.root.join(asset);
        AssetPaths {
            bounds: dir.join(&self.bounds_file),
            input: dir.join(&self.input_file),
            output: dir.join(&self.output_file),
            dir,
        }
    }

    /// Keeps only `names`, in configured order.
    ///
    /// # Errors
    /// `FixError::UnknownAsset` for the first name not in the asset list.
    pub fn select_assets(&mut self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        if let Some(unknown) = names.iter().find(|n| !self.assets.contains(n)) {
            return Err(FixError::UnknownAsset {
                name: unknown.clone(),
            });
        }
        self.assets.retain(|a| names.contains(a));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.assets.len(), 12);
        assert_eq!(config.precision, 2);
    }

    #[test]
    fn fields_override_defaults() {
        let config = Config::from_toml_str(
            r#"
            root = "resources/objects/stone_chess"
            output_file = "centered.obj"
            precision = 4
            continue_on_error = true
            assets = ["rook_white", "rook_black"]
            "#,
        )
        .unwrap();

        assert_eq!(config.root, PathBuf::from("resources/objects/stone_chess"));
        assert_eq!(config.bounds_file, "model.obj");
        assert_eq!(config.output_file, "centered.obj");
        assert_eq!(config.precision, 4);
        assert!(config.continue_on_error);
        assert_eq!(config.assets, vec!["rook_white", "rook_black"]);
    }

    #[test]
    fn unknown_keys_and_empty_assets_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("colour = 1"),
            Err(FixError::Config { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("assets = []"),
            Err(FixError::Config { .. })
        ));
        assert!(matches!(
            Config::from_toml_str(r#"output_file = "model_small.obj""#),
            Err(FixError::Config { .. })
        ));
    }

    #[test]
    fn asset_paths_follow_layout() {
        let config = Config {
            root: PathBuf::from("chess"),
            ..Default::default()
        };
        let paths = config.asset_paths("king_black");
        assert_eq!(paths.dir, Path::new("chess/king_black"));
        assert_eq!(paths.bounds, Path::new("chess/king_black/model.obj"));
        assert_eq!(paths.input, Path::new("chess/king_black/model_small.obj"));
        assert_eq!(paths.output, Path::new("chess/king_black/modelf.obj"));
    }

    #[test]
    fn selection_keeps_configured_order() {
        let mut config = Config::default();
        config
            .select_assets(&["queen_black".to_string(), "pawn_white".to_string()])
            .unwrap();
        assert_eq!(config.assets, vec!["pawn_white", "queen_black"]);

        let err = config.select_assets(&["dragon_red".to_string()]).unwrap_err();
        assert!(matches!(err, FixError::UnknownAsset { name } if name == "dragon_red"));
    }
}
