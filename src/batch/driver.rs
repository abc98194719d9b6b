use crate::core::bounds::BoundingBox;
use crate::error::{FixError, Result};
use crate::io::config::Config;
use crate::io::obj_scan::{MeshBounds, compute_bounds};
use crate::io::obj_writer::{RewriteStats, rewrite_file};
use log::{debug, info, warn};
use std::time::Instant;

/// Progress notices emitted while a batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEvent<'a> {
    Reading(&'a str),
    Writing(&'a str),
    Done,
}

/// Outcome of a single asset.
#[derive(Debug)]
pub struct AssetReport {
    pub asset: String,
    pub outcome: Result<AssetStats>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetStats {
    pub bounds: BoundingBox,
    pub source_vertices: usize,
    pub ignored_lines: usize,
    /// `None` in dry-run mode.
    pub rewrite: Option<RewriteStats>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub assets: Vec<AssetReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.assets.iter().filter(|a| a.outcome.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &FixError)> {
        self.assets
            .iter()
            .filter_map(|a| a.outcome.as_ref().err().map(|e| (a.asset.as_str(), e)))
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Runs the bounds scan and the rewrite over every configured asset, in order.
pub struct BatchDriver {
    config: Config,
    dry_run: bool,
}

impl BatchDriver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    /// Only compute bounds; leave every output file untouched.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Processes all assets, reporting progress through `on_event`.
    ///
    /// With `continue_on_error` unset the first failing asset aborts the run
    /// and its error is returned; assets after it are never started. Otherwise
    /// failures are recorded in the report and the remaining assets still run.
    /// `BatchEvent::Done` is only emitted when every asset succeeded.
    pub fn run<F>(&self, mut on_event: F) -> Result<BatchReport>
    where
        F: FnMut(BatchEvent<'_>),
    {
        let start = Instant::now();
        let mut report = BatchReport::default();

        for asset in &self.config.assets {
            let outcome = match self.process_asset(asset, &mut on_event) {
                Err(e) if !self.config.continue_on_error => {
                    return Err(FixError::Asset {
                        asset: asset.clone(),
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    warn!("Skipping {asset}: {e}");
                    Err(e)
                }
                ok => ok,
            };

            report.assets.push(AssetReport {
                asset: asset.clone(),
                outcome,
            });
        }

        debug!("Batch finished in {:?}", start.elapsed());
        if report.is_success() {
            on_event(BatchEvent::Done);
        }
        Ok(report)
    }

    fn process_asset<F>(&self, asset: &str, on_event: &mut F) -> Result<AssetStats>
    where
        F: FnMut(BatchEvent<'_>),
    {
        let paths = self.config.asset_paths(asset);
        if !paths.dir.is_dir() {
            return Err(FixError::MissingAssetDir {
                asset: asset.to_string(),
                path: paths.dir,
            });
        }

        // 1. Bounds from the full-resolution mesh
        on_event(BatchEvent::Reading(asset));
        let MeshBounds {
            bounds,
            vertices,
            ignored,
        } = compute_bounds(&paths.bounds)?;

        let offset = bounds.floor_offset();
        info!(
            "{asset}: offset ({:.4}, {:.4}, {:.4})",
            offset.x, offset.y, offset.z
        );

        if self.dry_run {
            return Ok(AssetStats {
                bounds,
                source_vertices: vertices,
                ignored_lines: ignored,
                rewrite: None,
            });
        }

        // 2. Rewrite the reduced mesh with that offset
        on_event(BatchEvent::Writing(asset));
        let stats = rewrite_file(&paths.input, &paths.output, &bounds, self.config.precision)?;
        info!(
            "{asset}: wrote {} ({} lines, {} vertices moved)",
            paths.output.display(),
            stats.lines,
            stats.vertices
        );

        Ok(AssetStats {
            bounds,
            source_vertices: vertices,
            ignored_lines: ignored,
            rewrite: Some(stats),
        })
    }
}
