use crate::core::bounds::{BoundingBox, BoundsAccumulator};
use crate::core::obj_line::ObjLine;
use crate::error::{FixError, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Result of scanning a source mesh for its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    pub bounds: BoundingBox,
    /// Number of vertex lines folded into `bounds`.
    pub vertices: usize,
    /// Lines that did not contribute (other tags, malformed vertices).
    pub ignored: usize,
}

/// Folds every vertex line of `reader` into a [`BoundsAccumulator`].
///
/// Returns the accumulator and the number of ignored lines.
pub fn scan_vertices<R: BufRead>(mut reader: R) -> io::Result<(BoundsAccumulator, usize)> {
    let mut acc = BoundsAccumulator::new();
    let mut ignored = 0;
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        match ObjLine::classify_bytes(&line) {
            ObjLine::Vertex(p) => acc.add(&p),
            ObjLine::Opaque => ignored += 1,
        }
    }

    Ok((acc, ignored))
}

/// Computes the bounding box of the OBJ file at `path`.
///
/// # Errors
/// * `FixError::Io` if the file cannot be opened or read.
/// * `FixError::NoVertices` if the file holds no valid `v x y z` line.
pub fn compute_bounds<P: AsRef<Path>>(path: P) -> Result<MeshBounds> {
    let path = path.as_ref();
    debug!("Scanning bounds of {}", path.display());

    let file = File::open(path).map_err(|e| FixError::io(path, e))?;
    let (acc, ignored) = scan_vertices(BufReader::new(file)).map_err(|e| FixError::io(path, e))?;

    let bounds = acc.finish().ok_or_else(|| FixError::NoVertices {
        path: path.to_path_buf(),
    })?;

    info!(
        "{}: {} vertices, min {:.4?}, max {:.4?}",
        path.display(),
        acc.count(),
        bounds.min.coords.as_slice(),
        bounds.max.coords.as_slice()
    );
    if ignored > 0 {
        debug!("{}: {} non-vertex lines ignored", path.display(), ignored);
    }

    Ok(MeshBounds {
        bounds,
        vertices: acc.count(),
        ignored,
    })
}
