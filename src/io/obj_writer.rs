use crate::core::bounds::BoundingBox;
use crate::core::obj_line::{ObjLine, format_vertex};
use crate::error::{FixError, Result};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Default number of decimals for rewritten coordinates.
pub const DEFAULT_PRECISION: usize = 2;

/// Counters of a single rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Lines read, equal to lines written.
    pub lines: usize,
    /// Vertex lines that were transformed.
    pub vertices: usize,
    /// Lines copied verbatim.
    pub passthrough: usize,
    /// Transformed vertices lying outside the bounds they were moved by.
    pub outside_bounds: usize,
}

enum Side {
    Read,
    Write,
}

fn rewrite_lines<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    bounds: &BoundingBox,
    precision: usize,
) -> std::result::Result<RewriteStats, (Side, io::Error)> {
    let mut stats = RewriteStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| (Side::Read, e))?;
        if read == 0 {
            break;
        }
        stats.lines += 1;

        let written = match ObjLine::classify_bytes(&line) {
            ObjLine::Vertex(p) => {
                if !bounds.contains(&p) {
                    stats.outside_bounds += 1;
                }
                stats.vertices += 1;
                writer.write_all(format_vertex(&bounds.recenter(&p), precision).as_bytes())
            }
            ObjLine::Opaque => {
                stats.passthrough += 1;
                writer.write_all(&line)
            }
        };
        written.map_err(|e| (Side::Write, e))?;
    }

    writer.flush().map_err(|e| (Side::Write, e))?;
    Ok(stats)
}

/// Streams `reader` into `writer`, moving every vertex line by the bounds'
/// floor offset and copying all other lines byte for byte.
///
/// Nothing but the current line is held in memory.
pub fn rewrite<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    bounds: &BoundingBox,
    precision: usize,
) -> io::Result<RewriteStats> {
    rewrite_lines(&mut reader, &mut writer, bounds, precision).map_err(|(_, e)| e)
}

/// Rewrites the OBJ file at `input` into `output`, creating or truncating it.
///
/// A failure half-way leaves a partial `output` behind; there is no rollback.
pub fn rewrite_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    bounds: &BoundingBox,
    precision: usize,
) -> Result<RewriteStats> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let source = File::open(input).map_err(|e| FixError::io(input, e))?;
    let destination = File::create(output).map_err(|e| FixError::io(output, e))?;

    let mut reader = BufReader::new(source);
    let mut writer = BufWriter::new(destination);
    let stats =
        rewrite_lines(&mut reader, &mut writer, bounds, precision).map_err(|(side, e)| match side {
            Side::Read => FixError::io(input, e),
            Side::Write => FixError::io(output, e),
        })?;

    debug!(
        "{} -> {}: {} lines, {} vertices, {} passed through",
        input.display(),
        output.display(),
        stats.lines,
        stats.vertices,
        stats.passthrough
    );
    if stats.outside_bounds > 0 {
        warn!(
            "{}: {} vertices lie outside the source bounds",
            input.display(),
            stats.outside_bounds
        );
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::io::Cursor;

    fn sample_box() -> BoundingBox {
        BoundingBox::new(Point3::new(-1.0, 0.0, -0.5), Point3::new(3.0, 2.0, 1.5))
    }

    fn run(input: &[u8]) -> (Vec<u8>, RewriteStats) {
        let mut out = Vec::new();
        let stats = rewrite(Cursor::new(input), &mut out, &sample_box(), DEFAULT_PRECISION).unwrap();
        (out, stats)
    }

    #[test]
    fn vertex_is_moved_by_floor_offset() {
        let (out, stats) = run(b"v 1.0 1.0 0.5\n");
        assert_eq!(out, b"v 0.00 0.00 1.00\n");
        assert_eq!(stats.vertices, 1);
        assert_eq!(stats.outside_bounds, 0);
    }

    #[test]
    fn opaque_lines_pass_through_verbatim() {
        let input = b"# header\r\nf 1 2 3\nv 1.0 abc 2.0\n\n  vt 0.1 0.2\nusemtl stone";
        let (out, stats) = run(input);
        assert_eq!(out, input.to_vec());
        assert_eq!(stats.lines, 6);
        assert_eq!(stats.passthrough, 6);
        assert_eq!(stats.vertices, 0);
    }

    #[test]
    fn mixed_file_keeps_line_count_and_order() {
        let input = b"o piece\nv -1 0 -0.5\nv 3 2 1.5\r\nf 1 2 1\nv 0.004 1 0";
        let (out, stats) = run(input);
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "o piece\nv -2.00 -1.00 0.00\nv 2.00 1.00 2.00\nf 1 2 1\nv -1.00 0.00 0.50\n"
        );
        assert_eq!(text.lines().count(), stats.lines);
        assert_eq!(stats.lines, 5);
        assert_eq!(stats.vertices, 3);
        assert_eq!(stats.passthrough, 2);
    }

    #[test]
    fn rewriting_is_deterministic() {
        let input = b"v 0.123 1.987 -0.25\nf 1 1 1\nv 2.5 0.5 1.0\n";
        assert_eq!(run(input), run(input));
    }

    #[test]
    fn out_of_bounds_vertices_are_counted_and_still_moved() {
        let (out, stats) = run(b"v 5 1 0\n");
        assert_eq!(out, b"v 4.00 0.00 0.50\n");
        assert_eq!(stats.outside_bounds, 1);
    }

    #[test]
    fn precision_is_configurable() {
        let mut out = Vec::new();
        rewrite(Cursor::new("v 1.5 1.25 0\n"), &mut out, &sample_box(), 3).unwrap();
        assert_eq!(out, b"v 0.500 0.250 0.500\n");
    }

    #[test]
    fn rewrite_file_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model_small.obj");
        let output = dir.path().join("modelf.obj");
        std::fs::write(&input, "v 1.0 1.0 0.5\nf 1 1 1\n").unwrap();
        std::fs::write(&output, "stale content that is longer than the result\n").unwrap();

        let stats = rewrite_file(&input, &output, &sample_box(), DEFAULT_PRECISION).unwrap();

        assert_eq!(stats.lines, 2);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "v 0.00 0.00 1.00\nf 1 1 1\n"
        );
    }

    #[test]
    fn missing_input_reports_input_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.obj");
        let err = rewrite_file(&input, dir.path().join("out.obj"), &sample_box(), 2).unwrap_err();
        match err {
            FixError::Io { path, .. } => assert_eq!(path, input),
            other => panic!("unexpected error: {other}"),
        }
    }
}
