use nalgebra::Point3;

/// Tag of a vertex position line in Wavefront OBJ text.
pub const VERTEX_TAG: &str = "v";

/// Classification of a single OBJ text line.
///
/// Only `v x y z` with exactly three parseable numbers is a vertex. Everything
/// else (faces, normals, comments, blank lines, `v` lines with a bad field or
/// the wrong field count) is opaque and must be preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjLine {
    Vertex(Point3<f64>),
    Opaque,
}

impl ObjLine {
    pub fn classify(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(VERTEX_TAG) {
            return ObjLine::Opaque;
        }

        let mut coords = [0.0f64; 3];
        for slot in coords.iter_mut() {
            match tokens.next().map(str::parse::<f64>) {
                Some(Ok(value)) => *slot = value,
                _ => return ObjLine::Opaque,
            }
        }
        if tokens.next().is_some() {
            return ObjLine::Opaque;
        }

        ObjLine::Vertex(Point3::new(coords[0], coords[1], coords[2]))
    }

    /// Classifies raw bytes. Lines that are not valid UTF-8 are opaque.
    pub fn classify_bytes(line: &[u8]) -> Self {
        match std::str::from_utf8(line) {
            Ok(text) => Self::classify(text),
            Err(_) => ObjLine::Opaque,
        }
    }

    pub fn vertex(&self) -> Option<Point3<f64>> {
        match self {
            ObjLine::Vertex(p) => Some(*p),
            ObjLine::Opaque => None,
        }
    }
}

/// Renders a vertex line with a fixed number of decimals, `\n` terminated.
pub fn format_vertex(p: &Point3<f64>, precision: usize) -> String {
    format!(
        "{VERTEX_TAG} {:.prec$} {:.prec$} {:.prec$}\n",
        p.x,
        p.y,
        p.z,
        prec = precision
    )
}
