use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box of a mesh. Built once per asset, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Midpoint of the box on every axis.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Translation that centers X and Y on the origin and puts the lowest Z
    /// on the `z = 0` floor.
    pub fn floor_offset(&self) -> Vector3<f64> {
        let center = self.center();
        Vector3::new(-center.x, -center.y, -self.min.z)
    }

    /// Moves a point by [`Self::floor_offset`].
    pub fn recenter(&self, p: &Point3<f64>) -> Point3<f64> {
        let center = self.center();
        Point3::new(p.x - center.x, p.y - center.y, p.z - self.min.z)
    }

    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

/// Running per-axis min/max over a stream of vertices.
#[derive(Debug, Clone)]
pub struct BoundsAccumulator {
    min: Point3<f64>,
    max: Point3<f64>,
    count: usize,
}

impl Default for BoundsAccumulator {
    fn default() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            count: 0,
        }
    }
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, p: &Point3<f64>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);

        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` when no vertex was added; an empty mesh has no bounds.
    pub fn finish(&self) -> Option<BoundingBox> {
        (self.count > 0).then(|| BoundingBox::new(self.min, self.max))
    }
}

impl FromIterator<Point3<f64>> for BoundsAccumulator {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        let mut acc = Self::new();
        for p in iter {
            acc.add(&p);
        }
        acc
    }
}
