use super::Vec2;
use crate::error::TerrainError;

mod defaults {
    pub const MIN_POINTS: usize = 2;
    pub const MAX_POINTS: usize = 64;
    pub const PARALLEL_EPSILON: f64 = 1e-6;
}

pub type Segment = (Vec2, Vec2);

/// Ground profile as a piecewise-linear function of x.
///
/// Points are sorted by x (equal x is allowed and forms a vertical step).
/// Beyond the first and last point the ground continues flat.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    points: Vec<Vec2>,
}

impl Terrain {
    pub fn new(points: Vec<Vec2>) -> Result<Self, TerrainError> {
        if points.len() < defaults::MIN_POINTS {
            return Err(TerrainError::TooFewPoints {
                min: defaults::MIN_POINTS,
                got: points.len(),
            });
        }
        if points.len() > defaults::MAX_POINTS {
            return Err(TerrainError::TooManyPoints {
                max: defaults::MAX_POINTS,
                got: points.len(),
            });
        }
        if let Some(index) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(TerrainError::NonFinite { index });
        }
        if let Some(index) = points.windows(2).position(|w| w[1].x < w[0].x) {
            return Err(TerrainError::Unordered {
                index: index + 1,
                x: points[index + 1].x,
                previous_x: points[index].x,
            });
        }
        Ok(Self { points })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, TerrainError> {
        Self::new(pairs.iter().copied().map(Vec2::from).collect())
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn first(&self) -> Vec2 {
        self.points[0]
    }

    pub fn last(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    /// Interpolated ground height below `x`, flat outside the point span.
    pub fn ground_height_at(&self, x: f64) -> f64 {
        let (first, last) = (self.first(), self.last());
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }
        // first point whose x is strictly greater than `x`; exists because x < last.x
        let upper = self.points.partition_point(|p| p.x <= x);
        let (a, b) = (self.points[upper - 1], self.points[upper]);
        let t = (x - a.x) / (b.x - a.x);
        a.y + (b.y - a.y) * t
    }

    /// Polyline segments in x order.
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(None, &self.points, None)
    }

    /// Polyline segments plus the flat extensions needed to cover `min_x..=max_x`.
    pub fn segments_spanning(&self, min_x: f64, max_x: f64) -> Segments<'_> {
        let (first, last) = (self.first(), self.last());
        let head = (min_x < first.x).then(|| Vec2::new(min_x, first.y));
        let tail = (max_x > last.x).then(|| Vec2::new(max_x, last.y));
        Segments::new(head, &self.points, tail)
    }
}

#[derive(Clone)]
pub struct Segments<'a> {
    previous_point: Option<Vec2>,
    points: std::iter::Chain<
        std::iter::Chain<std::option::IntoIter<Vec2>, std::iter::Copied<std::slice::Iter<'a, Vec2>>>,
        std::option::IntoIter<Vec2>,
    >,
}

impl<'a> Segments<'a> {
    fn new(head: Option<Vec2>, points: &'a [Vec2], tail: Option<Vec2>) -> Self {
        let mut points = head
            .into_iter()
            .chain(points.iter().copied())
            .chain(tail);
        Self {
            previous_point: points.next(),
            points,
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let next_point = self.points.next()?;
        let previous_point = self.previous_point.replace(next_point)?;
        Some((previous_point, next_point))
    }
}

/// Segment-segment intersection test, endpoints inclusive.
///
/// Segments whose direction cross product is below the epsilon (parallel or
/// degenerate) never intersect.
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    // https://stackoverflow.com/questions/563198/how-do-you-detect-where-two-line-segments-intersect
    let r = b - a;
    let s = d - c;

    let rs = r.cross(s);
    if rs.abs() < defaults::PARALLEL_EPSILON {
        return false;
    }

    let c_a = c - a;
    let t = c_a.cross(s) / rs;
    let u = c_a.cross(r) / rs;

    (0f64..=1f64).contains(&t) && (0f64..=1f64).contains(&u)
}
