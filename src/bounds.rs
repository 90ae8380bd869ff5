use crate::poly::Point;

/// Axis-aligned bounding box over a polygon's vertices, computed once at
/// polygon construction and reused for every point test.
#[derive(Clone, Debug, PartialEq)]
pub struct Bbox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Bbox {
    pub fn of(vertices: &[Point]) -> Bbox {
        let mut b = Bbox {
            xmin: f64::INFINITY,
            ymin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymax: f64::NEG_INFINITY,
        };
        for v in vertices {
            b.xmin = b.xmin.min(v.x);
            b.ymin = b.ymin.min(v.y);
            b.xmax = b.xmax.max(v.x);
            b.ymax = b.ymax.max(v.y);
        }
        b
    }

    /// Rejection-only test: true means the point is certainly outside the
    /// polygon. False proves nothing; the exact raycast test still runs.
    /// Strict inequalities, so points on the box edge are rejected too.
    pub fn excludes(&self, x: f64, y: f64) -> bool {
        x <= self.xmin || x >= self.xmax || y <= self.ymin || y >= self.ymax
    }
}
