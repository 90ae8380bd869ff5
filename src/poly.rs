use crate::bounds::Bbox;
use crate::error::Error;

/// Absolute tolerance for "point at vertex height" comparisons, in degrees.
/// Input coordinates are decimal lat/long from text files, so exact float
/// equality would miss hits that the source data intends to be exact.
pub const EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A simple closed polygon: the last vertex connects back to the first.
/// Immutable after construction; the bounding box is computed once here
/// and reused for every point test.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Point>,
    bbox: Bbox,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Result<Polygon, Error> {
        if vertices.len() < 3 {
            return Err(Error::TooFewVertices(vertices.len()));
        }
        let bbox = Bbox::of(&vertices);
        Ok(Polygon { vertices, bbox })
    }

    /// Parses the exterior ring of a WKT POLYGON, e.g.
    /// `POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))`.
    pub fn from_wkt(s: &str) -> Result<Polygon, Error> {
        use wkt::TryFromWkt;
        let p: geo_types::Polygon<f64> =
            geo_types::Polygon::try_from_wkt_str(s).map_err(|e| Error::Wkt(e.to_string()))?;
        let mut vertices: Vec<Point> =
            p.exterior().coords().map(|c| Point::new(c.x, c.y)).collect();
        // WKT rings repeat the first vertex at the end; we close implicitly
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Polygon::new(vertices)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn bbox(&self) -> &Bbox {
        &self.bbox
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.contains_eps(x, y, EPSILON)
    }

    /// Raycast parity test: casts a horizontal ray from (x, y) towards
    /// increasing x and counts edge crossings; odd means inside.
    ///
    /// Vertex hits are attributed to the edge where the vertex comes first
    /// in iteration order, so a ray through a vertex counts exactly once.
    /// An edge collinear with the ray counts as one crossing when the two
    /// neighboring vertices straddle the ray and as zero when both lie on
    /// the same side (tangential touch); the vertex closing a collinear
    /// edge does not count again as a first-endpoint hit.
    ///
    /// Non-finite coordinates classify as outside; loaders reject them
    /// before this point.
    pub fn contains_eps(&self, x: f64, y: f64, eps: f64) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let v = &self.vertices;
        let n = v.len();
        let mut crossings = 0u32;
        for i in 0..n {
            let a = v[i];
            let b = v[(i + 1) % n];

            // the ray is horizontal: edges entirely above or below it
            // cannot be crossed
            if y < a.y.min(b.y) || y > a.y.max(b.y) {
                continue;
            }
            // the ray extends rightward only
            if x >= a.x.max(b.x) {
                continue;
            }

            let at_a = close(y, a.y, eps);
            let at_b = close(y, b.y, eps);
            if at_a && at_b {
                // edge collinear with the ray; the neighbors decide whether
                // the polygon actually passes through the ray here or only
                // grazes it
                let before = v[(i + n - 1) % n];
                let after = v[(i + 2) % n];
                let straddles =
                    (before.y < y && after.y > y) || (before.y > y && after.y < y);
                if straddles {
                    crossings += 1;
                }
            } else if at_a {
                // skip when the preceding edge was collinear with the ray,
                // that run was settled by the branch above
                let before = v[(i + n - 1) % n];
                if !close(y, before.y, eps) {
                    crossings += 1;
                }
            } else if at_b {
                // counted when this vertex leads the next edge
            } else {
                // proper crossing candidate: count only if the ray/edge
                // intersection lies strictly right of the point
                let t = (y - a.y) / (b.y - a.y);
                let ix = a.x + t * (b.x - a.x);
                if ix > x {
                    crossings += 1;
                }
            }
        }
        crossings % 2 == 1
    }
}

#[inline]
fn close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[cfg(test)]
fn square() -> Polygon {
    Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 10.0),
        Point::new(10.0, 10.0),
        Point::new(10.0, 0.0),
    ])
    .unwrap()
}

#[test]
fn square_interior_and_exterior() {
    let p = square();
    assert!(p.contains(5.0, 5.0));
    assert!(!p.contains(15.0, 5.0));
    assert!(!p.contains(5.0, 15.0));
    assert!(!p.contains(-5.0, -5.0));
}

#[test]
fn square_boundary_cases() {
    let p = square();
    // left edge at the point's x: the only surviving edge is the right one,
    // crossed once, so the classifier reports inside; the pipeline still
    // drops this point at the bounding-box stage
    assert!(p.contains(0.0, 5.0));
    // bottom edge at the point's own height: tangential, both neighbors of
    // the collinear edge are above it
    assert!(!p.contains(5.0, 0.0));
}

#[test]
fn triangle() {
    let p = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(5.0, 10.0),
    ])
    .unwrap();
    assert!(p.contains(5.0, 1.0));
    assert!(!p.contains(5.0, 11.0));
}

#[test]
fn ray_through_vertex_counts_once() {
    // diamond; a ray from the center passes exactly through (10, 5),
    // shared by two edges
    let p = Polygon::new(vec![
        Point::new(5.0, 0.0),
        Point::new(10.0, 5.0),
        Point::new(5.0, 10.0),
        Point::new(0.0, 5.0),
    ])
    .unwrap();
    assert!(p.contains(5.0, 5.0));
    assert!(!p.contains(11.0, 5.0));
}

#[test]
fn horizontal_edge_tangential_touch() {
    // square with a notch cut from the top down to y=5 between x=6..8;
    // the notch floor is a horizontal edge whose neighbors are both above
    let p = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(8.0, 10.0),
        Point::new(8.0, 5.0),
        Point::new(6.0, 5.0),
        Point::new(6.0, 10.0),
        Point::new(0.0, 10.0),
    ])
    .unwrap();
    assert!(p.contains(1.0, 5.0));
    assert!(!p.contains(7.0, 11.0));
}

#[test]
fn horizontal_edge_straddled() {
    // L-shape; the step at y=5 is a horizontal edge whose neighbors lie on
    // opposite sides of the ray, a single true crossing
    let p = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 5.0),
        Point::new(6.0, 5.0),
        Point::new(6.0, 10.0),
        Point::new(0.0, 10.0),
    ])
    .unwrap();
    assert!(p.contains(1.0, 5.0));
    assert!(!p.contains(7.0, 7.0));
    assert!(p.contains(7.0, 3.0));
}

#[test]
fn non_finite_point_is_outside() {
    let p = square();
    assert!(!p.contains(f64::NAN, 5.0));
    assert!(!p.contains(5.0, f64::INFINITY));
}

#[test]
fn epsilon_override() {
    // pentagon with an apex at (5, 5); the query sits just below apex
    // height, left of the apex
    let p = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(5.0, 5.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, -5.0),
        Point::new(0.0, -5.0),
    ])
    .unwrap();
    // default tolerance: both apex edges are generic crossings right of the
    // query, even count, outside
    assert!(!p.contains(4.0, 5.0 - 1e-6));
    // loose tolerance snaps the query onto the apex, engaging the
    // vertex-touch rule: counted once, inside
    assert!(p.contains_eps(4.0, 5.0 - 1e-6, 1e-3));
}

#[test]
fn from_wkt_ring() {
    let p = Polygon::from_wkt("POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0))").unwrap();
    assert_eq!(p.vertices().len(), 4);
    assert!(p.contains(5.0, 5.0));
    assert!(!p.contains(15.0, 5.0));
}

#[test]
fn too_few_vertices() {
    let r = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    assert!(matches!(r, Err(Error::TooFewVertices(2))));
}
