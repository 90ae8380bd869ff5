use crate::poly::{Point, Polygon};

/// Anything that sits at a planar location. Samples carry a measurement and
/// a date along with their point; the filter never looks at those.
pub trait Located {
    fn location(&self) -> Point;
}

impl Located for Point {
    fn location(&self) -> Point {
        *self
    }
}

/// Keeps the items lying inside the polygon, in input order.
///
/// Every item goes through the cheap bounding-box reject first; only
/// survivors pay for the exact raycast test. The bounding box covers the
/// whole polygon, so it never rejects an inside point, and nothing is
/// retained without passing the exact test.
pub fn filter_inside<T: Located>(poly: &Polygon, items: Vec<T>) -> Vec<T> {
    let bbox = poly.bbox();
    items
        .into_iter()
        .filter(|item| {
            let p = item.location();
            !bbox.excludes(p.x, p.y) && poly.contains(p.x, p.y)
        })
        .collect()
}
