use std::fs;
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::poly::{Point, Polygon};

/// Reads a `.bln` contour file: a header line declaring the vertex count,
/// then one comma-separated `lat, long` pair per line. The declared count
/// must match the number of vertex lines.
pub fn read_contour_file(path: &Path) -> Result<Polygon, Error> {
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let polygon = parse_contour(&raw, path)?;
    info!("Read contour with {} vertices from {}", polygon.vertices().len(), path.display());
    Ok(polygon)
}

fn parse_contour(raw: &str, path: &Path) -> Result<Polygon, Error> {
    let mut declared: Option<usize> = None;
    let mut vertices: Vec<Point> = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        let lineno = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<f64> = line
            .split(',')
            .map(|f| f.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| Error::MalformedRecord {
                path: path.to_path_buf(),
                line: lineno,
                reason: e.to_string(),
            })?;
        if declared.is_none() {
            // header line; trailing fields (e.g. a flag column) are ignored
            declared = Some(fields[0] as usize);
            continue;
        }
        if fields.len() < 2 {
            return Err(Error::MalformedRecord {
                path: path.to_path_buf(),
                line: lineno,
                reason: format!("expected 2 coordinates, got {}", fields.len()),
            });
        }
        let p = Point::new(fields[0], fields[1]);
        if !p.is_finite() {
            return Err(Error::InvalidPoint { path: path.to_path_buf(), line: lineno, x: p.x, y: p.y });
        }
        vertices.push(p);
    }
    let declared = declared.unwrap_or(0);
    if declared != vertices.len() {
        return Err(Error::VertexCountMismatch { declared, actual: vertices.len() });
    }
    Polygon::new(vertices)
}
