use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;

use crate::aggregate::{cumulative, pluviosity_by_date, total};
use crate::contour::read_contour_file;
use crate::filter::filter_inside;
use crate::forecast::read_forecast_dir;
use crate::poly::{Point, Polygon};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rainbasin-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn pipeline_end_to_end() {
    let dir = scratch_dir("pipeline");
    fs::write(&dir.join("basin.bln"), "4, 1\n0, 0\n0, 10\n10, 10\n10, 0\n").unwrap();
    // two valid dates; each file has one sample inside and one outside
    fs::write(
        dir.join("ETA40_p011221a011221.dat"),
        "5.0 5.0 2.5\n15.0 5.0 99.0\n",
    )
    .unwrap();
    fs::write(
        dir.join("ETA40_p011221a021221.dat"),
        "1.0 9.0 4.0\n5.0 -1.0 99.0\n",
    )
    .unwrap();
    // a file from another issue date must be ignored
    fs::write(dir.join("ETA40_p301121a011221.dat"), "5.0 5.0 99.0\n").unwrap();

    let polygon = read_contour_file(&dir.join("basin.bln")).unwrap();
    let samples = read_forecast_dir(&dir, "011221").unwrap();
    assert_eq!(samples.len(), 4);

    let retained = filter_inside(&polygon, samples);
    assert_eq!(retained.len(), 2);

    let series = pluviosity_by_date(&retained);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].1, 2.5);
    assert_eq!(series[1].1, 4.0);
    assert_eq!(total(&series), 6.5);
    assert_eq!(cumulative(&series)[1].1, 6.5);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_forecast_files() {
    let dir = scratch_dir("empty");
    assert!(read_forecast_dir(&dir, "011221").is_err());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn convex_polygon_grid() {
    // regular hexagon of radius 4; every grid point agrees with the
    // winding-number reference
    let verts: Vec<Point> = (0..6)
        .map(|i| {
            let ang = std::f64::consts::TAU * i as f64 / 6.0;
            Point::new(4.0 * ang.cos(), 4.0 * ang.sin())
        })
        .collect();
    let poly = Polygon::new(verts.clone()).unwrap();
    for ix in -10..=10 {
        for iy in -10..=10 {
            let q = Point::new(ix as f64 * 0.51, iy as f64 * 0.51 + 0.003);
            assert_eq!(
                poly.contains(q.x, q.y),
                winding_number(&verts, q) != 0,
                "disagreement at ({}, {})",
                q.x,
                q.y
            );
        }
    }
}

// reference implementation, http://geomalgorithms.com/a03-_inclusion.html
fn winding_number(v: &[Point], p: Point) -> i32 {
    fn is_left(a: Point, b: Point, p: Point) -> f64 {
        (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
    }
    let n = v.len();
    let mut wn = 0;
    for i in 0..n {
        let a = v[i];
        let b = v[(i + 1) % n];
        if a.y <= p.y {
            if b.y > p.y && is_left(a, b, p) > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && is_left(a, b, p) < 0.0 {
            wn -= 1;
        }
    }
    wn
}

fn seg_dist(a: Point, b: Point, p: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

proptest! {
    // Parity invariant: on simple star polygons, with query points kept
    // away from edges and vertex heights, the raycast agrees with the
    // winding-number reference everywhere.
    #[test]
    fn raycast_matches_winding_number(
        radii in prop::collection::vec(1.0f64..5.0, 3..12),
        qx in -6.0f64..6.0,
        qy in -6.0f64..6.0,
    ) {
        let n = radii.len();
        let verts: Vec<Point> = radii
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let ang = std::f64::consts::TAU * i as f64 / n as f64;
                Point::new(r * ang.cos(), r * ang.sin())
            })
            .collect();
        let q = Point::new(qx, qy);
        prop_assume!(verts.iter().all(|v| (q.y - v.y).abs() > 1e-6));
        let min_d = (0..n)
            .map(|i| seg_dist(verts[i], verts[(i + 1) % n], q))
            .fold(f64::INFINITY, f64::min);
        prop_assume!(min_d > 1e-3);

        let poly = Polygon::new(verts.clone()).unwrap();
        prop_assert_eq!(poly.contains(q.x, q.y), winding_number(&verts, q) != 0);
    }
}
