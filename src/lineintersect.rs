use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, LineString, Polygon};

use crate::geom::dedupe_coords;

// Every crossing point between two polylines. Exact duplicates are
// merged, so a path grazing a shared vertex of two adjacent segments
// counts as a single crossing. The point set does not depend on the
// operand order, only its enumeration order does.
pub fn line_line_intersections(a: &LineString<f64>, b: &LineString<f64>) -> Vec<Coord<f64>> {
  let mut points = Vec::<Coord<f64>>::new();
  for seg_a in a.lines() {
    for seg_b in b.lines() {
      match line_intersection(seg_a, seg_b) {
        Some(LineIntersection::SinglePoint { intersection, .. }) => points.push(intersection),
        Some(LineIntersection::Collinear { intersection }) => {
          points.push(intersection.start);
          points.push(intersection.end);
        }
        None => {}
      }
    }
  }
  dedupe_coords(points)
}

// crossings of a path against a polygon boundary, every ring included
pub fn line_polygon_intersections(
  line: &LineString<f64>,
  polygon: &Polygon<f64>,
) -> Vec<Coord<f64>> {
  let mut points = Vec::<Coord<f64>>::new();
  for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors().iter()) {
    points.extend(line_line_intersections(line, ring));
  }
  dedupe_coords(points)
}
