// Follows the semantics of turf's line-overlap check: a polygon
// overlaps a line when some boundary segment of nonzero length stays
// within the tolerance distance of the line. The split pipeline uses
// this to tell which fragment of a corridor subtraction still touches
// the drawn line, as opposed to a sliver on the offset side.

use geo::{EuclideanDistance, LineString, Point, Polygon};

use crate::geom::kilometers_to_degrees;

pub fn polygon_overlaps_line(
  polygon: &Polygon<f64>,
  line: &LineString<f64>,
  tolerance_km: f64,
) -> bool {
  let tolerance = kilometers_to_degrees(tolerance_km);
  std::iter::once(polygon.exterior())
    .chain(polygon.interiors().iter())
    .any(|ring| ring_overlaps_line(ring, line, tolerance))
}

fn ring_overlaps_line(ring: &LineString<f64>, line: &LineString<f64>, tolerance: f64) -> bool {
  ring.lines().any(|segment| {
    segment.start != segment.end
      && within_tolerance(segment.start_point(), line, tolerance)
      && within_tolerance(segment.end_point(), line, tolerance)
  })
}

fn within_tolerance(point: Point<f64>, line: &LineString<f64>, tolerance: f64) -> bool {
  line
    .lines()
    .any(|segment| point.euclidean_distance(&segment) <= tolerance)
}

#[cfg(test)]
mod tests {
  use super::*;
  use geo::coord;

  fn line() -> LineString<f64> {
    LineString::new(vec![coord! { x: 5.0, y: -1.0 }, coord! { x: 5.0, y: 11.0 }])
  }

  fn rectangle(min_x: f64, max_x: f64) -> Polygon<f64> {
    Polygon::new(
      LineString::new(vec![
        coord! { x: min_x, y: 0.0 },
        coord! { x: max_x, y: 0.0 },
        coord! { x: max_x, y: 10.0 },
        coord! { x: min_x, y: 10.0 },
        coord! { x: min_x, y: 0.0 },
      ]),
      vec![],
    )
  }

  #[test]
  fn test_edge_on_the_line_overlaps() {
    // right edge lies exactly on x = 5
    assert!(polygon_overlaps_line(&rectangle(0.0, 5.0), &line(), 0.005));
  }

  #[test]
  fn test_edge_beyond_tolerance_does_not_overlap() {
    // 0.01 km offset is roughly 9e-5 degrees, past the 0.005 km tolerance
    let offset = kilometers_to_degrees(0.01);
    assert!(!polygon_overlaps_line(
      &rectangle(5.0 + offset, 10.0),
      &line(),
      0.005
    ));
  }

  #[test]
  fn test_edge_within_tolerance_overlaps() {
    let nudge = kilometers_to_degrees(0.002);
    assert!(polygon_overlaps_line(
      &rectangle(5.0 + nudge, 10.0),
      &line(),
      0.005
    ));
  }

  #[test]
  fn test_single_touching_corner_does_not_overlap() {
    // only the corner at (5, 5) touches the line; no segment runs along it
    let diamond = Polygon::new(
      LineString::new(vec![
        coord! { x: 7.0, y: 5.0 },
        coord! { x: 9.0, y: 3.0 },
        coord! { x: 11.0, y: 5.0 },
        coord! { x: 9.0, y: 7.0 },
        coord! { x: 7.0, y: 5.0 },
      ]),
      vec![],
    );
    let touching = LineString::new(vec![coord! { x: 7.0, y: -1.0 }, coord! { x: 7.0, y: 11.0 }]);
    assert!(!polygon_overlaps_line(&diamond, &touching, 0.005));
  }
}
