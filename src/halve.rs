// The cut itself: a thin corridor polygon is built along the drawn
// line on one side, subtracted from the target polygon, and the
// fragments still running along the line are kept as that side's half.

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};

use crate::boundary::BoundaryGeometry;
use crate::lineintersect::line_polygon_intersections;
use crate::lineoffset::line_offset;
use crate::lineoverlap::polygon_overlaps_line;

// which side of the drawn line a half is cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutSide {
  Upper,
  Lower,
}

impl CutSide {
  pub fn sign(self) -> f64 {
    match self {
      CutSide::Upper => 1.0,
      CutSide::Lower => -1.0,
    }
  }
}

// Closed corridor: the drawn line out, the offset line back, sealed at
// both ends. `offset_km` must stay larger than the overlap tolerance so
// the far edge of the corridor is never mistaken for the cut edge.
pub fn cut_corridor(line: &LineString<f64>, side: CutSide, offset_km: f64) -> Polygon<f64> {
  let offset = line_offset(line, side.sign() * offset_km);
  let mut shell = Vec::<Coord<f64>>::with_capacity(line.0.len() + offset.0.len() + 1);
  shell.extend(line.0.iter().copied());
  shell.extend(offset.0.iter().rev().copied());
  shell.push(line.0[0]);
  Polygon::new(LineString::new(shell), vec![])
}

// set-difference; None when nothing of the subject remains
pub fn subtract(subject: &Polygon<f64>, cutter: &Polygon<f64>) -> Option<MultiPolygon<f64>> {
  let remainder = subject.difference(cutter);
  if remainder.0.is_empty() {
    None
  } else {
    Some(remainder)
  }
}

// One half of the split. None when the line does not cleanly cross the
// polygon (zero or an odd number of crossings, a vertex graze, or a
// subtraction that left nothing along the line). Pure: identical input
// always produces the identical half.
pub fn compute_half(
  polygon: &Polygon<f64>,
  line: &LineString<f64>,
  side: CutSide,
  offset_km: f64,
  tolerance_km: f64,
) -> Option<BoundaryGeometry> {
  let crossings = line_polygon_intersections(line, polygon);
  if crossings.is_empty() || crossings.len() % 2 != 0 {
    return None;
  }

  let corridor = cut_corridor(line, side, offset_km);
  let remainder = subtract(polygon, &corridor)?;

  let mut kept: Vec<Polygon<f64>> = remainder
    .0
    .into_iter()
    .filter(|fragment| polygon_overlaps_line(fragment, line, tolerance_km))
    .collect();

  match kept.len() {
    0 => None,
    1 => kept.pop().map(BoundaryGeometry::Polygon),
    _ => Some(BoundaryGeometry::MultiPolygon(MultiPolygon::new(kept))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use geo::{coord, Area};

  const OFFSET_KM: f64 = 0.01;
  const TOLERANCE_KM: f64 = 0.005;

  fn square() -> Polygon<f64> {
    Polygon::new(
      LineString::new(vec![
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 10.0, y: 10.0 },
        coord! { x: 0.0, y: 10.0 },
        coord! { x: 0.0, y: 0.0 },
      ]),
      vec![],
    )
  }

  fn vertical_line() -> LineString<f64> {
    LineString::new(vec![coord! { x: 5.0, y: -1.0 }, coord! { x: 5.0, y: 11.0 }])
  }

  fn area(geometry: &BoundaryGeometry) -> f64 {
    geometry.polygons().iter().map(|p| p.unsigned_area()).sum()
  }

  #[test]
  fn test_corridor_is_a_closed_thin_polygon() {
    let corridor = cut_corridor(&vertical_line(), CutSide::Upper, OFFSET_KM);
    let shell = corridor.exterior();
    assert_eq!(shell.0.first(), shell.0.last());
    // 12 units long, about 9e-5 degrees wide
    let expected = 12.0 * crate::geom::kilometers_to_degrees(OFFSET_KM);
    assert!((corridor.unsigned_area() - expected).abs() / expected < 1e-6);
  }

  #[test]
  fn test_subtract_disjoint_leaves_subject() {
    let far = Polygon::new(
      LineString::new(vec![
        coord! { x: 100.0, y: 100.0 },
        coord! { x: 101.0, y: 100.0 },
        coord! { x: 101.0, y: 101.0 },
        coord! { x: 100.0, y: 101.0 },
        coord! { x: 100.0, y: 100.0 },
      ]),
      vec![],
    );
    let remainder = subtract(&square(), &far).unwrap();
    assert_eq!(remainder.0.len(), 1);
    assert!((remainder.unsigned_area() - 100.0).abs() < 1e-9);
  }

  #[test]
  fn test_subtract_covering_cutter_removes_everything() {
    let huge = Polygon::new(
      LineString::new(vec![
        coord! { x: -10.0, y: -10.0 },
        coord! { x: 20.0, y: -10.0 },
        coord! { x: 20.0, y: 20.0 },
        coord! { x: -10.0, y: 20.0 },
        coord! { x: -10.0, y: -10.0 },
      ]),
      vec![],
    );
    assert!(subtract(&square(), &huge).is_none());
  }

  #[test]
  fn test_compute_both_halves_of_a_square() {
    let upper = compute_half(
      &square(),
      &vertical_line(),
      CutSide::Upper,
      OFFSET_KM,
      TOLERANCE_KM,
    )
    .unwrap();
    let lower = compute_half(
      &square(),
      &vertical_line(),
      CutSide::Lower,
      OFFSET_KM,
      TOLERANCE_KM,
    )
    .unwrap();

    // each half is one rectangle of roughly half the area; the corridor
    // width is the only loss
    assert_eq!(upper.polygons().len(), 1);
    assert_eq!(lower.polygons().len(), 1);
    assert!((area(&upper) - 50.0).abs() < 0.01);
    assert!((area(&lower) - 50.0).abs() < 0.01);
    assert!((area(&upper) + area(&lower) - 100.0).abs() < 0.01);

    // the two halves lie on opposite sides of the line
    assert_ne!(upper, lower);
  }

  #[test]
  fn test_line_ending_inside_yields_no_half() {
    let dangling = LineString::new(vec![coord! { x: -1.0, y: 5.0 }, coord! { x: 5.0, y: 5.0 }]);
    assert!(compute_half(&square(), &dangling, CutSide::Upper, OFFSET_KM, TOLERANCE_KM).is_none());
    assert!(compute_half(&square(), &dangling, CutSide::Lower, OFFSET_KM, TOLERANCE_KM).is_none());
  }

  #[test]
  fn test_vertex_graze_yields_no_half() {
    // one merged crossing at the corner, an odd count
    let graze = LineString::new(vec![coord! { x: -1.0, y: 1.0 }, coord! { x: 1.0, y: -1.0 }]);
    assert!(compute_half(&square(), &graze, CutSide::Upper, OFFSET_KM, TOLERANCE_KM).is_none());
  }

  #[test]
  fn test_disjoint_line_yields_no_half() {
    let far = LineString::new(vec![
      coord! { x: 20.0, y: -1.0 },
      coord! { x: 20.0, y: 11.0 },
    ]);
    assert!(compute_half(&square(), &far, CutSide::Upper, OFFSET_KM, TOLERANCE_KM).is_none());
  }

  #[test]
  fn test_u_shape_half_is_a_multi_polygon() {
    // a U opening north, cut by a horizontal line through both arms:
    // the half above the line is two disconnected arm tips
    let u_shape = Polygon::new(
      LineString::new(vec![
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 10.0, y: 10.0 },
        coord! { x: 8.0, y: 10.0 },
        coord! { x: 8.0, y: 2.0 },
        coord! { x: 2.0, y: 2.0 },
        coord! { x: 2.0, y: 10.0 },
        coord! { x: 0.0, y: 10.0 },
        coord! { x: 0.0, y: 0.0 },
      ]),
      vec![],
    );
    let cut = LineString::new(vec![coord! { x: -1.0, y: 6.0 }, coord! { x: 11.0, y: 6.0 }]);

    let crossings = line_polygon_intersections(&cut, &u_shape);
    assert_eq!(crossings.len(), 4);

    let one_side = compute_half(&u_shape, &cut, CutSide::Upper, OFFSET_KM, TOLERANCE_KM).unwrap();
    let other_side = compute_half(&u_shape, &cut, CutSide::Lower, OFFSET_KM, TOLERANCE_KM).unwrap();

    // the base stays connected, the two arm tips do not
    let arm_tips = match (&one_side, &other_side) {
      (BoundaryGeometry::Polygon(_), BoundaryGeometry::MultiPolygon(mp)) => mp,
      (BoundaryGeometry::MultiPolygon(mp), BoundaryGeometry::Polygon(_)) => mp,
      _ => panic!("expected one connected and one disconnected half"),
    };
    assert_eq!(arm_tips.0.len(), 2);

    let total = u_shape.unsigned_area();
    assert!((area(&one_side) + area(&other_side) - total).abs() < 0.01);
  }
}
