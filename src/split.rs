use std::panic::{catch_unwind, AssertUnwindSafe};

use geo::LineString;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boundary::{
  Boundary, BoundaryCollection, BoundaryGeometry, LOWER_HALF_ID, UPPER_HALF_ID,
};
use crate::geom::is_closed_ring;
use crate::halve::{compute_half, CutSide};
use crate::lineintersect::line_polygon_intersections;

// Both distances are in kilometers. The corridor offset must stay
// larger than the overlap tolerance, and both are fixed per split
// attempt, independent of zoom, so repeated attempts on identical
// input behave identically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitOptions {
  pub corridor_offset_km: f64,
  pub overlap_tolerance_km: f64,
}

impl Default for SplitOptions {
  fn default() -> SplitOptions {
    SplitOptions {
      corridor_offset_km: 0.01,
      overlap_tolerance_km: 0.005,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitError {
  #[error("the drawn feature is not an open line with at least two points")]
  InvalidInputGeometry,
  #[error("the line does not cross any boundary polygon at two or more points")]
  NoIntersectingPolygon,
  #[error("could not compute both halves of the split")]
  SplitComputationFailed,
}

pub type SplitResult = Result<BoundaryCollection, SplitError>;

pub fn split(line: &LineString<f64>, candidates: &[Boundary], fallback: &[Boundary]) -> SplitResult {
  split_with(line, candidates, fallback, &SplitOptions::default())
}

// Splits the first polygon the line crosses at two or more points into
// an upper and a lower half. Fragments from earlier splits are scanned
// first; the original boundaries are only scanned while no fragments
// exist. Returns the updated working set: every prior candidate except
// the target, then the two halves. The inputs are never mutated, so a
// failed attempt leaves no trace.
pub fn split_with(
  line: &LineString<f64>,
  candidates: &[Boundary],
  fallback: &[Boundary],
  options: &SplitOptions,
) -> SplitResult {
  if line.0.len() < 2 || is_closed_ring(line) {
    return Err(SplitError::InvalidInputGeometry);
  }

  let scanning_fallback = candidates.is_empty();
  let pool = if scanning_fallback { fallback } else { candidates };

  // first match wins; a line crossing several polygons splits only the
  // earliest one in iteration order
  let target_index = match pool.iter().position(|b| crossing_count(line, b) >= 2) {
    Some(index) => index,
    None => return Err(SplitError::NoIntersectingPolygon),
  };
  let target = &pool[target_index];
  debug!(
    "splitting {} ({} candidates, fallback: {})",
    target.id,
    pool.len(),
    scanning_fallback
  );

  // geometry backends may panic on degenerate input; a panic here is a
  // failed split, not a crash of the host session
  let halves = catch_unwind(AssertUnwindSafe(|| compute_halves(target, line, options)));
  let (upper_geometry, lower_geometry) = match halves {
    Ok((Some(upper), Some(lower))) => (upper, lower),
    Ok(_) => return Err(SplitError::SplitComputationFailed),
    Err(_) => {
      warn!("half computation panicked for target {}", target.id);
      return Err(SplitError::SplitComputationFailed);
    }
  };

  let upper = Boundary::derived(UPPER_HALF_ID, target, upper_geometry);
  let lower = Boundary::derived(LOWER_HALF_ID, target, lower_geometry);

  let mut features: Vec<Boundary> = if scanning_fallback {
    Vec::with_capacity(2)
  } else {
    candidates
      .iter()
      .enumerate()
      .filter(|(index, _)| *index != target_index)
      .map(|(_, boundary)| boundary.clone())
      .collect()
  };
  features.push(upper);
  features.push(lower);

  Ok(BoundaryCollection::new(features))
}

fn compute_halves(
  target: &Boundary,
  line: &LineString<f64>,
  options: &SplitOptions,
) -> (Option<BoundaryGeometry>, Option<BoundaryGeometry>) {
  match &target.geometry {
    BoundaryGeometry::Polygon(polygon) => (
      compute_half(
        polygon,
        line,
        CutSide::Upper,
        options.corridor_offset_km,
        options.overlap_tolerance_km,
      ),
      compute_half(
        polygon,
        line,
        CutSide::Lower,
        options.corridor_offset_km,
        options.overlap_tolerance_km,
      ),
    ),
    // a fragment that is already multiple parts cannot be halved again
    BoundaryGeometry::MultiPolygon(_) => (None, None),
  }
}

// crossings against every member polygon of the feature
fn crossing_count(line: &LineString<f64>, boundary: &Boundary) -> usize {
  boundary
    .geometry
    .polygons()
    .iter()
    .map(|polygon| line_polygon_intersections(line, polygon).len())
    .sum()
}
