// The drawing layer is an external capability: the host's map toolkit
// owns the transient features the user draws. Everything the split
// flow needs from it is covered by three operations, so any toolkit
// can sit behind the trait.

use geo::LineString;
use log::debug;

use crate::boundary::{Boundary, Provenance};
use crate::split::{split_with, SplitError, SplitOptions, SplitResult};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawnFeature {
  // a transient cut line; discarded after every split attempt
  Line { id: String, line: LineString<f64> },
  // a boundary shown on the drawing layer: a fragment from an earlier
  // split, or a polygon the user drew and the containment guard kept
  Boundary(Boundary),
}

impl DrawnFeature {
  pub fn id(&self) -> &str {
    match self {
      DrawnFeature::Line { id, .. } => id,
      DrawnFeature::Boundary(boundary) => &boundary.id,
    }
  }
}

pub trait DrawSurface {
  fn add_feature(&mut self, feature: DrawnFeature);
  fn remove_feature(&mut self, id: &str);
  fn list_features(&self) -> Vec<DrawnFeature>;
}

// plain Vec-backed surface for hosts without a rendering toolkit
#[derive(Debug, Default)]
pub struct MemorySurface {
  features: Vec<DrawnFeature>,
}

impl MemorySurface {
  pub fn new() -> MemorySurface {
    MemorySurface::default()
  }
}

impl DrawSurface for MemorySurface {
  fn add_feature(&mut self, feature: DrawnFeature) {
    self.features.push(feature);
  }

  fn remove_feature(&mut self, id: &str) {
    self.features.retain(|f| f.id() != id);
  }

  fn list_features(&self) -> Vec<DrawnFeature> {
    self.features.clone()
  }
}

// Runs a split for a line just drawn on the surface. The line is
// removed from the surface whether or not the split succeeds. On
// success the surface is updated in step with the returned collection:
// a split fragment that was the target disappears and the two new
// halves appear.
pub fn handle_drawn_line(
  surface: &mut dyn DrawSurface,
  line_id: &str,
  fallback: &[Boundary],
  options: &SplitOptions,
) -> SplitResult {
  let features = surface.list_features();

  let line = features.iter().find_map(|f| match f {
    DrawnFeature::Line { id, line } if id == line_id => Some(line.clone()),
    _ => None,
  });
  let line = match line {
    Some(line) => line,
    None => {
      surface.remove_feature(line_id);
      return Err(SplitError::InvalidInputGeometry);
    }
  };

  let candidates: Vec<Boundary> = features
    .iter()
    .filter_map(|f| match f {
      DrawnFeature::Boundary(boundary) => Some(boundary.clone()),
      _ => None,
    })
    .collect();

  let result = split_with(&line, &candidates, fallback, options);
  surface.remove_feature(line_id);

  if let Ok(updated) = &result {
    // the target is the one candidate that did not survive
    let target = candidates
      .iter()
      .find(|candidate| !updated.features.contains(candidate));
    if let Some(target) = target {
      if target.provenance == Provenance::DerivedSplit {
        debug!("retiring split fragment {}", target.id);
        surface.remove_feature(&target.id);
      }
    }
    // the two halves are always the last two entries
    for half in &updated.features[updated.features.len() - 2..] {
      surface.add_feature(DrawnFeature::Boundary(half.clone()));
    }
  }

  result
}

// A polygon drawn by the user is only kept when one of the loaded
// boundaries contains it entirely; anything straddling or outside the
// region is removed from the surface. Returns whether it was kept.
pub fn handle_drawn_polygon(
  surface: &mut dyn DrawSurface,
  drawn: &Boundary,
  boundaries: &[Boundary],
) -> bool {
  let inside = boundaries
    .iter()
    .any(|boundary| boundary.geometry.contains(&drawn.geometry));
  if !inside {
    debug!("rejecting drawn polygon {} outside the region", drawn.id);
    surface.remove_feature(&drawn.id);
  }
  inside
}
