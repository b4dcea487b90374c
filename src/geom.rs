use geo::{Coord, LineString};

// mean earth radius, as used by turf and most web mapping libraries
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

// converts a great-circle distance to the equivalent angular distance
// in degrees, which is the unit all coordinate arithmetic happens in
pub fn kilometers_to_degrees(km: f64) -> f64 {
  (km / EARTH_RADIUS_KM).to_degrees()
}

pub fn is_closed_ring(line: &LineString<f64>) -> bool {
  line.0.len() >= 2 && line.0.first() == line.0.last()
}

// drops exact duplicates while keeping first-seen order
pub fn dedupe_coords(coords: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
  let mut out = Vec::<Coord<f64>>::with_capacity(coords.len());
  for c in coords {
    if !out.contains(&c) {
      out.push(c);
    }
  }
  out
}
