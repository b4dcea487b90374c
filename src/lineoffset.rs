/*
 * Adapted from https://github.com/Turfjs/turf/blob/master/packages/turf-line-offset/index.js
 *
 * turfjs
 * The MIT License (MIT)

Copyright (c) 2019 Morgan Herlocker

Permission is hereby granted, free of charge, to any person obtaining a copy of
this software and associated documentation files (the "Software"), to deal in
the Software without restriction, including without limitation the rights to
use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
the Software, and to permit persons to whom the Software is furnished to do so,
subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 */

// Displaces a polyline perpendicular to its direction of travel. Each
// segment is offset on its own, then consecutive offset segments are
// joined at the intersection of their supporting lines; parallel
// joints keep both endpoints.

use geo::{Coord, LineString};

use crate::geom::kilometers_to_degrees;

// distance is in kilometers; the sign selects the side of the line
pub fn line_offset(line: &LineString<f64>, distance_km: f64) -> LineString<f64> {
  let offset = kilometers_to_degrees(distance_km);
  let coords = &line.0;

  let mut segments = Vec::<[Coord<f64>; 2]>::with_capacity(coords.len() - 1);
  let mut final_coords = Vec::<Coord<f64>>::with_capacity(coords.len());

  for index in 0..coords.len() - 1 {
    let mut segment = process_segment(coords[index], coords[index + 1], offset);

    if index > 0 {
      let prev = segments[index - 1];
      if let Some(cross) = supporting_line_intersection(prev, segment) {
        segments[index - 1][1] = cross;
        segment[0] = cross;
      }
      final_coords.push(segments[index - 1][0]);
      if index == coords.len() - 2 {
        final_coords.push(segment[0]);
        final_coords.push(segment[1]);
      }
    }

    // lines with a single segment have no joints to resolve
    if coords.len() == 2 {
      final_coords.push(segment[0]);
      final_coords.push(segment[1]);
    }

    segments.push(segment);
  }

  LineString::new(final_coords)
}

// translates one segment perpendicular to itself by `offset` degrees
fn process_segment(a: Coord<f64>, b: Coord<f64>, offset: f64) -> [Coord<f64>; 2] {
  let l = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
  let out1 = Coord {
    x: a.x + offset * (b.y - a.y) / l,
    y: a.y + offset * (a.x - b.x) / l,
  };
  let out2 = Coord {
    x: b.x + offset * (b.y - a.y) / l,
    y: b.y + offset * (a.x - b.x) / l,
  };
  [out1, out2]
}

// intersection of the infinite lines through both segments; None when parallel
fn supporting_line_intersection(
  ab: [Coord<f64>; 2],
  cd: [Coord<f64>; 2],
) -> Option<Coord<f64>> {
  let [a, b] = ab;
  let [c, d] = cd;
  let denominator = (d.y - c.y) * (b.x - a.x) - (d.x - c.x) * (b.y - a.y);
  if denominator == 0.0 {
    return None;
  }
  let u_a = ((d.x - c.x) * (a.y - c.y) - (d.y - c.y) * (a.x - c.x)) / denominator;
  Some(Coord {
    x: a.x + u_a * (b.x - a.x),
    y: a.y + u_a * (b.y - a.y),
  })
}
